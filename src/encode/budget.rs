use serde::{Deserialize, Serialize};

use crate::foundation::error::{GifCapError, GifCapResult, SizeBudgetExceeded};

/// Default soft ceiling for encoded output: 5 MiB.
pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

/// What to do when the encoded GIF is larger than the budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizePolicy {
    /// Keep the output, log a warning and flag the result.
    #[default]
    Warn,
    /// Fail with [`GifCapError::SizeBudgetExceeded`].
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeBudget {
    pub max_bytes: usize,
    pub policy: SizePolicy,
}

impl Default for SizeBudget {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            policy: SizePolicy::Warn,
        }
    }
}

impl SizeBudget {
    /// Check `size` against the budget.
    ///
    /// Returns `Ok(Some(_))` for an over-budget output the policy lets through.
    pub fn check(&self, size: usize) -> GifCapResult<Option<SizeBudgetExceeded>> {
        if size <= self.max_bytes {
            return Ok(None);
        }
        let exceeded = SizeBudgetExceeded {
            size,
            budget: self.max_bytes,
        };
        match self.policy {
            SizePolicy::Warn => {
                tracing::warn!(
                    size,
                    budget = self.max_bytes,
                    "encoded gif exceeds size budget"
                );
                Ok(Some(exceeded))
            }
            SizePolicy::Reject => Err(GifCapError::SizeBudgetExceeded(exceeded)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/budget.rs"]
mod tests;
