use std::fmt;

/// Result alias used across the crate.
pub type GifCapResult<T> = Result<T, GifCapError>;

/// Output size measured against the configured budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeBudgetExceeded {
    /// Encoded size in bytes.
    pub size: usize,
    /// Budget in bytes.
    pub budget: usize,
}

impl fmt::Display for SizeBudgetExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "encoded gif is {} bytes, over the {} byte budget",
            self.size, self.budget
        )
    }
}

/// Every failure the caption pipeline can report.
#[derive(thiserror::Error, Debug)]
pub enum GifCapError {
    /// The source could not be fetched or is not a decodable GIF.
    #[error("invalid source: {0}")]
    InvalidSource(String),

    /// The GIF decoded to zero frames.
    #[error("empty animation: source decoded to zero frames")]
    EmptyAnimation,

    /// The GIF encoder (or one of its workers) failed.
    #[error("encode failure: {0}")]
    EncodeFailure(String),

    /// The encoded output is over budget and the policy rejects it.
    #[error("size budget exceeded: {0}")]
    SizeBudgetExceeded(SizeBudgetExceeded),

    /// Caller-supplied options are out of range.
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GifCapError {
    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Self::InvalidSource(msg.into())
    }

    pub fn encode_failure(msg: impl Into<String>) -> Self {
        Self::EncodeFailure(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
