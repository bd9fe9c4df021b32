use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::foundation::error::{GifCapError, GifCapResult};

/// Where GIF bytes come from. Implementations resolve a location string to the raw file.
pub trait GifSource: Send + Sync {
    fn fetch(&self, location: &str) -> GifCapResult<Vec<u8>>;
}

impl<S: GifSource + ?Sized> GifSource for &S {
    fn fetch(&self, location: &str) -> GifCapResult<Vec<u8>> {
        (**self).fetch(location)
    }
}

impl<S: GifSource + ?Sized> GifSource for Box<S> {
    fn fetch(&self, location: &str) -> GifCapResult<Vec<u8>> {
        (**self).fetch(location)
    }
}

/// Reads local paths and `file://` URLs, optionally relative to a root directory.
#[derive(Clone, Debug, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locations against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, location: &str) -> GifCapResult<PathBuf> {
        let raw = location.strip_prefix("file://").unwrap_or(location);
        if raw.is_empty() {
            return Err(GifCapError::invalid_source("empty file location"));
        }
        let path = Path::new(raw);
        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        })
    }
}

impl GifSource for FileSource {
    fn fetch(&self, location: &str) -> GifCapResult<Vec<u8>> {
        let path = self.resolve(location)?;
        std::fs::read(&path).map_err(|e| {
            GifCapError::invalid_source(format!("read '{}': {e}", path.display()))
        })
    }
}

/// Named in-memory blobs.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.blobs.insert(name.into(), bytes.into());
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl GifSource for MemorySource {
    fn fetch(&self, location: &str) -> GifCapResult<Vec<u8>> {
        self.blobs
            .get(location)
            .cloned()
            .ok_or_else(|| GifCapError::invalid_source(format!("no blob named '{location}'")))
    }
}

/// Read `reader` to the end, failing once it yields more than `max_bytes`.
///
/// Stops pulling bytes one past the limit, so an endless body costs at most `max_bytes + 1`.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub(crate) fn read_limited<R: Read>(
    reader: R,
    max_bytes: u64,
    location: &str,
) -> GifCapResult<Vec<u8>> {
    let mut body = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut body)
        .map_err(|e| GifCapError::invalid_source(format!("read {location}: {e}")))?;
    if body.len() as u64 > max_bytes {
        return Err(GifCapError::invalid_source(format!(
            "{location}: body exceeds the {max_bytes} byte download limit"
        )));
    }
    Ok(body)
}

#[cfg(feature = "http")]
pub use http::HttpSource;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use super::{GifSource, read_limited};
    use crate::foundation::error::{GifCapError, GifCapResult};

    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;

    /// Fetches `http://` and `https://` URLs with a blocking client.
    #[derive(Clone, Debug)]
    pub struct HttpSource {
        client: reqwest::blocking::Client,
        max_bytes: u64,
    }

    impl HttpSource {
        pub fn new() -> GifCapResult<Self> {
            Self::with_timeout(DEFAULT_TIMEOUT)
        }

        pub fn with_timeout(timeout: Duration) -> GifCapResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| GifCapError::Other(anyhow::anyhow!("http client: {e}")))?;
            Ok(Self {
                client,
                max_bytes: DEFAULT_MAX_BYTES,
            })
        }

        pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
            self.max_bytes = max_bytes;
            self
        }
    }

    impl GifSource for HttpSource {
        fn fetch(&self, location: &str) -> GifCapResult<Vec<u8>> {
            if !(location.starts_with("http://") || location.starts_with("https://")) {
                return Err(GifCapError::invalid_source(format!(
                    "not an http(s) url: '{location}'"
                )));
            }
            let response = self
                .client
                .get(location)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| GifCapError::invalid_source(format!("GET {location}: {e}")))?;
            if let Some(len) = response.content_length()
                && len > self.max_bytes
            {
                return Err(GifCapError::invalid_source(format!(
                    "GET {location}: {len} bytes exceeds the {} byte download limit",
                    self.max_bytes
                )));
            }
            // Content-Length is advisory; chunked bodies are capped while streaming.
            let body = read_limited(response, self.max_bytes, &format!("GET {location}"))?;
            tracing::debug!(url = location, bytes = body.len(), "fetched gif");
            Ok(body)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/source.rs"]
mod tests;
