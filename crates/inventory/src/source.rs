//! Resource reading: locate and parse the raw inventory configuration.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Parsed-but-untyped configuration: resource keys to arbitrary values.
pub type RawConfig = serde_json::Map<String, serde_json::Value>;

/// Failures at the resource boundary, before any decoding.
///
/// Missing and unparsable resources signal distinctly so the caller can give
/// different feedback (or decide only one of them is fatal).
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The named resource does not exist.
    #[error("resource not found: {0}")]
    NotFound(PathBuf),

    /// The resource exists but could not be read as a key/value mapping.
    #[error("resource corrupt: {0}")]
    Corrupt(String),
}

/// Provider of parsed configuration data.
///
/// Injected into the startup path so decoding is testable without a file
/// system or resource manager behind it.
pub trait ConfigSource {
    fn read(&self) -> Result<RawConfig, ResourceError>;
}

/// Reads a JSON resource file from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for JsonFileSource {
    fn read(&self) -> Result<RawConfig, ResourceError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound(self.path.clone()),
            _ => ResourceError::Corrupt(e.to_string()),
        })?;

        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| ResourceError::Corrupt(e.to_string()))?;

        match value {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(ResourceError::Corrupt(
                "top-level value is not a key/value mapping".to_string(),
            )),
        }
    }
}
