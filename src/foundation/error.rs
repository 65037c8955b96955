use std::path::PathBuf;

/// Convenience result type used across rasterfx.
pub type RasterResult<T> = Result<T, RasterError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    /// A backing resource could not be opened or read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// Resource that failed.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// A backing resource holds fewer bytes than one full raster.
    #[error("short resource '{}': expected {expected} bytes, found {actual}", path.display())]
    ShortResource {
        /// Resource that was too short.
        path: PathBuf,
        /// Bytes required for one raster.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// Invalid configuration or caller-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RasterError {
    /// Build a [`RasterError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`RasterError::ShortResource`] value.
    pub fn short_resource(path: impl Into<PathBuf>, expected: usize, actual: usize) -> Self {
        Self::ShortResource {
            path: path.into(),
            expected,
            actual,
        }
    }

    /// Build a [`RasterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RasterError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
