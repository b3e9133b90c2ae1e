//! Error types for regsurface.

use thiserror::Error;

/// Result type alias for regsurface operations.
pub type Result<T> = std::result::Result<T, RegSurfaceError>;

/// Errors that can occur while generating, rendering or exporting datasets.
#[derive(Error, Debug)]
pub enum RegSurfaceError {
    /// The generator was configured with an unusable grid.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// An error occurred during plotting.
    #[error("Plotting error: {0}")]
    PlottingError(String),
    /// An IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// A serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for RegSurfaceError {
    fn from(err: std::io::Error) -> Self {
        RegSurfaceError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for RegSurfaceError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            RegSurfaceError::IoError(err.to_string())
        } else {
            RegSurfaceError::SerializationError(err.to_string())
        }
    }
}
