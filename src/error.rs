use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the ilog logger
#[derive(Debug, Error)]
pub enum IlogError {
    // Setter errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Record errors
    #[error("Failed to format log message: a Display implementation returned an error")]
    MessageFormat,

    // Destination errors
    #[error("Failed to create log directory: {0}")]
    LogDirError(String),

    #[error("Log file error: {0}")]
    LogFileError(String),

    #[error("Failed to write to stdout destination: {0}")]
    StdoutError(String),

    // Rotation errors
    #[error("Log rotation failed: {0}")]
    LogRotationError(String),

    #[error("No free backup name for {} after {attempts} attempts", path.display())]
    RotationCollision { path: PathBuf, attempts: usize },

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // IO errors (automatically converted from std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IlogError {
    /// Whether this error comes from a filesystem or stream operation
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            IlogError::LogDirError(_)
                | IlogError::LogFileError(_)
                | IlogError::StdoutError(_)
                | IlogError::LogRotationError(_)
                | IlogError::RotationCollision { .. }
                | IlogError::Io(_)
        )
    }
}

/// Result type alias for ilog operations
pub type Result<T> = std::result::Result<T, IlogError>;
