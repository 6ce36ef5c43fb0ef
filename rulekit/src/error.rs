//! Error types for rulekit

use std::path::PathBuf;
use thiserror::Error;

/// rulekit error type
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was absent or empty
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Referenced rule, purpose or template does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Argument present but unusable (e.g. a purpose name with path separators)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Recursive copy into a destination failed
    #[error("Failed to copy into {}: {}", .path.display(), .message)]
    CopyFailure {
        /// Destination that was being written
        path: PathBuf,
        /// Underlying error message
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML error (config files, front matter)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for rulekit operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::Config(format!("Invalid glob pattern: {}", err))
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}
