use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Archive path does not exist
    #[error("Archive not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    /// Archive exists but is not a readable zip file
    #[error("Archive unreadable ({}): {reason}", .path.display())]
    ArchiveUnreadable { path: PathBuf, reason: String },

    /// Search expression failed to compile
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::ArchiveNotFound(_) => 1,
            AppError::ArchiveUnreadable { .. } => 1,
            AppError::InvalidExpression(_) => 2,
            AppError::Configuration(_) => 3,
            AppError::Io(_) => 1,
            AppError::Serialization(_) => 1,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::ArchiveNotFound(_) => "ARCHIVE_NOT_FOUND",
            AppError::ArchiveUnreadable { .. } => "ARCHIVE_UNREADABLE",
            AppError::InvalidExpression(_) => "INVALID_EXPRESSION",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Message shown to the user on stderr
    pub fn user_message(&self) -> String {
        match self {
            AppError::ArchiveNotFound(_) | AppError::ArchiveUnreadable { .. } => {
                "File not found. Please specify a valid path to the data source.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<&AppError> for ExitCode {
    fn from(err: &AppError) -> Self {
        ExitCode::from(err.exit_code())
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
