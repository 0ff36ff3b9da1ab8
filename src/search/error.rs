//! Error types for search operations

use crate::error::AppError;
use std::path::PathBuf;

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Archive path does not exist
    #[error("Archive not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    /// Archive exists but cannot be opened as a zip file
    #[error("Archive unreadable ({}): {reason}", .path.display())]
    ArchiveUnreadable { path: PathBuf, reason: String },

    /// Search expression failed to compile
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<regex::Error> for SearchError {
    fn from(err: regex::Error) -> Self {
        SearchError::InvalidExpression(err.to_string())
    }
}

/// Why an archive entry produced no record.
///
/// None of these abort a scan; they are logged and counted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("entry could not be read: {0}")]
    Unreadable(String),

    #[error("malformed xml: {0}")]
    MalformedXml(String),

    #[error("missing billNumber or billType")]
    MissingIdentifier,

    #[error("no billSummaries/item/text found")]
    NoSummary,
}

impl From<quick_xml::Error> for SkipReason {
    fn from(err: quick_xml::Error) -> Self {
        SkipReason::MalformedXml(err.to_string())
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::ArchiveNotFound(path) => AppError::ArchiveNotFound(path),
            SearchError::ArchiveUnreadable { path, reason } => {
                AppError::ArchiveUnreadable { path, reason }
            }
            SearchError::InvalidExpression(msg) => AppError::InvalidExpression(msg),
            SearchError::IoError(err) => AppError::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_error_becomes_invalid_expression() {
        let err: SearchError = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, SearchError::InvalidExpression(_)));
    }

    #[test]
    fn test_search_error_maps_to_app_error() {
        let app: AppError = SearchError::ArchiveNotFound(PathBuf::from("missing.zip")).into();
        assert!(matches!(app, AppError::ArchiveNotFound(_)));

        let app: AppError = SearchError::InvalidExpression("bad".into()).into();
        assert_eq!(app.error_code(), "INVALID_EXPRESSION");
    }
}
