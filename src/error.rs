use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by fingerprinting, digesting and input acquisition
#[derive(Debug, Error)]
pub enum DomHashError {
    /// Malformed source handed to traversal or a degenerate digest input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unrecognized digest or similarity-metric selector
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Unrecognized output format selector
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// A required backend is not compiled into this build
    #[error("Environment unavailable: {0}")]
    EnvironmentUnavailable(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failure or non-success status
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Headless browser launch, navigation or evaluation failure
    #[error("Browser operation failed: {0}")]
    BrowserFailed(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DomHashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DomHashError::UnsupportedAlgorithm("md5".to_string());
        assert_eq!(err.to_string(), "Unsupported algorithm: md5");

        let err = DomHashError::InvalidInput("element without tag name".to_string());
        assert_eq!(err.to_string(), "Invalid input: element without tag name");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: DomHashError = parse.unwrap_err().into();
        assert!(matches!(err, DomHashError::Json(_)));
    }
}
