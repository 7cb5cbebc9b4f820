//! Error types for Snippetropolis.

use thiserror::Error;

/// Library-level error type for Snippetropolis operations.
#[derive(Error, Debug)]
pub enum SnipError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Coarse classification used by callers that only care about the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad local input, detected before any request is sent.
    Validation,
    /// The service does not know the referenced index, video or task.
    NotFound,
    /// Authentication, quota, transport or response failures.
    Service,
    /// Missing or malformed credential or configuration.
    Configuration,
}

impl SnipError {
    /// Build a validation error for the named field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        SnipError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SnipError::Validation { .. } => ErrorKind::Validation,
            SnipError::NotFound(_) => ErrorKind::NotFound,
            SnipError::Service(_) | SnipError::Http(_) | SnipError::Json(_) => ErrorKind::Service,
            SnipError::Config(_) | SnipError::Io(_) | SnipError::TomlParse(_) => {
                ErrorKind::Configuration
            }
        }
    }
}

/// Result type alias for Snippetropolis operations.
pub type Result<T> = std::result::Result<T, SnipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = SnipError::validation("path", "file not found: missing.mp4");
        assert_eq!(err.to_string(), "Invalid path: file not found: missing.mp4");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(SnipError::NotFound("idx".into()).kind(), ErrorKind::NotFound);
        assert_eq!(SnipError::Service("quota".into()).kind(), ErrorKind::Service);
        assert_eq!(SnipError::Config("key".into()).kind(), ErrorKind::Configuration);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(SnipError::from(json_err).kind(), ErrorKind::Service);
    }
}
