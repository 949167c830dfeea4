use flyq_uri::UriError;
use thiserror::Error;

/// Construction-time failure. Raised before any endpoint is handed out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Topic must be configured on endpoint using syntax scheme:topic")]
    MissingTopic,

    #[error("Unknown option: {option}")]
    UnknownOption { option: String },

    #[error("Invalid value for option {option}: expected {expected}, found {found}")]
    InvalidValue {
        option: String,
        expected: &'static str,
        found: String,
    },

    #[error("Scheme mismatch expected: {expected} found: {found}")]
    SchemeMismatch { expected: String, found: String },

    #[error("Invalid endpoint uri: {0}")]
    InvalidUri(#[from] UriError),
}

impl ConfigurationError {
    pub(crate) fn invalid(option: &str, expected: &'static str, found: impl ToString) -> Self {
        ConfigurationError::InvalidValue {
            option: option.to_string(),
            expected,
            found: found.to_string(),
        }
    }
}
