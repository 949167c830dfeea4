use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("Missing scheme in endpoint uri: {0}")]
    MissingScheme(String),

    #[error("Malformed endpoint uri {uri}: {reason}")]
    Malformed { uri: String, reason: String },
}
