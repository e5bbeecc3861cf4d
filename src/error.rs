use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Usage: {0}")]
    Usage(String),

    #[error("Invalid context argument: {0}")]
    InvalidContext(#[source] serde_json::Error),

    #[error("Invalid event argument: {0}")]
    InvalidEvent(#[source] serde_json::Error),

    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("Failed to encode handler result: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Failed to decode handler result: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("Failed to decode headers: {0}")]
    HeaderDecoding(#[source] serde_json::Error),

    #[error("Handler failed: {0}")]
    Handler(String),

    #[error("{body}")]
    Status { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdapterError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

/// Failure to turn a dynamic value into an integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoerceError {
    #[error("value is not convertible to int")]
    NotConvertible,

    #[error("value is too large for int type")]
    Overflow,
}

pub type Result<T> = std::result::Result<T, AdapterError>;
