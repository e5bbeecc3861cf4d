use crate::config::DEFAULT_STATUS;
use crate::error::AdapterError;
use crate::event::Json;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Something that can be turned into JSON text. Implemented for every
/// `Serialize` type so handlers can return their own structs.
pub trait StructuredResult: Send {
    fn to_json(&self) -> serde_json::Result<String>;
}

impl<T: Serialize + Send> StructuredResult for T {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Everything a handler is allowed to return.
pub enum HandlerResult {
    Empty,
    Bytes(Vec<u8>),
    Text(String),
    Http(reqwest::Response),
    Structured(Box<dyn StructuredResult>),
}

impl HandlerResult {
    pub fn structured<T: Serialize + Send + 'static>(value: T) -> Self {
        Self::Structured(Box::new(value))
    }
}

impl fmt::Debug for HandlerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Http(r) => f.debug_tuple("Http").field(&r.status()).finish(),
            Self::Structured(_) => f.write_str("Structured(..)"),
        }
    }
}

impl From<()> for HandlerResult {
    fn from(_: ()) -> Self {
        Self::Empty
    }
}

impl From<Vec<u8>> for HandlerResult {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<String> for HandlerResult {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&'static str> for HandlerResult {
    fn from(text: &'static str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<reqwest::Response> for HandlerResult {
    fn from(resp: reqwest::Response) -> Self {
        Self::Http(resp)
    }
}

impl From<Value> for HandlerResult {
    fn from(value: Value) -> Self {
        Self::structured(value)
    }
}

impl<T: Serialize + Send + 'static> From<Json<T>> for HandlerResult {
    fn from(Json(value): Json<T>) -> Self {
        Self::structured(value)
    }
}

impl<T: Into<HandlerResult>> From<Option<T>> for HandlerResult {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// The normalized response handed back to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub status_code: u16,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl CanonicalResponse {
    pub fn new(body: Option<String>, status_code: u16) -> Self {
        Self {
            body,
            status_code,
            headers: BTreeMap::new(),
        }
    }
}

impl Default for CanonicalResponse {
    fn default() -> Self {
        Self::new(None, DEFAULT_STATUS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    Error,
    Unclassified,
}

pub fn is_success_status(code: u16) -> bool {
    (200..300).contains(&code)
}

pub fn is_error_status(code: u16) -> bool {
    (400..600).contains(&code)
}

pub fn classify(code: u16) -> Classification {
    if is_success_status(code) {
        Classification::Success
    } else if is_error_status(code) {
        Classification::Error
    } else {
        Classification::Unclassified
    }
}

/// Result of normalization. A failure still carries the response so its
/// body can be shown to the operator.
#[derive(Debug)]
pub enum Outcome {
    Success(CanonicalResponse),
    Failure {
        response: CanonicalResponse,
        error: AdapterError,
    },
}

impl Outcome {
    pub fn response(&self) -> &CanonicalResponse {
        match self {
            Self::Success(response) | Self::Failure { response, .. } => response,
        }
    }

    pub fn error(&self) -> Option<&AdapterError> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
