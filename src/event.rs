use crate::error::{AdapterError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Input types a handler may declare for its event.
pub trait FromEvent: Sized {
    fn from_event(raw: &str) -> Result<Self>;
}

/// Raw bytes: the argument is passed through untouched, no JSON parsing.
impl FromEvent for Vec<u8> {
    fn from_event(raw: &str) -> Result<Self> {
        Ok(raw.as_bytes().to_vec())
    }
}

impl FromEvent for Value {
    fn from_event(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(AdapterError::InvalidEvent)
    }
}

/// Handlers that take no event.
impl FromEvent for () {
    fn from_event(_raw: &str) -> Result<Self> {
        Ok(())
    }
}

/// Typed JSON wrapper.
///
/// As an event it deserializes the argument into `T`; as a handler result it
/// marks `T` as a structured value to be normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: DeserializeOwned> FromEvent for Json<T> {
    fn from_event(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map(Json)
            .map_err(AdapterError::InvalidEvent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct CustomInput {
        text: String,
        boolean: bool,
        integer: i32,
    }

    #[test]
    fn test_bytes_are_verbatim() {
        let raw = r#"{ "not": "parsed" "#;
        assert_eq!(Vec::<u8>::from_event(raw).unwrap(), raw.as_bytes());
    }

    #[test]
    fn test_typed_event() {
        let Json(input) =
            Json::<CustomInput>::from_event(r#"{"text":"hi","boolean":true,"integer":3}"#).unwrap();
        assert_eq!(
            input,
            CustomInput {
                text: "hi".into(),
                boolean: true,
                integer: 3
            }
        );
    }

    #[test]
    fn test_typed_event_mismatch() {
        let err = Json::<CustomInput>::from_event(r#"{"text": 1}"#).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidEvent(_)));
    }

    #[test]
    fn test_value_event_rejects_malformed_json() {
        assert!(Value::from_event("{").is_err());
        assert_eq!(Value::from_event("[1]").unwrap(), serde_json::json!([1]));
    }

    #[test]
    fn test_unit_event_ignores_input() {
        assert!(<()>::from_event("garbage").is_ok());
    }
}
