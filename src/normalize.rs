use crate::coerce::{coerce_to_int, coerce_to_string};
use crate::config::{DEFAULT_STATUS, Policy, Unclassified};
use crate::error::{AdapterError, Result};
use crate::response::{CanonicalResponse, Classification, HandlerResult, Outcome, classify};
use reqwest::header::HeaderMap;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Normalize a handler result.
///
/// `Err` means the invocation cannot produce a response at all (unreadable
/// body, unencodable value). A response with an error status is still `Ok`,
/// as [`Outcome::Failure`].
pub async fn normalize(result: HandlerResult, policy: &Policy) -> Result<Outcome> {
    let response = match result {
        HandlerResult::Empty => return Ok(Outcome::Success(CanonicalResponse::default())),
        HandlerResult::Bytes(bytes) => {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Ok(Outcome::Success(CanonicalResponse::new(
                Some(body),
                policy.bytes_status,
            )));
        }
        HandlerResult::Text(text) => {
            return Ok(Outcome::Success(CanonicalResponse::new(
                Some(text),
                DEFAULT_STATUS,
            )));
        }
        HandlerResult::Http(resp) => from_http(resp).await?,
        HandlerResult::Structured(value) => {
            let encoded = value.to_json().map_err(AdapterError::Encoding)?;
            from_structured(&encoded)?
        }
    };
    Ok(classify_response(response, policy))
}

// The response is consumed here, so its body stream is released however
// this returns.
async fn from_http(resp: reqwest::Response) -> Result<CanonicalResponse> {
    let status = resp.status().as_u16();
    let headers = flatten_headers(resp.headers());
    let body = resp.text().await.map_err(AdapterError::BodyRead)?;
    Ok(CanonicalResponse {
        body: Some(body),
        status_code: status,
        headers,
    })
}

/// Collapse repeated header values into one comma separated string, keyed by
/// the canonical name (`content-type` becomes `Content-Type`).
pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (canonical_header_name(name.as_str()), joined)
        })
        .collect()
}

fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn from_structured(encoded: &str) -> Result<CanonicalResponse> {
    let map: Map<String, Value> = serde_json::from_str(encoded).map_err(AdapterError::Decoding)?;

    let mut response = CanonicalResponse::new(Some(encoded.to_string()), DEFAULT_STATUS);

    if let Some(body) = map.get("body") {
        response.body = match body {
            Value::Null => None,
            other => Some(coerce_to_string(other)),
        };
    }

    if let Some(value) = map.get("statusCode") {
        match coerce_to_int(value) {
            Ok(code) => match u16::try_from(code) {
                Ok(code) if (100..600).contains(&code) => response.status_code = code,
                _ => tracing::warn!("Handling response: statusCode {} is out of range", code),
            },
            Err(e) => tracing::warn!("Handling response: statusCode {}: {}", value, e),
        }
    }

    if let Some(headers) = map.get("headers") {
        response.headers = structured_headers(headers)?;
    }

    Ok(response)
}

fn structured_headers(headers: &Value) -> Result<BTreeMap<String, String>> {
    match headers {
        Value::String(raw) => serde_json::from_str(raw).map_err(AdapterError::HeaderDecoding),
        Value::Object(entries) => Ok(entries
            .iter()
            .filter_map(|(name, value)| match value {
                Value::String(s) => Some((name.clone(), s.clone())),
                other => {
                    tracing::warn!(
                        "Handling response: Header value is not a string: {} {}",
                        name,
                        other
                    );
                    None
                }
            })
            .collect()),
        other => {
            tracing::warn!("Handling response: Unhandled type for headers: {}", other);
            Ok(BTreeMap::new())
        }
    }
}

fn classify_response(response: CanonicalResponse, policy: &Policy) -> Outcome {
    let failed = match classify(response.status_code) {
        Classification::Success => false,
        Classification::Error => true,
        Classification::Unclassified => {
            tracing::warn!(
                "Status code {} is neither success nor error, treating as {:?}",
                response.status_code,
                policy.unclassified
            );
            policy.unclassified == Unclassified::Error
        }
    };
    if failed {
        let error = AdapterError::status(
            response.status_code,
            response.body.clone().unwrap_or_default(),
        );
        Outcome::Failure { response, error }
    } else {
        Outcome::Success(response)
    }
}
