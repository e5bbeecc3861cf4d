//! End to end invocations through the library API.

use fnwrap::{AdapterError, HandlerResult, InvocationContext, Json, Outcome, Policy, event_fn, handler_fn, invoke};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const CONTEXT: &str = r#"{"activation_id":"a1","function_name":"/ns/test","namespace":"ns","request_id":"r1"}"#;

#[derive(Debug, Deserialize, Serialize)]
struct CustomInput {
    text: String,
    boolean: bool,
    integer: i64,
}

#[tokio::test]
async fn test_context_reaches_handler() {
    let handler = handler_fn(|ctx: InvocationContext, _: ()| async move {
        anyhow::Ok(format!("{}:{}", ctx.namespace(), ctx.request_id()))
    });
    let outcome = invoke(&handler, CONTEXT, "{}", &Policy::default()).await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.response().body.as_deref(), Some("ns:r1"));
    assert_eq!(outcome.response().status_code, 202);
}

#[tokio::test]
async fn test_typed_event_structured_result() {
    let handler = event_fn(|Json(input): Json<CustomInput>| async move {
        anyhow::Ok(json!({
            "body": format!("{} {} {}", input.text, input.boolean, input.integer),
            "statusCode": "200",
            "headers": {"Content-Type": "text/html"}
        }))
    });
    let outcome = invoke(
        &handler,
        CONTEXT,
        r#"{"text":"hi","boolean":true,"integer":7}"#,
        &Policy::default(),
    )
    .await
    .unwrap();
    let resp = outcome.response();
    assert!(outcome.is_success());
    assert_eq!(resp.body.as_deref(), Some("hi true 7"));
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.headers.get("Content-Type").map(String::as_str), Some("text/html"));
}

#[tokio::test]
async fn test_bytes_event_is_not_parsed() {
    let handler = event_fn(|raw: Vec<u8>| async move { anyhow::Ok(raw) });
    let outcome = invoke(&handler, CONTEXT, "not json at all", &Policy::default())
        .await
        .unwrap();
    assert_eq!(outcome.response().body.as_deref(), Some("not json at all"));
}

#[tokio::test]
async fn test_invalid_event_aborts_before_handler() {
    let handler = event_fn(|_: Json<CustomInput>| async move {
        if true {
            panic!("handler must not run");
        }
        anyhow::Ok(())
    });
    let err = invoke(&handler, CONTEXT, r#"{"text": 1}"#, &Policy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::InvalidEvent(_)));
}

#[tokio::test]
async fn test_invalid_context_aborts() {
    let handler = event_fn(|_: Value| async move { anyhow::Ok(()) });
    let err = invoke(&handler, "[]", "{}", &Policy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::InvalidContext(_)));
}

#[tokio::test]
async fn test_handler_error_becomes_500() {
    let handler = event_fn(|_: ()| async move {
        Err::<String, _>(anyhow::anyhow!("database unavailable"))
    });
    let outcome = invoke(&handler, CONTEXT, "{}", &Policy::default()).await.unwrap();
    match outcome {
        Outcome::Failure { response, error } => {
            assert_eq!(response.status_code, 500);
            assert_eq!(response.body.as_deref(), Some("database unavailable"));
            assert!(matches!(error, AdapterError::Handler(_)));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handler_panic_becomes_500() {
    let handler = event_fn(|_: ()| async move {
        if true {
            panic!("boom");
        }
        anyhow::Ok(())
    });
    let outcome = invoke(&handler, CONTEXT, "{}", &Policy::default()).await.unwrap();
    assert_eq!(outcome.response().status_code, 500);
    assert_eq!(outcome.response().body.as_deref(), Some("panic: boom"));
}

#[tokio::test]
async fn test_handler_panic_before_future_becomes_500() {
    let handler = handler_fn(|_: InvocationContext, event: Value| {
        let n = event["n"].as_u64().expect("n required");
        async move { anyhow::Ok(n.to_string()) }
    });
    let outcome = invoke(&handler, CONTEXT, "{}", &Policy::default()).await.unwrap();
    match outcome {
        Outcome::Failure { response, error } => {
            assert_eq!(response.status_code, 500);
            assert_eq!(response.body.as_deref(), Some("panic: n required"));
            assert!(matches!(error, AdapterError::Handler(_)));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_optional_result() {
    let handler = event_fn(|_: ()| async move { anyhow::Ok(None::<String>) });
    let outcome = invoke(&handler, CONTEXT, "{}", &Policy::default()).await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.response().body, None);
    assert_eq!(outcome.response().status_code, 202);
}

#[tokio::test]
async fn test_transport_response_result() {
    let handler = event_fn(|_: ()| async move {
        let resp: reqwest::Response = http::Response::builder()
            .status(404)
            .body("not found")
            .unwrap()
            .into();
        anyhow::Ok(HandlerResult::from(resp))
    });
    let outcome = invoke(&handler, CONTEXT, "{}", &Policy::default()).await.unwrap();
    assert!(!outcome.is_success());
    assert_eq!(outcome.error().map(ToString::to_string).as_deref(), Some("not found"));
}
