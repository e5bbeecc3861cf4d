use fnwrap::{InvocationContext, Json, handler_fn};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    content_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Response {
    body: String,
    status_code: String,
    headers: ResponseHeaders,
}

fn response(code: u16, body: String) -> Json<Response> {
    Json(Response {
        body,
        status_code: code.to_string(),
        headers: ResponseHeaders {
            content_type: "text/html".to_string(),
        },
    })
}

/// Echo the context and event back, or fail with a 500 if the event is not JSON.
async fn echo(ctx: InvocationContext, event: Vec<u8>) -> anyhow::Result<Json<Response>> {
    if let Err(e) = serde_json::from_slice::<Value>(&event) {
        return Ok(response(500, format!("Error unmarshaling from JSON: {e}")));
    }
    let ctx_json = serde_json::to_string(&ctx)?;
    Ok(response(
        200,
        format!(
            "Executed successfully with ctx: {}, event: {}",
            ctx_json,
            String::from_utf8_lossy(&event)
        ),
    ))
}

#[tokio::main]
async fn main() {
    fnwrap::run(handler_fn(echo)).await;
}
