//! Run a serverless function handler from the command line.
//!
//! The platform starts the function binary with two arguments, the
//! invocation context and the event, both as JSON. `fnwrap` decodes them,
//! calls the handler and prints whatever it returns as a canonical
//! `{body, statusCode, headers}` response between two delimiter lines.
//!
//! ```no_run
//! use fnwrap::{InvocationContext, Json, handler_fn};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Input {
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     fnwrap::run(handler_fn(|ctx: InvocationContext, Json(input): Json<Input>| async move {
//!         anyhow::Ok(format!("Hello {} from {}", input.name, ctx.function_name()))
//!     }))
//!     .await;
//! }
//! ```

pub mod coerce;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod event;
pub mod handler;
pub mod normalize;
pub mod output;
pub mod response;

pub use config::Policy;
pub use context::InvocationContext;
pub use driver::{invoke, run};
pub use error::{AdapterError, Result};
pub use event::{FromEvent, Json};
pub use handler::{Handler, event_fn, handler_fn};
pub use normalize::normalize;
pub use response::{CanonicalResponse, HandlerResult, Outcome};
