use crate::config::{FileConfig, Policy};
use crate::context::InvocationContext;
use crate::error::{AdapterError, Result};
use crate::event::FromEvent;
use crate::handler::Handler;
use crate::normalize::normalize;
use crate::output;
use crate::response::{CanonicalResponse, Outcome};
use clap::Parser;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fnwrap", version, about = "Invoke a function with a context and an event")]
pub struct Args {
    /// Invocation context as a JSON object
    pub context: String,

    /// Event payload as JSON
    pub event: String,

    /// Output framing: framed, plain
    #[arg(long, env = "FNWRAP_FRAMING")]
    pub framing: Option<String>,

    /// Line printed before the response
    #[arg(long, env = "START_DELIMITER")]
    pub start_delimiter: Option<String>,

    /// Line printed after the response
    #[arg(long, env = "END_DELIMITER")]
    pub end_delimiter: Option<String>,

    /// Status code for byte results: 200 or 202
    #[arg(long, env = "FNWRAP_BYTES_STATUS")]
    pub bytes_status: Option<u16>,

    /// Whether failed responses keep their body: include, suppress
    #[arg(long, env = "FNWRAP_ERROR_BODY")]
    pub error_body: Option<String>,

    /// How to treat 1xx/3xx codes: success, error
    #[arg(long, env = "FNWRAP_UNCLASSIFIED")]
    pub unclassified: Option<String>,

    /// Settings file (defaults to ./fnwrap.toml)
    #[arg(long, env = "FNWRAP_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn policy(&self) -> Result<Policy> {
        let overrides = FileConfig {
            framing: self.framing.clone(),
            start_delimiter: self.start_delimiter.clone(),
            end_delimiter: self.end_delimiter.clone(),
            bytes_status: self.bytes_status,
            error_body: self.error_body.clone(),
            unclassified: self.unclassified.clone(),
            error_prefix: None,
        };
        Policy::resolve(overrides, FileConfig::load(self.config.as_deref()))
    }
}

/// Decode the inputs, call the handler and normalize what it returns.
///
/// Malformed inputs fail before the handler runs. A handler error or panic
/// becomes a 500 failure outcome rather than an `Err`.
pub async fn invoke<H: Handler>(
    handler: &H,
    context: &str,
    event: &str,
    policy: &Policy,
) -> Result<Outcome> {
    let event = H::Event::from_event(event)?;
    let ctx = InvocationContext::from_json(context)?;
    tracing::debug!(
        request_id = ctx.request_id(),
        function = ctx.function_name(),
        "invoking handler"
    );

    // A handler may panic while building its future as well as while running it.
    let failure = match panic::catch_unwind(AssertUnwindSafe(|| handler.call(ctx, event))) {
        Err(payload) => panic_message(payload),
        Ok(fut) => match tokio::spawn(fut).await {
            Ok(Ok(result)) => return normalize(result.into(), policy).await,
            Ok(Err(e)) => format!("{e:#}"),
            Err(e) if e.is_panic() => panic_message(e.into_panic()),
            Err(e) => e.to_string(),
        },
    };

    tracing::warn!("Handler failed: {}", failure);
    Ok(Outcome::Failure {
        response: CanonicalResponse::new(Some(failure.clone()), 500),
        error: AdapterError::Handler(failure),
    })
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic".to_string()
    }
}

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env("FNWRAP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point for a wrapped function binary: read the two arguments, run
/// the handler and print the response. Exits with status 1 on failure.
pub async fn run<H: Handler>(handler: H) {
    init_logging();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            output::print_error(&AdapterError::Usage(e.to_string()).to_string());
            std::process::exit(1);
        }
    };

    let policy = match args.policy() {
        Ok(policy) => policy,
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let result = match invoke(&handler, &args.context, &args.event, &policy).await {
        Ok(outcome) => {
            let written = output::emit(&outcome, &policy, &mut stdout.lock(), &mut stderr.lock());
            written.map(|_| outcome.is_success())
        }
        Err(e) => output::emit_failure(&e, &policy, &mut stderr.lock()).map(|_| false),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::print_error(&AdapterError::Io(e).to_string());
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_require_both_inputs() {
        assert!(Args::try_parse_from(["fnwrap", "{}"]).is_err());
        let args = Args::try_parse_from(["fnwrap", "{}", "\"event\""]).unwrap();
        assert_eq!(args.context, "{}");
        assert_eq!(args.event, "\"event\"");
    }

    #[test]
    fn test_args_policy_flags() {
        let args = Args::try_parse_from([
            "fnwrap",
            "{}",
            "{}",
            "--framing",
            "plain",
            "--bytes-status",
            "200",
            "--config",
            "/nonexistent/fnwrap.toml",
        ])
        .unwrap();
        let policy = args.policy().unwrap();
        assert_eq!(policy.framing, crate::config::Framing::Plain);
        assert_eq!(policy.bytes_status, 200);
    }

    #[test]
    fn test_panic_message() {
        assert_eq!(panic_message(Box::new("boom")), "panic: boom");
        assert_eq!(panic_message(Box::new(String::from("bang"))), "panic: bang");
        assert_eq!(panic_message(Box::new(7u8)), "panic");
    }
}
