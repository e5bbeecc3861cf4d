use crate::config::{ErrorBody, Framing, Policy};
use crate::error::AdapterError;
use crate::response::{CanonicalResponse, Outcome};
use std::io::{self, Write};

/// The response as it will be shown, after the error body policy is applied.
pub fn visible_response(outcome: &Outcome, policy: &Policy) -> CanonicalResponse {
    let mut response = outcome.response().clone();
    if !outcome.is_success() && policy.error_body == ErrorBody::Suppress {
        response.body = None;
    }
    response
}

/// Write an outcome according to the policy. The response goes to `out`;
/// a failure also gets a prefixed line on `err`.
pub fn emit<O: Write, E: Write>(
    outcome: &Outcome,
    policy: &Policy,
    out: &mut O,
    err: &mut E,
) -> io::Result<()> {
    match &policy.framing {
        Framing::Delimited { start, end } => {
            let response = visible_response(outcome, policy);
            let json = serde_json::to_string_pretty(&response).map_err(io::Error::other)?;
            writeln!(out, "{start}")?;
            writeln!(out, "{json}")?;
            writeln!(out, "{end}")?;
        }
        Framing::Plain => {
            if outcome.is_success() {
                writeln!(out, "{}", outcome.response().body.as_deref().unwrap_or_default())?;
            }
        }
    }
    if let Some(error) = outcome.error() {
        emit_failure(error, policy, err)?;
    }
    out.flush()
}

/// Report an error on the error channel with the configured prefix.
pub fn emit_failure<E: Write>(error: &AdapterError, policy: &Policy, err: &mut E) -> io::Result<()> {
    writeln!(err, "{}{}", policy.error_prefix, error)?;
    err.flush()
}

pub fn print_error(msg: &str) {
    use colored::Colorize;
    eprintln!("{}", msg.red());
}
