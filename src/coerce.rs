use crate::error::CoerceError;
use serde_json::Value;
use std::num::IntErrorKind;

/// Coerce a dynamic value to an integer.
///
/// Integers are taken as-is, floats are truncated toward zero and numeric
/// strings are parsed. Unsigned values that do not fit an `i64` are rejected
/// with [`CoerceError::Overflow`] instead of wrapping.
pub fn coerce_to_int(value: &Value) -> Result<i64, CoerceError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                Err(CoerceError::Overflow)
            } else {
                let f = n.as_f64().ok_or(CoerceError::NotConvertible)?;
                float_to_int(f)
            }
        }
        Value::String(s) => s.parse::<i64>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoerceError::Overflow,
            _ => CoerceError::NotConvertible,
        }),
        _ => Err(CoerceError::NotConvertible),
    }
}

fn float_to_int(f: f64) -> Result<i64, CoerceError> {
    let truncated = f.trunc();
    if !truncated.is_finite() {
        return Err(CoerceError::NotConvertible);
    }
    // i64::MAX is not representable as f64; 2^63 is the first value past it
    if truncated >= 9_223_372_036_854_775_808.0 || truncated < i64::MIN as f64 {
        return Err(CoerceError::Overflow);
    }
    Ok(truncated as i64)
}

/// Render a value as display text: strings unchanged, everything else as
/// JSON. Returns an empty string if encoding fails.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
