//! Text to scalar coercion.
//!
//! | Input | `String` | numeric / `bool` | `Unsupported` |
//! |-------|----------|------------------|---------------|
//! | blank | verbatim | zero value | absent |
//! | well-formed | verbatim | parsed value | absent |
//! | malformed | verbatim | [`CoercionError`] | absent |
//!
//! Nullable and non-nullable kinds follow the same table. Text is parsed as
//! given; surrounding whitespace makes a numeric value malformed.

use std::str::FromStr;

use hermes_core::{is_blank, BindingError, ScalarKind, Value};
use thiserror::Error;

/// Text that could not be parsed as the requested scalar kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{raw}' to {target}: {reason}")]
pub struct CoercionError {
    /// The offending text.
    pub raw: String,
    /// The requested kind.
    pub target: ScalarKind,
    /// Parser message.
    pub reason: String,
}

impl CoercionError {
    /// Attaches the parameter or query key name the text came from.
    #[must_use]
    pub fn into_binding(self, name: impl Into<String>) -> BindingError {
        BindingError::coercion(name, self.raw, self.target, self.reason)
    }
}

/// Converts `raw` into a value of `kind`.
///
/// # Errors
///
/// Returns [`CoercionError`] when non-blank text is not a valid literal of a
/// numeric or boolean kind.
///
/// # Example
///
/// ```rust
/// use hermes_core::{ScalarKind, Value};
/// use hermes_extract::coerce;
///
/// assert_eq!(coerce(&ScalarKind::Int, "42"), Ok(Value::Int(42)));
/// assert_eq!(coerce(&ScalarKind::Int, ""), Ok(Value::Int(0)));
/// assert!(coerce(&ScalarKind::Int, "abc").is_err());
/// assert_eq!(coerce(&ScalarKind::String, " x "), Ok(Value::Str(" x ".into())));
/// ```
pub fn coerce(kind: &ScalarKind, raw: &str) -> Result<Value<'static>, CoercionError> {
    match kind {
        ScalarKind::String => return Ok(Value::Str(raw.to_string())),
        ScalarKind::Unsupported(_) => return Ok(Value::Absent),
        _ if is_blank(raw) => return Ok(kind.zero_value()),
        _ => {}
    }

    match kind {
        ScalarKind::Int => parse(kind, raw).map(Value::Int),
        ScalarKind::Long => parse(kind, raw).map(Value::Long),
        ScalarKind::Double => parse(kind, raw).map(Value::Double),
        ScalarKind::Float => parse(kind, raw).map(Value::Float),
        ScalarKind::Byte => parse(kind, raw).map(Value::Byte),
        ScalarKind::Bool => parse_bool(raw).map(Value::Bool),
        ScalarKind::String | ScalarKind::Unsupported(_) => Ok(kind.zero_value()),
    }
}

fn parse<T>(kind: &ScalarKind, raw: &str) -> Result<T, CoercionError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| CoercionError {
        raw: raw.to_string(),
        target: kind.clone(),
        reason: e.to_string(),
    })
}

fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(CoercionError {
            raw: raw.to_string(),
            target: ScalarKind::Bool,
            reason: "expected 'true' or 'false'".to_string(),
        })
    }
}
