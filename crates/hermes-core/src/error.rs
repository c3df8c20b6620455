//! Binding error types.
//!
//! [`BindingError`] is the single error surfaced by argument resolution.
//! Every variant maps to an HTTP status code and a stable error code so the
//! transport layer can turn it into an error envelope.
//!
//! | Variant | Status | Code |
//! |---------|--------|------|
//! | `MissingRequiredParameter` | 400 | `MISSING_PARAMETER` |
//! | `CoercionFailure` | 400 | `INVALID_PARAMETER` |
//! | `ModelBindingFailure` | 422 | `MODEL_BINDING_FAILED` |
//! | `UnsupportedBodyType` | 415 | `UNSUPPORTED_BODY_TYPE` |
//! | `MalformedBody` | 400 | `MALFORMED_BODY` |
//! | `PayloadTooLarge` | 413 | `PAYLOAD_TOO_LARGE` |

use http::StatusCode;
use thiserror::Error;

use crate::signature::ParamSource;
use crate::types::ScalarKind;

/// Result type alias using [`BindingError`].
pub type BindingResult<T> = Result<T, BindingError>;

/// Error raised while resolving handler arguments.
///
/// # Example
///
/// ```
/// use hermes_core::{BindingError, ParamSource};
/// use http::StatusCode;
///
/// let err = BindingError::missing(ParamSource::Query, "name");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.error_code(), "MISSING_PARAMETER");
/// assert!(err.to_string().contains("name"));
/// ```
#[derive(Error, Debug)]
pub enum BindingError {
    /// A required parameter had no usable value after defaulting.
    #[error("missing required {location} parameter: {name}")]
    MissingRequiredParameter {
        /// Parameter name.
        name: String,
        /// Source the parameter was read from.
        location: ParamSource,
    },

    /// Text could not be parsed as the declared scalar type.
    #[error("invalid value '{raw}' for parameter '{name}': expected {target} ({reason})")]
    CoercionFailure {
        /// Parameter or query key name.
        name: String,
        /// The offending text.
        raw: String,
        /// The declared scalar kind.
        target: ScalarKind,
        /// Parser message.
        reason: String,
    },

    /// Structural binding of a model failed.
    #[error("failed to bind model '{target}': {cause}")]
    ModelBindingFailure {
        /// Structured type name.
        target: String,
        /// The error raised while binding an attribute.
        #[source]
        cause: Box<BindingError>,
    },

    /// The body cannot be materialized as the declared structured type.
    #[error("cannot bind request body to '{target}': {reason}")]
    UnsupportedBodyType {
        /// Structured type name.
        target: String,
        /// Why materialization failed.
        reason: String,
    },

    /// The body is not valid JSON.
    #[error("malformed request body: {reason}")]
    MalformedBody {
        /// Parser message.
        reason: String,
    },

    /// The body exceeds the configured limit.
    #[error("payload too large: max {max} bytes, got {actual} bytes")]
    PayloadTooLarge {
        /// Configured limit.
        max: usize,
        /// Actual body size.
        actual: usize,
    },
}

impl BindingError {
    /// Creates a missing-parameter error.
    #[must_use]
    pub fn missing(location: ParamSource, name: impl Into<String>) -> Self {
        Self::MissingRequiredParameter {
            name: name.into(),
            location,
        }
    }

    /// Creates a coercion error.
    #[must_use]
    pub fn coercion(
        name: impl Into<String>,
        raw: impl Into<String>,
        target: ScalarKind,
        reason: impl Into<String>,
    ) -> Self {
        Self::CoercionFailure {
            name: name.into(),
            raw: raw.into(),
            target,
            reason: reason.into(),
        }
    }

    /// Wraps an attribute error raised while binding `target`.
    #[must_use]
    pub fn model_binding(target: impl Into<String>, cause: Self) -> Self {
        Self::ModelBindingFailure {
            target: target.into(),
            cause: Box::new(cause),
        }
    }

    /// Creates an unsupported-body error.
    #[must_use]
    pub fn unsupported_body(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedBodyType {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Creates a malformed-body error.
    #[must_use]
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        Self::MalformedBody {
            reason: reason.into(),
        }
    }

    /// Creates a payload-too-large error.
    #[must_use]
    pub fn payload_too_large(max: usize, actual: usize) -> Self {
        Self::PayloadTooLarge { max, actual }
    }

    /// Returns the parameter name, for errors tied to one parameter.
    #[must_use]
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredParameter { name, .. } | Self::CoercionFailure { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingRequiredParameter { .. }
            | Self::CoercionFailure { .. }
            | Self::MalformedBody { .. } => StatusCode::BAD_REQUEST,
            Self::ModelBindingFailure { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnsupportedBodyType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRequiredParameter { .. } => "MISSING_PARAMETER",
            Self::CoercionFailure { .. } => "INVALID_PARAMETER",
            Self::ModelBindingFailure { .. } => "MODEL_BINDING_FAILED",
            Self::UnsupportedBodyType { .. } => "UNSUPPORTED_BODY_TYPE",
            Self::MalformedBody { .. } => "MALFORMED_BODY",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}
