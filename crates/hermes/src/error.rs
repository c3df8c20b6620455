//! Top-level error type.

use hermes_config::ConfigError;
use hermes_core::BindingError;
use hermes_telemetry::TelemetryError;
use thiserror::Error;

/// Any error raised through the [`Hermes`](crate::Hermes) entry point.
#[derive(Debug, Error)]
pub enum HermesError {
    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    /// A handler argument could not be bound.
    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl HermesError {
    /// Returns the binding error, if this is one.
    #[must_use]
    pub fn as_binding(&self) -> Option<&BindingError> {
        match self {
            Self::Binding(e) => Some(e),
            _ => None,
        }
    }
}
