//! # Hermes Telemetry
//!
//! Structured logging for Hermes, built on `tracing` and
//! `tracing-subscriber`.
//!
//! ```rust,ignore
//! use hermes_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::debug!(handler = "getUser", "resolving arguments");
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

/// Result type alias using [`TelemetryError`].
pub type TelemetryResult<T> = Result<T, TelemetryError>;
