//! Typed configuration for Hermes.
//!
//! - TOML and JSON configuration files
//! - `.env` files and `PREFIX__SECTION__KEY` environment overrides
//! - Strict parsing (unknown fields are rejected)
//!
//! # Example
//!
//! ```no_run
//! use hermes_config::ConfigLoader;
//!
//! # fn main() -> Result<(), hermes_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("hermes.toml")?
//!     .with_env_prefix("HERMES")
//!     .load()?;
//!
//! println!("bodies are capped at {} bytes", config.binding.max_body_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [binding]
//! version_marker = "serial_version_uid"
//! max_body_size = 2097152
//! trim_header_values = true
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::{HermesConfig, HermesConfigBuilder};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    BindingConfig, LogFormat, LoggingConfig, DEFAULT_MAX_BODY_SIZE, DEFAULT_VERSION_MARKER,
};
