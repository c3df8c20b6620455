//! Errors raised while loading Hermes configuration.

use std::path::PathBuf;
use thiserror::Error;

/// A configuration layer could not be applied, or the result is invalid.
///
/// Messages name the offending file, key or environment variable so they
/// can be reported to operators as-is.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `with_file` was given a path that does not exist.
    #[error("hermes config file {path} does not exist")]
    FileNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("cannot read hermes config file {path}")]
    Read {
        /// File path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The layer's format is neither TOML nor JSON.
    #[error("unsupported config format '{format}', expected toml or json")]
    UnsupportedFormat {
        /// The format name or file that was rejected.
        format: String,
    },

    /// TOML text did not match the `[binding]` / `[logging]` schema.
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON text did not match the `binding` / `logging` schema.
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// A loaded value fails validation, e.g. a blank `binding.version_marker`.
    #[error("`{key}` {reason}")]
    InvalidValue {
        /// Dotted key, such as `binding.max_body_size`.
        key: String,
        /// What the value must satisfy.
        reason: String,
    },

    /// An `PREFIX__SECTION__KEY` override could not be applied.
    #[error("environment override {var} rejected: {reason}")]
    EnvOverride {
        /// Environment variable name.
        var: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A `.env` file could not be parsed.
    #[error("cannot load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl ConfigError {
    /// Missing config file at `path`.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Unreadable config file at `path`.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Rejected format name or file.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Invalid value for the dotted `key`.
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Rejected environment override `var`.
    pub fn env_override(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvOverride {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Returns the config key or environment variable at fault, when the
    /// error is about a single setting.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { key, .. } => Some(key),
            Self::EnvOverride { var, .. } => Some(var),
            _ => None,
        }
    }
}
