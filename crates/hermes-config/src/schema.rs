//! Configuration section types.

use serde::{Deserialize, Serialize};

/// Default attribute name skipped by the model binder.
pub const DEFAULT_VERSION_MARKER: &str = "serial_version_uid";

/// Default upper bound on body text read for body-tagged parameters (2 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Argument binding configuration.
///
/// # Example
///
/// ```
/// use hermes_config::BindingConfig;
///
/// let binding = BindingConfig::default();
/// assert_eq!(binding.version_marker, "serial_version_uid");
/// assert!(binding.trim_header_values);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    /// Attribute name the model binder never binds.
    #[serde(default = "default_version_marker")]
    pub version_marker: String,

    /// Largest body, in bytes, a body-tagged parameter may read.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    /// Trim surrounding whitespace from header values before use.
    #[serde(default = "default_true")]
    pub trim_header_values: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            version_marker: default_version_marker(),
            max_body_size: default_max_body_size(),
            trim_header_values: true,
        }
    }
}

fn default_version_marker() -> String {
    DEFAULT_VERSION_MARKER.to_string()
}

fn default_max_body_size() -> usize {
    DEFAULT_MAX_BODY_SIZE
}

fn default_true() -> bool {
    true
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Converts this section into the telemetry crate's [`LogConfig`].
    ///
    /// [`LogConfig`]: hermes_telemetry::LogConfig
    #[must_use]
    pub fn to_log_config(&self) -> hermes_telemetry::LogConfig {
        hermes_telemetry::LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            span_events: self.format == LogFormat::Pretty,
            file_line_info: self.include_location,
            ansi: self.ansi_enabled,
        }
    }
}

impl From<&LoggingConfig> for hermes_telemetry::LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        config.to_log_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_defaults() {
        let binding = BindingConfig::default();
        assert_eq!(binding.version_marker, DEFAULT_VERSION_MARKER);
        assert_eq!(binding.max_body_size, 2 * 1024 * 1024);
        assert!(binding.trim_header_values);
    }

    #[test]
    fn test_binding_partial_toml() {
        let binding: BindingConfig = toml::from_str("max_body_size = 1024").unwrap();
        assert_eq!(binding.max_body_size, 1024);
        assert_eq!(binding.version_marker, DEFAULT_VERSION_MARKER);
    }

    #[test]
    fn test_binding_rejects_unknown_fields() {
        let result: Result<BindingConfig, _> = toml::from_str("strict = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_serde() {
        let logging: LoggingConfig = toml::from_str(r#"format = "pretty""#).unwrap();
        assert_eq!(logging.format, LogFormat::Pretty);
        assert_eq!(logging.level, "info");
    }

    #[test]
    fn test_logging_to_log_config() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            ansi_enabled: true,
            include_location: true,
            ..LoggingConfig::default()
        };

        let log = hermes_telemetry::LogConfig::from(&logging);
        assert_eq!(log.level, "debug");
        assert!(!log.json_format);
        assert!(log.ansi);
        assert!(log.file_line_info);
    }
}
