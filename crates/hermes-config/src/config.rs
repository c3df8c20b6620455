//! Root configuration type and its builder.

use serde::{Deserialize, Serialize};

use crate::{BindingConfig, ConfigError, LogFormat, LoggingConfig};

/// Complete Hermes configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use hermes_config::HermesConfig;
///
/// let config = HermesConfig::default();
/// assert_eq!(config.binding.version_marker, "serial_version_uid");
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HermesConfig {
    /// Argument binding configuration.
    #[serde(default)]
    pub binding: BindingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HermesConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use hermes_config::{BindingConfig, HermesConfig};
    ///
    /// let config = HermesConfig::builder()
    ///     .binding(BindingConfig {
    ///         max_body_size: 4096,
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.binding.max_body_size, 4096);
    /// ```
    #[must_use]
    pub fn builder() -> HermesConfigBuilder {
        HermesConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `binding.version_marker` is blank
    /// - `binding.max_body_size` is zero
    /// - `logging.level` is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.binding.version_marker.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "binding.version_marker",
                "must not be blank",
            ));
        }

        if self.binding.max_body_size == 0 {
            return Err(ConfigError::invalid_value(
                "binding.max_body_size",
                "must be greater than zero",
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "logging.level",
                "must not be blank",
            ));
        }

        Ok(())
    }

    /// Development preset: pretty, colored `debug` logs with source
    /// locations.
    ///
    /// # Example
    ///
    /// ```
    /// use hermes_config::{HermesConfig, LogFormat};
    ///
    /// let config = HermesConfig::development();
    /// assert_eq!(config.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.ansi_enabled = true;
        config.logging.include_location = true;

        config
    }

    /// Production preset: JSON logs at `info`.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.logging.ansi_enabled = false;

        config
    }
}

/// Builder for [`HermesConfig`].
#[derive(Debug, Default)]
pub struct HermesConfigBuilder {
    binding: Option<BindingConfig>,
    logging: Option<LoggingConfig>,
}

impl HermesConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the binding configuration.
    #[must_use]
    pub fn binding(mut self, binding: BindingConfig) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Build the configuration. Unset sections use their defaults.
    #[must_use]
    pub fn build(self) -> HermesConfig {
        HermesConfig {
            binding: self.binding.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<HermesConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HermesConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config, HermesConfig::production());
    }

    #[test]
    fn test_development_preset() {
        let config = HermesConfig::development();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.ansi_enabled);
        assert_eq!(config.binding, BindingConfig::default());
    }

    #[test]
    fn test_builder_sections() {
        let config = HermesConfig::builder()
            .binding(BindingConfig {
                version_marker: "version".to_string(),
                ..Default::default()
            })
            .build();

        assert_eq!(config.binding.version_marker, "version");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_validate_blank_version_marker() {
        let result = HermesConfig::builder()
            .binding(BindingConfig {
                version_marker: "  ".to_string(),
                ..Default::default()
            })
            .build_validated();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "binding.version_marker"
        ));
    }

    #[test]
    fn test_validate_zero_body_size() {
        let mut config = HermesConfig::default();
        config.binding.max_body_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_section() {
        let result: Result<HermesConfig, _> = toml::from_str("[server]\nport = 1");
        assert!(result.is_err());
    }
}
