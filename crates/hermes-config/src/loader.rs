//! Layered configuration loader.

use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, HermesConfig, LogFormat};

/// Configuration loader with a layered approach.
///
/// Later layers override earlier ones:
/// 1. Default values (or a preset)
/// 2. Configuration file or string (TOML or JSON)
/// 3. `.env` file
/// 4. Environment variables (`PREFIX__SECTION__KEY`)
///
/// # Example
///
/// ```no_run
/// use hermes_config::ConfigLoader;
///
/// # fn main() -> Result<(), hermes_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_optional_file("hermes.toml")?
///     .with_dotenv()?
///     .with_env_prefix("HERMES")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: HermesConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader seeded with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HermesConfig::default(),
            env_prefix: None,
        }
    }

    /// Start from default configuration values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = HermesConfig::default();
        self
    }

    /// Start from the development preset.
    ///
    /// # Example
    ///
    /// ```
    /// use hermes_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_development()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = HermesConfig::development();
        self
    }

    /// Start from the production preset.
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = HermesConfig::production();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable, malformed or
    /// contains unknown fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in the given format
    /// (`"toml"` or `"json"`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails or the format is unknown.
    ///
    /// # Example
    ///
    /// ```
    /// use hermes_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [binding]
    ///     version_marker = "version"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.binding.version_marker, "version");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::unsupported_format(format))
            }
        };
        Ok(self)
    }

    /// Set the environment variable prefix for overrides.
    ///
    /// With prefix `HERMES`:
    /// - `HERMES__BINDING__VERSION_MARKER=version`
    /// - `HERMES__BINDING__MAX_BODY_SIZE=1048576`
    /// - `HERMES__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load variables from a `.env` file in the current directory or its
    /// parents, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if a `.env` file exists but cannot be
    /// parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Load variables from a specific `.env` file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if the file is missing or malformed.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        dotenvy::from_path(path)?;
        Ok(self)
    }

    /// Apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override cannot be parsed or validation
    /// fails.
    pub fn load(mut self) -> Result<HermesConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;

        Ok(self.config)
    }

    /// Return the configuration without overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> HermesConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<HermesConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::unsupported_format(
                path.display().to_string(),
            )),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(path) = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
        else {
            // Shares the prefix but not the separator, e.g. `HERMESX`.
            return Ok(());
        };

        let parts: Vec<&str> = path.split("__").collect();

        match parts.as_slice() {
            ["BINDING", "VERSION_MARKER"] => {
                self.config.binding.version_marker = value.to_string();
            }
            ["BINDING", "MAX_BODY_SIZE"] => {
                self.config.binding.max_body_size = value
                    .parse()
                    .map_err(|_| ConfigError::env_override(key, "expected integer"))?;
            }
            ["BINDING", "TRIM_HEADER_VALUES"] => {
                self.config.binding.trim_header_values = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => {
                self.config.logging.level = value.to_string();
            }
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_override(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["LOGGING", "ANSI_ENABLED"] => {
                self.config.logging.ansi_enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                self.config.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_override(key, "expected boolean"))?;
            }

            _ => {
                return Err(ConfigError::env_override(
                    key,
                    "unknown configuration key",
                ));
            }
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_loader_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, HermesConfig::default());
    }

    #[test]
    fn test_loader_production_preset() {
        let config = ConfigLoader::new().with_production().load().unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hermes.toml");
        fs::write(
            &path,
            r#"
[binding]
version_marker = "schema_version"
max_body_size = 65536

[logging]
level = "warn"
format = "pretty"
"#,
        )
        .unwrap();

        let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();

        assert_eq!(config.binding.version_marker, "schema_version");
        assert_eq!(config.binding.max_body_size, 65536);
        assert!(config.binding.trim_header_values);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_load_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hermes.json");
        fs::write(&path, r#"{"binding": {"trim_header_values": false}}"#).unwrap();

        let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();
        assert!(!config.binding.trim_header_values);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::new().with_file("/nonexistent/hermes.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_optional_missing_file() {
        let config = ConfigLoader::new()
            .with_optional_file("/nonexistent/hermes.toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config, HermesConfig::default());
    }

    #[test]
    fn test_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hermes.yaml");
        fs::write(&path, "binding: {}").unwrap();

        let result = ConfigLoader::new().with_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ConfigLoader::new().with_string("[binding]\nstrict = true", "toml");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_unsupported_string_format() {
        let result = ConfigLoader::new().with_string("", "ini");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_env_var_binding() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("HERMES__BINDING__VERSION_MARKER", "rev", "HERMES")
            .unwrap();
        loader
            .apply_env_var("HERMES__BINDING__MAX_BODY_SIZE", "512", "HERMES")
            .unwrap();
        loader
            .apply_env_var("HERMES__BINDING__TRIM_HEADER_VALUES", "off", "HERMES")
            .unwrap();

        let config = loader.load_unvalidated();
        assert_eq!(config.binding.version_marker, "rev");
        assert_eq!(config.binding.max_body_size, 512);
        assert!(!config.binding.trim_header_values);
    }

    #[test]
    fn test_apply_env_var_logging() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_env_var("HERMES__LOGGING__FORMAT", "Pretty", "HERMES")
            .unwrap();
        loader
            .apply_env_var("HERMES__LOGGING__LEVEL", "trace", "HERMES")
            .unwrap();

        let config = loader.load_unvalidated();
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_apply_env_var_errors() {
        let mut loader = ConfigLoader::new();
        assert!(loader
            .apply_env_var("HERMES__BINDING__MAX_BODY_SIZE", "lots", "HERMES")
            .is_err());
        assert!(loader
            .apply_env_var("HERMES__LOGGING__FORMAT", "xml", "HERMES")
            .is_err());
        assert!(loader
            .apply_env_var("HERMES__SERVER__PORT", "80", "HERMES")
            .is_err());
        assert!(loader
            .apply_env_var("HERMESX__BINDING__MAX_BODY_SIZE", "1", "HERMES")
            .is_ok());
    }

    #[test]
    fn test_env_prefix_overrides() {
        env::set_var("HERMES_LOADER_TEST__BINDING__VERSION_MARKER", "from_env");

        let config = ConfigLoader::new()
            .with_env_prefix("hermes_loader_test")
            .load()
            .unwrap();

        env::remove_var("HERMES_LOADER_TEST__BINDING__VERSION_MARKER");
        assert_eq!(config.binding.version_marker, "from_env");
    }

    #[test]
    fn test_dotenv_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "HERMES_DOTENV_TEST__LOGGING__LEVEL=warn\n").unwrap();

        let config = ConfigLoader::new()
            .with_dotenv_file(&path)
            .unwrap()
            .with_env_prefix("HERMES_DOTENV_TEST")
            .load()
            .unwrap();

        env::remove_var("HERMES_DOTENV_TEST__LOGGING__LEVEL");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
