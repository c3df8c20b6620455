//! Configured entry point.

use hermes_config::{ConfigLoader, HermesConfig};
use hermes_core::{Arguments, BindingError, Signature};
use hermes_extract::ArgumentResolver;

use crate::HermesError;

/// A configured argument resolution engine.
///
/// Holds the loaded configuration and a resolver built from its `binding`
/// section. Build one at startup and share it across requests.
///
/// # Example
///
/// ```rust
/// use hermes::prelude::*;
///
/// let hermes = Hermes::new(HermesConfig::default());
///
/// let handler = fixtures::get_user_signature();
/// let request = ExtractionContextBuilder::new()
///     .uri("/users/1?name=ada")
///     .path_param("id", "1")
///     .build();
/// let response = Response::new();
/// let sig = Signature::new(&handler, &request, &response);
///
/// let args = hermes.resolve(&sig).unwrap();
/// assert_eq!(args[1], Value::Str("ada".into()));
/// ```
#[derive(Debug, Clone)]
pub struct Hermes {
    config: HermesConfig,
    resolver: ArgumentResolver,
}

impl Default for Hermes {
    fn default() -> Self {
        Self::new(HermesConfig::default())
    }
}

impl Hermes {
    /// Creates an engine from an already loaded configuration.
    #[must_use]
    pub fn new(config: HermesConfig) -> Self {
        let resolver = ArgumentResolver::with_config(config.binding.clone());
        Self { config, resolver }
    }

    /// Loads and validates configuration, then creates an engine.
    ///
    /// # Errors
    ///
    /// Returns [`HermesError::Config`] if loading or validation fails.
    pub fn from_loader(loader: ConfigLoader) -> Result<Self, HermesError> {
        let config = loader.load()?;
        Ok(Self::new(config))
    }

    /// Installs the global logging subscriber from the `logging` section.
    ///
    /// # Errors
    ///
    /// Returns [`HermesError::Telemetry`] for a bad level directive or when
    /// a global subscriber is already installed.
    pub fn init_logging(&self) -> Result<(), HermesError> {
        hermes_telemetry::init_logging(&self.config.logging.to_log_config())?;
        tracing::info!(
            version_marker = %self.config.binding.version_marker,
            max_body_size = self.config.binding.max_body_size,
            "hermes initialized"
        );
        Ok(())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &HermesConfig {
        &self.config
    }

    /// Returns the resolver.
    #[must_use]
    pub fn resolver(&self) -> &ArgumentResolver {
        &self.resolver
    }

    /// Resolves the arguments of one handler invocation.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindingError`] raised by any parameter.
    pub fn resolve<'a>(&self, sig: &'a Signature<'a>) -> Result<Arguments<'a>, BindingError> {
        self.resolver.resolve(sig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_config::BindingConfig;

    #[test]
    fn test_resolver_follows_binding_section() {
        let config = HermesConfig::builder()
            .binding(BindingConfig {
                version_marker: "rev".to_string(),
                max_body_size: 64,
                trim_header_values: false,
            })
            .build();

        let hermes = Hermes::new(config);
        assert_eq!(hermes.resolver().config().max_body_size, 64);
        assert_eq!(hermes.resolver().models().version_marker(), "rev");
        assert!(!hermes.config().binding.trim_header_values);
    }

    #[test]
    fn test_from_loader_rejects_invalid_config() {
        let loader = ConfigLoader::new()
            .with_string("[binding]\nmax_body_size = 0\n", "toml")
            .unwrap();

        let err = Hermes::from_loader(loader).unwrap_err();
        assert!(matches!(err, HermesError::Config(_)));
        assert!(err.as_binding().is_none());
    }

    #[test]
    fn test_disabled_logging_is_noop() {
        let mut config = HermesConfig::default();
        config.logging.enabled = false;
        assert!(Hermes::new(config).init_logging().is_ok());
    }
}
