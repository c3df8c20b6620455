//! Parameter source resolution.
//!
//! For each declared parameter, in order:
//!
//! 1. A context type is injected. The one exception is a `Multipart` tag on
//!    the file context type, which selects the upload by name.
//! 2. Otherwise the highest-priority source tag decides the extractor and
//!    whether the text is coerced or model-bound.
//! 3. Otherwise a scalar is coerced from the query value named after the
//!    parameter.
//! 4. Otherwise the structured type is model-bound without a prefix.

use hermes_config::BindingConfig;
use hermes_core::{
    Arguments, BindingError, ContextKind, ParamSource, ParamSpec, RequestView, ScalarKind,
    Signature, SourceTag, StructuredType, TagOptions, TypeDescriptor, Value,
};

use crate::coerce::coerce;
use crate::model::ModelBinder;
use crate::{inject, json, sources};

/// Resolves handler arguments from a request.
///
/// A resolver holds only configuration and can be shared across requests.
///
/// # Example
///
/// ```rust
/// use hermes_core::{fixtures, Response, Signature, Value};
/// use hermes_extract::{ArgumentResolver, ExtractionContextBuilder};
///
/// let handler = fixtures::get_user_signature();
/// let request = ExtractionContextBuilder::new()
///     .uri("/users/42?name=alice")
///     .path_param("id", "42")
///     .build();
/// let response = Response::new();
/// let sig = Signature::new(&handler, &request, &response);
///
/// let args = ArgumentResolver::new().resolve(&sig).unwrap();
/// assert_eq!(args[0], Value::Int(42));
/// assert_eq!(args[1], Value::Str("alice".into()));
/// assert!(args[2].as_request().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgumentResolver {
    config: BindingConfig,
    models: ModelBinder,
}

impl ArgumentResolver {
    /// Creates a resolver with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with the given configuration.
    #[must_use]
    pub fn with_config(config: BindingConfig) -> Self {
        let models = ModelBinder::new().with_version_marker(config.version_marker.clone());
        Self { config, models }
    }

    /// Returns the binding configuration.
    #[must_use]
    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Returns the model binder.
    #[must_use]
    pub fn models(&self) -> &ModelBinder {
        &self.models
    }

    /// Resolves every parameter of the invocation's handler.
    ///
    /// The result is positionally aligned with the handler's parameters.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindingError`] raised by any parameter. Absent
    /// optional data is never an error.
    pub fn resolve<'a>(&self, sig: &'a Signature<'a>) -> Result<Arguments<'a>, BindingError> {
        let handler = sig.handler();
        let span = tracing::debug_span!(
            "resolve_arguments",
            handler = handler.name(),
            params = handler.params().len()
        );
        let _enter = span.enter();

        handler
            .params()
            .iter()
            .map(|param| {
                self.resolve_param(sig, param).inspect_err(|e| {
                    tracing::debug!(
                        handler = handler.name(),
                        param = param.name(),
                        error = %e,
                        "argument binding failed"
                    );
                })
            })
            .collect()
    }

    /// Resolves a single parameter.
    ///
    /// # Errors
    ///
    /// Returns the [`BindingError`] raised while binding `param`.
    pub fn resolve_param<'a>(
        &self,
        sig: &'a Signature<'a>,
        param: &ParamSpec,
    ) -> Result<Value<'a>, BindingError> {
        let request = sig.request();

        if let Some(kind) = param.declared_type().as_context() {
            if kind == ContextKind::File {
                if let Some(opts) = param.tag_for(ParamSource::Multipart) {
                    let name = opts.effective_name(param.name());
                    tracing::trace!(param = param.name(), source = %ParamSource::Multipart, name, "bound parameter");
                    return match sources::file(request, name) {
                        Some(file) => Ok(Value::File(file.clone())),
                        None if opts.required => {
                            Err(BindingError::missing(ParamSource::Multipart, param.name()))
                        }
                        None => Ok(Value::Absent),
                    };
                }
            }
            tracing::trace!(param = param.name(), context = %kind, "injected context");
            return Ok(inject::inject(kind, sig));
        }

        let value = match param.effective_tag() {
            Some(tag) if tag.source() != ParamSource::Multipart => {
                self.bind_tagged(request, param, tag)?
            }
            _ => self.bind_untagged(request, param)?,
        };
        Ok(value)
    }

    fn bind_tagged(
        &self,
        request: &dyn RequestView,
        param: &ParamSpec,
        tag: &SourceTag,
    ) -> Result<Value<'static>, BindingError> {
        let opts = tag.options();
        let source = tag.source();
        let name = param.name();
        tracing::trace!(
            param = name,
            source = %source,
            name = opts.effective_name(name),
            "bound parameter"
        );

        match (source, param.declared_type()) {
            (ParamSource::Query, TypeDescriptor::Scalar { kind, .. }) => {
                coerce_param(kind, sources::query(request, name, opts)?, name)
            }
            (ParamSource::Query, TypeDescriptor::Structured(ty)) => {
                self.bind_query_model(ty, request, name, opts)
            }
            (ParamSource::Body, TypeDescriptor::Scalar { kind, .. }) => {
                let text = sources::body(request, self.config.max_body_size)?;
                json::bind_scalar(kind, text, opts, name)
            }
            (ParamSource::Body, TypeDescriptor::Structured(ty)) => {
                let text = sources::body(request, self.config.max_body_size)?;
                json::bind_structured(ty, text, opts, name, self.models.version_marker())
            }
            (ParamSource::Path, TypeDescriptor::Scalar { kind, .. }) => {
                coerce_param(kind, sources::path(request, name, opts)?, name)
            }
            (ParamSource::Header, TypeDescriptor::Scalar { kind, .. }) => {
                let raw = sources::header(request, name, opts, self.config.trim_header_values)?;
                coerce_param(kind, raw, name)
            }
            (ParamSource::Cookie, TypeDescriptor::Scalar { kind, .. }) => {
                coerce_param(kind, sources::cookie(request, name, opts)?, name)
            }
            (source, ty) => {
                tracing::debug!(param = name, source = %source, ty = %ty, "source cannot bind this type");
                Ok(Value::Absent)
            }
        }
    }

    fn bind_query_model(
        &self,
        ty: &StructuredType,
        request: &dyn RequestView,
        param: &str,
        opts: &TagOptions,
    ) -> Result<Value<'static>, BindingError> {
        let prefix = opts.effective_name(param);
        match self.models.bind(ty, request, Some(prefix))? {
            Some(model) => Ok(Value::Model(model)),
            None if opts.required => Err(BindingError::missing(ParamSource::Query, param)),
            None => Ok(Value::Absent),
        }
    }

    fn bind_untagged(
        &self,
        request: &dyn RequestView,
        param: &ParamSpec,
    ) -> Result<Value<'static>, BindingError> {
        match param.declared_type() {
            TypeDescriptor::Scalar { kind, .. } => {
                let raw = request.query(param.name()).unwrap_or_default();
                coerce_param(kind, raw, param.name())
            }
            TypeDescriptor::Structured(ty) => Ok(self
                .models
                .bind(ty, request, None)?
                .map_or(Value::Absent, Value::Model)),
            TypeDescriptor::Context(_) => Ok(Value::Absent),
        }
    }
}

fn coerce_param(kind: &ScalarKind, raw: &str, name: &str) -> Result<Value<'static>, BindingError> {
    coerce(kind, raw).map_err(|e| e.into_binding(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractionContextBuilder;
    use hermes_core::fixtures::{get_user_signature, user_filter_type};
    use hermes_core::{FileItem, HandlerSignature, Response};

    fn resolve_one(param: ParamSpec, request: &crate::ExtractionContext) -> Result<Value<'static>, BindingError> {
        resolve_one_with(&ArgumentResolver::new(), param, request)
    }

    fn resolve_one_with(
        resolver: &ArgumentResolver,
        param: ParamSpec,
        request: &crate::ExtractionContext,
    ) -> Result<Value<'static>, BindingError> {
        let handler = HandlerSignature::new("h").param(param);
        let response = Response::new();
        let sig = Signature::new(&handler, request, &response);
        let value = resolver.resolve(&sig)?.into_vec().remove(0);
        Ok(owned(value))
    }

    // Detaches data values from the invocation so tests can compare them.
    fn owned(value: Value<'_>) -> Value<'static> {
        match value {
            Value::Int(v) => Value::Int(v),
            Value::Long(v) => Value::Long(v),
            Value::Double(v) => Value::Double(v),
            Value::Float(v) => Value::Float(v),
            Value::Byte(v) => Value::Byte(v),
            Value::Bool(v) => Value::Bool(v),
            Value::Str(v) => Value::Str(v),
            Value::Model(v) => Value::Model(v),
            Value::Json(v) => Value::Json(v),
            Value::File(v) => Value::File(v),
            _ => Value::Absent,
        }
    }

    #[test]
    fn test_scenario_get_user() {
        let handler = get_user_signature();
        let request = ExtractionContextBuilder::new()
            .uri("/users/42?name=alice")
            .path_param("id", "42")
            .build();
        let response = Response::new();
        let sig = Signature::new(&handler, &request, &response);

        let args = ArgumentResolver::new().resolve(&sig).unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], Value::Int(42));
        assert_eq!(args[1], Value::Str("alice".into()));
        let expected: &dyn RequestView = &request;
        assert!(std::ptr::addr_eq(args[2].as_request().unwrap(), expected));
    }

    #[test]
    fn test_scenario_missing_name() {
        let handler = get_user_signature();
        let request = ExtractionContextBuilder::new()
            .uri("/users/42")
            .path_param("id", "42")
            .build();
        let response = Response::new();
        let sig = Signature::new(&handler, &request, &response);

        let err = ArgumentResolver::new().resolve(&sig).unwrap_err();
        assert!(matches!(
            err,
            BindingError::MissingRequiredParameter { ref name, location: ParamSource::Query }
                if name == "name"
        ));
    }

    #[test]
    fn test_untagged_scalar_reads_query() {
        let request = ExtractionContextBuilder::new().uri("/?page=3").build();
        assert_eq!(
            resolve_one(ParamSpec::new("page", TypeDescriptor::int()), &request).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            resolve_one(ParamSpec::new("size", TypeDescriptor::int()), &request).unwrap(),
            Value::Int(0)
        );
        assert_eq!(
            resolve_one(ParamSpec::new("q", TypeDescriptor::string()), &request).unwrap(),
            Value::Str(String::new())
        );
    }

    #[test]
    fn test_query_default() {
        let request = ExtractionContextBuilder::new().build();
        let param = ParamSpec::new("limit", TypeDescriptor::int())
            .tag(SourceTag::query().default_value("25"));
        assert_eq!(resolve_one(param, &request).unwrap(), Value::Int(25));
    }

    #[test]
    fn test_tag_priority_query_over_cookie() {
        let request = ExtractionContextBuilder::new()
            .uri("/?theme=light")
            .cookie("theme", "dark")
            .build();
        let param = ParamSpec::new("theme", TypeDescriptor::string())
            .tag(SourceTag::cookie())
            .tag(SourceTag::query());
        assert_eq!(
            resolve_one(param, &request).unwrap(),
            Value::Str("light".into())
        );
    }

    #[test]
    fn test_header_and_cookie_params() {
        let request = ExtractionContextBuilder::new()
            .header("X-Retry", " 2 ")
            .cookie("sid", "abc")
            .build();

        let param = ParamSpec::new("retry", TypeDescriptor::int())
            .tag(SourceTag::header().named("x-retry"));
        assert_eq!(resolve_one(param, &request).unwrap(), Value::Int(2));

        let param = ParamSpec::new("sid", TypeDescriptor::string()).tag(SourceTag::cookie());
        assert_eq!(resolve_one(param, &request).unwrap(), Value::Str("abc".into()));
    }

    #[test]
    fn test_header_untrimmed_fails_coercion() {
        let request = ExtractionContextBuilder::new().header("x-retry", " 2 ").build();
        let resolver = ArgumentResolver::with_config(BindingConfig {
            trim_header_values: false,
            ..BindingConfig::default()
        });
        let param = ParamSpec::new("retry", TypeDescriptor::int())
            .tag(SourceTag::header().named("x-retry"));
        assert!(matches!(
            resolve_one_with(&resolver, param, &request),
            Err(BindingError::CoercionFailure { .. })
        ));
    }

    #[test]
    fn test_path_coercion_failure_names_param() {
        let request = ExtractionContextBuilder::new().path_param("id", "abc").build();
        let param = ParamSpec::new("id", TypeDescriptor::long()).tag(SourceTag::path());
        let err = resolve_one(param, &request).unwrap_err();
        assert_eq!(err.param_name(), Some("id"));
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_non_scalar_on_path_is_absent() {
        let request = ExtractionContextBuilder::new().path_param("f", "1").build();
        let param = ParamSpec::new("f", TypeDescriptor::structured(user_filter_type()))
            .tag(SourceTag::path());
        assert_eq!(resolve_one(param, &request).unwrap(), Value::Absent);
    }

    #[test]
    fn test_query_tagged_model() {
        let request = ExtractionContextBuilder::new()
            .uri("/?f[age]=20&f[name]=zed")
            .build();
        let param = ParamSpec::new("filter", TypeDescriptor::structured(user_filter_type()))
            .tag(SourceTag::query().named("f"));

        let value = resolve_one(param, &request).unwrap();
        let model = value.as_model().unwrap();
        assert_eq!(model.get("age"), Some(&Value::Int(20)));
        assert_eq!(model.get("name"), Some(&Value::Str("zed".into())));
    }

    #[test]
    fn test_query_tagged_model_required() {
        let request = ExtractionContextBuilder::new().build();
        let param = ParamSpec::new("filter", TypeDescriptor::structured(user_filter_type()))
            .tag(SourceTag::query().required());
        assert!(matches!(
            resolve_one(param, &request),
            Err(BindingError::MissingRequiredParameter { .. })
        ));
    }

    #[test]
    fn test_untagged_model() {
        let request = ExtractionContextBuilder::new().uri("/?age=5").build();
        let param = ParamSpec::new("filter", TypeDescriptor::structured(user_filter_type()));
        let value = resolve_one(param, &request).unwrap();
        assert_eq!(value.as_model().and_then(|m| m.get("age")), Some(&Value::Int(5)));

        let empty = ExtractionContextBuilder::new().build();
        let param = ParamSpec::new("filter", TypeDescriptor::structured(user_filter_type()));
        assert_eq!(resolve_one(param, &empty).unwrap(), Value::Absent);
    }

    #[test]
    fn test_body_params() {
        let request = ExtractionContextBuilder::new()
            .json(&serde_json::json!({"age": 3, "name": "kit"}))
            .build();
        let param = ParamSpec::new("filter", TypeDescriptor::structured(user_filter_type()))
            .tag(SourceTag::body());
        let value = resolve_one(param, &request).unwrap();
        assert_eq!(value.as_model().and_then(|m| m.get("name")), Some(&Value::Str("kit".into())));

        let request = ExtractionContextBuilder::new().body("17").build();
        let param = ParamSpec::new("n", TypeDescriptor::int()).tag(SourceTag::body());
        assert_eq!(resolve_one(param, &request).unwrap(), Value::Int(17));
    }

    #[test]
    fn test_body_too_large() {
        let request = ExtractionContextBuilder::new().body("x".repeat(64)).build();
        let resolver = ArgumentResolver::with_config(BindingConfig {
            max_body_size: 16,
            ..BindingConfig::default()
        });
        let param = ParamSpec::new("raw", TypeDescriptor::string()).tag(SourceTag::body());
        assert!(matches!(
            resolve_one_with(&resolver, param, &request),
            Err(BindingError::PayloadTooLarge { max: 16, actual: 64 })
        ));
    }

    #[test]
    fn test_context_type_ignores_tags() {
        let request = ExtractionContextBuilder::new().uri("/?a=1").build();
        let handler = HandlerSignature::new("h").param(
            ParamSpec::new("params", TypeDescriptor::context(ContextKind::Parameters))
                .tag(SourceTag::query().required()),
        );
        let response = Response::new();
        let sig = Signature::new(&handler, &request, &response);

        let args = ArgumentResolver::new().resolve(&sig).unwrap();
        assert_eq!(args[0].as_parameters().map(|p| p.len()), Some(1));
    }

    #[test]
    fn test_multipart_tag_selects_named_file() {
        let request = ExtractionContextBuilder::new()
            .file(FileItem::new("cover", "c"))
            .file(FileItem::new("avatar", "a"))
            .build();

        let param = ParamSpec::new("avatar", TypeDescriptor::context(ContextKind::File))
            .tag(SourceTag::multipart());
        let value = resolve_one(param, &request).unwrap();
        assert_eq!(value.as_file().map(FileItem::name), Some("avatar"));

        let param = ParamSpec::new("upload", TypeDescriptor::context(ContextKind::File));
        let value = resolve_one(param, &request).unwrap();
        assert_eq!(value.as_file().map(FileItem::name), Some("cover"));

        let param = ParamSpec::new("resume", TypeDescriptor::context(ContextKind::File))
            .tag(SourceTag::multipart());
        assert_eq!(resolve_one(param, &request).unwrap(), Value::Absent);
    }

    #[test]
    fn test_required_multipart_file_missing() {
        let request = ExtractionContextBuilder::new()
            .file(FileItem::new("cover", "c"))
            .build();

        let param = ParamSpec::new("avatar", TypeDescriptor::context(ContextKind::File))
            .tag(SourceTag::multipart().required());
        match resolve_one(param, &request).unwrap_err() {
            BindingError::MissingRequiredParameter { name, location } => {
                assert_eq!(name, "avatar");
                assert_eq!(location, ParamSource::Multipart);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let param = ParamSpec::new("upload", TypeDescriptor::context(ContextKind::File))
            .tag(SourceTag::multipart().named("cover").required());
        let value = resolve_one(param, &request).unwrap();
        assert_eq!(value.as_file().map(FileItem::name), Some("cover"));
    }

    #[test]
    fn test_body_with_invalid_utf8_is_malformed() {
        let request = ExtractionContextBuilder::new()
            .body(vec![0xc3, 0x28])
            .build();
        let param = ParamSpec::new("note", TypeDescriptor::string()).tag(SourceTag::body());
        assert!(matches!(
            resolve_one(param, &request),
            Err(BindingError::MalformedBody { .. })
        ));
    }

    #[test]
    fn test_multipart_tag_on_scalar_falls_back_to_query() {
        let request = ExtractionContextBuilder::new().uri("/?count=4").build();
        let param = ParamSpec::new("count", TypeDescriptor::int()).tag(SourceTag::multipart());
        assert_eq!(resolve_one(param, &request).unwrap(), Value::Int(4));
    }

    #[test]
    fn test_custom_version_marker_flows_to_models() {
        let resolver = ArgumentResolver::with_config(BindingConfig {
            version_marker: "version".to_string(),
            ..BindingConfig::default()
        });
        assert_eq!(resolver.models().version_marker(), "version");
        assert_eq!(resolver.config().version_marker, "version");
    }
}
