//! Structural binding of query parameters onto a structured type.

use std::borrow::Cow;

use hermes_config::DEFAULT_VERSION_MARKER;
use hermes_core::{is_blank, BindingError, ModelInstance, RequestView, StructuredType};

use crate::coerce::coerce;

/// Populates structured types from the query string, one attribute per key.
///
/// With a prefix, attribute `a` is read from `prefix[a]`; without one, from
/// `a`. Only scalar attributes are bound, and the serialization version
/// marker is never touched.
///
/// # Example
///
/// ```rust
/// use hermes_core::{StructuredType, TypeDescriptor, Value};
/// use hermes_extract::{ExtractionContextBuilder, ModelBinder};
///
/// let ty = StructuredType::new("Foo")
///     .attribute("a", TypeDescriptor::int())
///     .attribute("b", TypeDescriptor::string());
/// let ctx = ExtractionContextBuilder::new().uri("/?foo[a]=1&foo[b]=x").build();
///
/// let foo = ModelBinder::new().bind(&ty, &ctx, Some("foo")).unwrap().unwrap();
/// assert_eq!(foo.get("a"), Some(&Value::Int(1)));
/// assert_eq!(foo.get("b"), Some(&Value::Str("x".into())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBinder {
    version_marker: String,
}

impl Default for ModelBinder {
    fn default() -> Self {
        Self {
            version_marker: DEFAULT_VERSION_MARKER.to_string(),
        }
    }
}

impl ModelBinder {
    /// Creates a binder that skips `serial_version_uid`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attribute name to skip.
    #[must_use]
    pub fn with_version_marker(mut self, marker: impl Into<String>) -> Self {
        self.version_marker = marker.into();
        self
    }

    /// Returns the attribute name that is skipped.
    #[must_use]
    pub fn version_marker(&self) -> &str {
        &self.version_marker
    }

    /// Binds `ty` from the query string.
    ///
    /// Returns `Ok(None)` when no attribute received a value, rather than an
    /// all-default instance.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::ModelBindingFailure`] wrapping the coercion
    /// error of the first attribute whose text is malformed.
    pub fn bind(
        &self,
        ty: &StructuredType,
        request: &dyn RequestView,
        prefix: Option<&str>,
    ) -> Result<Option<ModelInstance>, BindingError> {
        let mut instance = ModelInstance::new(ty);
        let mut bound = false;

        for attr in ty.attributes() {
            if attr.name() == self.version_marker {
                continue;
            }
            let Some(kind) = attr.ty().as_scalar() else {
                tracing::trace!(model = ty.name(), attribute = attr.name(), "skipping non-scalar attribute");
                continue;
            };

            let key: Cow<'_, str> = match prefix {
                Some(prefix) => Cow::Owned(format!("{prefix}[{}]", attr.name())),
                None => Cow::Borrowed(attr.name()),
            };

            let Some(raw) = request.query(&key).filter(|v| !is_blank(v)) else {
                continue;
            };

            let value = coerce(kind, raw)
                .map_err(|e| BindingError::model_binding(ty.name(), e.into_binding(key.as_ref())))?;
            if value.is_absent() {
                continue;
            }

            instance.set(attr.name(), value);
            bound = true;
        }

        Ok(bound.then_some(instance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractionContextBuilder;
    use hermes_core::fixtures::{address_type, user_filter_type};
    use hermes_core::{ScalarKind, TypeDescriptor, Value};
    use std::error::Error as _;

    #[test]
    fn test_bind_without_prefix() {
        let ctx = ExtractionContextBuilder::new()
            .uri("/?age=30&name=bob&active=true")
            .build();

        let filter = ModelBinder::new()
            .bind(&user_filter_type(), &ctx, None)
            .unwrap()
            .unwrap();

        assert_eq!(filter.get("age"), Some(&Value::Int(30)));
        assert_eq!(filter.get("name"), Some(&Value::Str("bob".into())));
        assert_eq!(filter.get("score"), Some(&Value::Absent));
        assert_eq!(filter.get("active"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_bind_with_prefix_ignores_plain_keys() {
        let ctx = ExtractionContextBuilder::new()
            .uri("/?age=99&filter[age]=30")
            .build();

        let filter = ModelBinder::new()
            .bind(&user_filter_type(), &ctx, Some("filter"))
            .unwrap()
            .unwrap();

        assert_eq!(filter.get("age"), Some(&Value::Int(30)));
        assert_eq!(filter.get("active"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_nothing_bound_is_none() {
        let ctx = ExtractionContextBuilder::new().uri("/?other=1").build();
        let result = ModelBinder::new().bind(&user_filter_type(), &ctx, Some("foo"));
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let ctx = ExtractionContextBuilder::new().uri("/?age=&name=%20").build();
        let result = ModelBinder::new().bind(&user_filter_type(), &ctx, None);
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_version_marker_and_nested_skipped() {
        let ctx = ExtractionContextBuilder::new()
            .uri("/?serial_version_uid=7&geo=1&street=main")
            .build();

        let address = ModelBinder::new()
            .bind(&address_type(), &ctx, None)
            .unwrap()
            .unwrap();

        assert_eq!(address.get("serial_version_uid"), Some(&Value::Long(0)));
        assert_eq!(address.get("geo"), Some(&Value::Absent));
        assert_eq!(address.get("street"), Some(&Value::Str("main".into())));
    }

    #[test]
    fn test_custom_version_marker() {
        let ctx = ExtractionContextBuilder::new()
            .uri("/?serial_version_uid=7&street=main")
            .build();

        let binder = ModelBinder::new().with_version_marker("street");
        assert_eq!(binder.version_marker(), "street");

        let address = binder.bind(&address_type(), &ctx, None).unwrap().unwrap();
        assert_eq!(address.get("serial_version_uid"), Some(&Value::Long(7)));
        assert_eq!(address.get("street"), Some(&Value::Absent));
    }

    #[test]
    fn test_coercion_failure_is_wrapped() {
        let ctx = ExtractionContextBuilder::new()
            .uri("/?u[age]=old&u[name]=bob")
            .build();

        let err = ModelBinder::new()
            .bind(&user_filter_type(), &ctx, Some("u"))
            .unwrap_err();

        match &err {
            BindingError::ModelBindingFailure { target, cause } => {
                assert_eq!(target, "UserFilter");
                assert_eq!(cause.param_name(), Some("u[age]"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unsupported_attribute_does_not_count() {
        let ty = StructuredType::new("Odd")
            .attribute("c", TypeDescriptor::unsupported("char"))
            .attribute("n", TypeDescriptor::nullable(ScalarKind::Int));
        let ctx = ExtractionContextBuilder::new().uri("/?c=x").build();
        assert_eq!(ModelBinder::new().bind(&ty, &ctx, None).unwrap(), None);
    }

    #[test]
    fn test_empty_type_is_none() {
        let ctx = ExtractionContextBuilder::new().uri("/?a=1").build();
        let ty = StructuredType::new("Empty");
        assert_eq!(ModelBinder::new().bind(&ty, &ctx, None).unwrap(), None);
    }
}
