//! Request body binding for `Body`-tagged parameters.

use hermes_core::{
    is_blank, BindingError, ModelInstance, ParamSource, ScalarKind, StructuredType, TagOptions,
    TypeDescriptor, Value,
};
use serde_json::{Map, Value as Json};

use crate::coerce::coerce;

/// Coerces body text into a scalar.
///
/// A blank body is replaced by the tag default; a required parameter whose
/// text is still blank is missing.
pub fn bind_scalar(
    kind: &ScalarKind,
    text: &str,
    opts: &TagOptions,
    param: &str,
) -> Result<Value<'static>, BindingError> {
    let text = if is_blank(text) {
        opts.default_value.as_str()
    } else {
        text
    };
    if opts.required && is_blank(text) {
        return Err(BindingError::missing(ParamSource::Body, param));
    }
    coerce(kind, text).map_err(|e| e.into_binding(param))
}

/// Materializes body text as an instance of `ty`.
///
/// A blank body falls back to the tag default, then to absent (or missing,
/// when required).
///
/// # Errors
///
/// - [`BindingError::MalformedBody`] for text that is not JSON
/// - [`BindingError::UnsupportedBodyType`] for JSON that is not an object,
///   or a field whose JSON type does not fit its attribute
/// - [`BindingError::ModelBindingFailure`] for a string field that does not
///   coerce to its attribute's kind
pub fn bind_structured(
    ty: &StructuredType,
    text: &str,
    opts: &TagOptions,
    param: &str,
    version_marker: &str,
) -> Result<Value<'static>, BindingError> {
    let text = if is_blank(text) {
        opts.default_value.as_str()
    } else {
        text
    };
    if is_blank(text) {
        return if opts.required {
            Err(BindingError::missing(ParamSource::Body, param))
        } else {
            Ok(Value::Absent)
        };
    }

    let json: Json =
        serde_json::from_str(text).map_err(|e| BindingError::malformed_body(e.to_string()))?;
    let object = match json {
        Json::Object(object) => object,
        other => {
            return Err(BindingError::unsupported_body(
                ty.name(),
                format!("expected a JSON object, found {}", json_kind(&other)),
            ))
        }
    };

    from_object(ty, &object, version_marker).map(Value::Model)
}

/// Builds an instance of `ty` from the fields of a JSON object.
///
/// Unknown fields are ignored, `null` leaves the attribute at its default,
/// and structured attributes keep their raw JSON.
pub fn from_object(
    ty: &StructuredType,
    object: &Map<String, Json>,
    version_marker: &str,
) -> Result<ModelInstance, BindingError> {
    let mut instance = ModelInstance::new(ty);

    for attr in ty.attributes() {
        if attr.name() == version_marker {
            continue;
        }
        let Some(field) = object.get(attr.name()).filter(|v| !v.is_null()) else {
            continue;
        };

        let value = match attr.ty() {
            TypeDescriptor::Scalar { kind, .. } => from_json_scalar(ty, attr.name(), kind, field)?,
            TypeDescriptor::Structured(_) => Value::Json(field.clone()),
            TypeDescriptor::Context(_) => continue,
        };
        instance.set(attr.name(), value);
    }

    Ok(instance)
}

fn from_json_scalar(
    ty: &StructuredType,
    attr: &str,
    kind: &ScalarKind,
    field: &Json,
) -> Result<Value<'static>, BindingError> {
    let mismatch = || {
        BindingError::unsupported_body(
            ty.name(),
            format!("field '{attr}': expected {kind}, found {}", json_kind(field)),
        )
    };

    if let Json::String(text) = field {
        return coerce(kind, text)
            .map_err(|e| BindingError::model_binding(ty.name(), e.into_binding(attr)));
    }

    let value = match (kind, field) {
        (ScalarKind::String, Json::Number(n)) => Value::Str(n.to_string()),
        (ScalarKind::String, Json::Bool(b)) => Value::Str(b.to_string()),
        (ScalarKind::Bool, Json::Bool(b)) => Value::Bool(*b),
        (ScalarKind::Int, Json::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Value::Int)
            .ok_or_else(mismatch)?,
        (ScalarKind::Long, Json::Number(n)) => n.as_i64().map(Value::Long).ok_or_else(mismatch)?,
        (ScalarKind::Byte, Json::Number(n)) => n
            .as_i64()
            .and_then(|v| i8::try_from(v).ok())
            .map(Value::Byte)
            .ok_or_else(mismatch)?,
        (ScalarKind::Double, Json::Number(n)) => {
            n.as_f64().map(Value::Double).ok_or_else(mismatch)?
        }
        #[allow(clippy::cast_possible_truncation)]
        (ScalarKind::Float, Json::Number(n)) => n
            .as_f64()
            .map(|v| Value::Float(v as f32))
            .ok_or_else(mismatch)?,
        (ScalarKind::Unsupported(_), _) => Value::Absent,
        _ => return Err(mismatch()),
    };
    Ok(value)
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
