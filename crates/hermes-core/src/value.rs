//! Resolved argument values.

use std::ops::Index;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::file::FileItem;
use crate::invocation::Signature;
use crate::request::{ParameterMap, RequestView};
use crate::response::Response;
use crate::session::Session;
use crate::types::StructuredType;

/// The resolved value of one handler argument.
///
/// Context variants borrow from the invocation for `'a`; everything else is
/// owned.
#[derive(Debug, Clone)]
pub enum Value<'a> {
    /// No value (the null-equivalent).
    Absent,
    /// `int`
    Int(i32),
    /// `long`
    Long(i64),
    /// `double`
    Double(f64),
    /// `float`
    Float(f32),
    /// `byte`
    Byte(i8),
    /// `bool`
    Bool(bool),
    /// `string`
    Str(String),
    /// A model-bound structured instance.
    Model(ModelInstance),
    /// Raw JSON, used for structured attributes of a JSON body.
    Json(serde_json::Value),
    /// The current invocation.
    Signature(&'a Signature<'a>),
    /// The current request.
    Request(&'a dyn RequestView),
    /// The current response.
    Response(&'a Response),
    /// The request's session.
    Session(Session),
    /// The full parameter map.
    Parameters(ParameterMap),
    /// An uploaded file.
    File(FileItem),
    /// A fresh view-model holder.
    ViewModel(ViewModel),
}

impl PartialEq for Value<'_> {
    /// Scalars compare by value (floats bit for bit), context objects by
    /// identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Byte(a), Self::Byte(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Model(a), Self::Model(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Signature(a), Self::Signature(b)) => std::ptr::eq(*a, *b),
            (Self::Request(a), Self::Request(b)) => std::ptr::addr_eq(*a, *b),
            (Self::Response(a), Self::Response(b)) => std::ptr::eq(*a, *b),
            (Self::Session(a), Self::Session(b)) => a == b,
            (Self::Parameters(a), Self::Parameters(b)) => a == b,
            (Self::File(a), Self::File(b)) => a == b,
            (Self::ViewModel(a), Self::ViewModel(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> Value<'a> {
    /// Returns `true` for [`Value::Absent`].
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the `int` value.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the `long` value.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the `double` value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the `float` value.
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the `byte` value.
    #[must_use]
    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the `bool` value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the `string` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the bound model.
    #[must_use]
    pub fn as_model(&self) -> Option<&ModelInstance> {
        match self {
            Self::Model(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the raw JSON value.
    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the invocation signature.
    #[must_use]
    pub fn as_signature(&self) -> Option<&'a Signature<'a>> {
        match self {
            Self::Signature(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the request.
    #[must_use]
    pub fn as_request(&self) -> Option<&'a dyn RequestView> {
        match self {
            Self::Request(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the response.
    #[must_use]
    pub fn as_response(&self) -> Option<&'a Response> {
        match self {
            Self::Response(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the session.
    #[must_use]
    pub fn as_session(&self) -> Option<&Session> {
        match self {
            Self::Session(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the parameter map.
    #[must_use]
    pub fn as_parameters(&self) -> Option<&ParameterMap> {
        match self {
            Self::Parameters(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the uploaded file.
    #[must_use]
    pub fn as_file(&self) -> Option<&FileItem> {
        match self {
            Self::File(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the view model.
    #[must_use]
    pub fn as_view_model(&self) -> Option<&ViewModel> {
        match self {
            Self::ViewModel(v) => Some(v),
            _ => None,
        }
    }

    /// Converts a data value to JSON.
    ///
    /// Returns `None` for context variants, which have no JSON form.
    #[must_use]
    pub fn to_json(&self) -> Option<serde_json::Value> {
        use serde_json::Value as Json;

        match self {
            Self::Absent => Some(Json::Null),
            Self::Int(v) => Some(Json::from(*v)),
            Self::Long(v) => Some(Json::from(*v)),
            Self::Double(v) => Some(Json::from(*v)),
            Self::Float(v) => Some(Json::from(*v)),
            Self::Byte(v) => Some(Json::from(*v)),
            Self::Bool(v) => Some(Json::from(*v)),
            Self::Str(v) => Some(Json::from(v.as_str())),
            Self::Model(m) => Some(m.to_json()),
            Self::Json(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// An instance of a [`StructuredType`] populated by model binding.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    type_name: String,
    attributes: IndexMap<String, Value<'static>>,
}

impl ModelInstance {
    /// Constructs a default instance: every attribute at its initial value.
    #[must_use]
    pub fn new(ty: &StructuredType) -> Self {
        let attributes = ty
            .attributes()
            .iter()
            .map(|attr| (attr.name().to_string(), attr.ty().initial_value()))
            .collect();

        Self {
            type_name: ty.name().to_string(),
            attributes,
        }
    }

    /// Returns the structured type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value<'static>> {
        self.attributes.get(name)
    }

    /// Assigns a declared attribute. Returns `false` if the type has no
    /// attribute called `name`.
    pub fn set(&mut self, name: &str, value: Value<'static>) -> bool {
        match self.attributes.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Iterates attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value<'static>)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts the instance to a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .attributes
            .iter()
            .map(|(name, value)| {
                (
                    name.clone(),
                    value.to_json().unwrap_or(serde_json::Value::Null),
                )
            })
            .collect();
        serde_json::Value::Object(object)
    }

    /// Deserializes the instance into a concrete Rust type.
    ///
    /// # Example
    ///
    /// ```
    /// use hermes_core::{ModelInstance, StructuredType, TypeDescriptor, Value};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Page {
    ///     limit: i32,
    ///     cursor: Option<String>,
    /// }
    ///
    /// let ty = StructuredType::new("Page")
    ///     .attribute("limit", TypeDescriptor::int())
    ///     .attribute("cursor", TypeDescriptor::string());
    /// let mut page = ModelInstance::new(&ty);
    /// page.set("limit", Value::Int(25));
    ///
    /// let page: Page = page.deserialize().unwrap();
    /// assert_eq!(page.limit, 25);
    /// assert!(page.cursor.is_none());
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }
}

/// A view-model holder: an optional view name and its attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    view: Option<String>,
    attributes: IndexMap<String, serde_json::Value>,
}

impl ViewModel {
    /// Creates an empty holder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the view name.
    #[must_use]
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    /// Sets the view name.
    pub fn set_view(&mut self, view: impl Into<String>) {
        self.view = Some(view.into());
    }

    /// Adds an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Returns an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    /// Returns `true` if there is no view and no attribute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_none() && self.attributes.is_empty()
    }
}

/// Resolved arguments, positionally aligned with the handler's parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments<'a> {
    values: Vec<Value<'a>>,
}

impl<'a> Arguments<'a> {
    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the argument at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value<'a>> {
        self.values.get(index)
    }

    /// Iterates the arguments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value<'a>> {
        self.values.iter()
    }

    /// Consumes the arguments for invocation.
    #[must_use]
    pub fn into_vec(self) -> Vec<Value<'a>> {
        self.values
    }
}

impl<'a> FromIterator<Value<'a>> for Arguments<'a> {
    fn from_iter<I: IntoIterator<Item = Value<'a>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for Arguments<'a> {
    type Item = Value<'a>;
    type IntoIter = std::vec::IntoIter<Value<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> Index<usize> for Arguments<'a> {
    type Output = Value<'a>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeDescriptor;
    use serde::Deserialize;

    fn filter_type() -> StructuredType {
        StructuredType::new("Filter")
            .attribute("age", TypeDescriptor::int())
            .attribute("name", TypeDescriptor::string())
            .attribute("active", TypeDescriptor::bool())
    }

    #[test]
    fn test_model_instance_defaults() {
        let model = ModelInstance::new(&filter_type());
        assert_eq!(model.type_name(), "Filter");
        assert_eq!(model.get("age"), Some(&Value::Int(0)));
        assert_eq!(model.get("name"), Some(&Value::Absent));
        assert_eq!(model.get("active"), Some(&Value::Bool(false)));
        assert!(model.get("missing").is_none());
    }

    #[test]
    fn test_model_instance_set_only_declared() {
        let mut model = ModelInstance::new(&filter_type());
        assert!(model.set("age", Value::Int(30)));
        assert!(!model.set("email", Value::Str("a@b.c".into())));
        assert_eq!(model.get("age"), Some(&Value::Int(30)));
        assert_eq!(model.attributes().count(), 3);
    }

    #[test]
    fn test_model_instance_to_json_and_deserialize() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Filter {
            age: i32,
            name: Option<String>,
            active: bool,
        }

        let mut model = ModelInstance::new(&filter_type());
        model.set("name", Value::Str("bob".into()));

        assert_eq!(
            model.to_json(),
            serde_json::json!({"age": 0, "name": "bob", "active": false})
        );
        let filter: Filter = model.deserialize().unwrap();
        assert_eq!(
            filter,
            Filter {
                age: 0,
                name: Some("bob".into()),
                active: false
            }
        );
    }

    #[test]
    fn test_value_equality_floats_bitwise() {
        assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
        assert_ne!(Value::Double(0.0), Value::Double(-0.0));
        assert_ne!(Value::Int(1), Value::Long(1));
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Int(7).as_i32(), Some(7));
        assert_eq!(Value::Long(7).as_i64(), Some(7));
        assert_eq!(Value::Byte(-1).as_i8(), Some(-1));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Str("x".into()).as_str(), Some("x"));
        assert!(Value::Absent.is_absent());
        assert!(Value::Int(7).as_str().is_none());
        assert_eq!(Value::Absent.to_json(), Some(serde_json::Value::Null));
    }

    #[test]
    fn test_view_model() {
        let mut vm = ViewModel::new();
        assert!(vm.is_empty());
        vm.set_view("index.html");
        vm.insert("title", "Home");
        assert_eq!(vm.view(), Some("index.html"));
        assert_eq!(vm.get("title"), Some(&serde_json::json!("Home")));
        assert!(!vm.is_empty());
    }

    #[test]
    fn test_arguments_positional() {
        let args: Arguments<'_> = vec![Value::Int(1), Value::Str("a".into())]
            .into_iter()
            .collect();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], Value::Int(1));
        assert_eq!(args.get(1).and_then(Value::as_str), Some("a"));
        assert!(args.get(2).is_none());
        assert_eq!(args.into_vec().len(), 2);
    }
}
