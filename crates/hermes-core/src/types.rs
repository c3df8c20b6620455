//! Type descriptors for handler parameters and model attributes.
//!
//! A [`TypeDescriptor`] stands in for the static type of a parameter. It is
//! one of three shapes:
//!
//! | Shape | Bound by |
//! |-------|----------|
//! | [`TypeDescriptor::Scalar`] | Type coercion of a single text value |
//! | [`TypeDescriptor::Context`] | Direct injection of a framework object |
//! | [`TypeDescriptor::Structured`] | Field-by-field model binding |

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Scalar kinds the coercer understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 64-bit float.
    Double,
    /// 32-bit float.
    Float,
    /// 8-bit signed integer.
    Byte,
    /// Boolean.
    Bool,
    /// Text, passed through verbatim.
    String,
    /// A scalar type the coercer has no conversion for. Always binds to
    /// [`Value::Absent`].
    Unsupported(String),
}

impl ScalarKind {
    /// Returns the value a blank input coerces to.
    ///
    /// Numeric kinds yield zero, `Bool` yields `false`, `String` yields the
    /// empty string and `Unsupported` yields [`Value::Absent`].
    #[must_use]
    pub fn zero_value(&self) -> Value<'static> {
        match self {
            Self::Int => Value::Int(0),
            Self::Long => Value::Long(0),
            Self::Double => Value::Double(0.0),
            Self::Float => Value::Float(0.0),
            Self::Byte => Value::Byte(0),
            Self::Bool => Value::Bool(false),
            Self::String => Value::Str(String::new()),
            Self::Unsupported(_) => Value::Absent,
        }
    }

    /// Returns `true` for the numeric kinds.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Long | Self::Double | Self::Float | Self::Byte
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Long => write!(f, "long"),
            Self::Double => write!(f, "double"),
            Self::Float => write!(f, "float"),
            Self::Byte => write!(f, "byte"),
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "string"),
            Self::Unsupported(name) => write!(f, "{name}"),
        }
    }
}

/// Framework-provided types injected without consulting source tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    /// The current invocation [`Signature`](crate::Signature).
    Signature,
    /// The current request.
    Request,
    /// The current response.
    Response,
    /// The request's session.
    Session,
    /// Legacy alias of [`ContextKind::Session`].
    LegacySession,
    /// The full request parameter map.
    Parameters,
    /// An uploaded file.
    File,
    /// A fresh, empty view-model holder.
    ViewModel,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Signature => "Signature",
            Self::Request => "Request",
            Self::Response => "Response",
            Self::Session => "Session",
            Self::LegacySession => "HttpSession",
            Self::Parameters => "Parameters",
            Self::File => "FileItem",
            Self::ViewModel => "ViewModel",
        };
        f.write_str(name)
    }
}

/// Declared type of a handler parameter or model attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// A single value coerced from text.
    Scalar {
        /// The scalar kind.
        kind: ScalarKind,
        /// Whether the declared type is the nullable (boxed) form.
        nullable: bool,
    },
    /// A framework context object.
    Context(ContextKind),
    /// A composite type bound attribute by attribute.
    Structured(Arc<StructuredType>),
}

impl TypeDescriptor {
    /// Creates a non-nullable scalar descriptor.
    #[must_use]
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar {
            kind,
            nullable: false,
        }
    }

    /// Creates a nullable scalar descriptor.
    #[must_use]
    pub fn nullable(kind: ScalarKind) -> Self {
        Self::Scalar {
            kind,
            nullable: true,
        }
    }

    /// `int`
    #[must_use]
    pub fn int() -> Self {
        Self::scalar(ScalarKind::Int)
    }

    /// `long`
    #[must_use]
    pub fn long() -> Self {
        Self::scalar(ScalarKind::Long)
    }

    /// `double`
    #[must_use]
    pub fn double() -> Self {
        Self::scalar(ScalarKind::Double)
    }

    /// `float`
    #[must_use]
    pub fn float() -> Self {
        Self::scalar(ScalarKind::Float)
    }

    /// `byte`
    #[must_use]
    pub fn byte() -> Self {
        Self::scalar(ScalarKind::Byte)
    }

    /// `bool`
    #[must_use]
    pub fn bool() -> Self {
        Self::scalar(ScalarKind::Bool)
    }

    /// `string`
    #[must_use]
    pub fn string() -> Self {
        Self::nullable(ScalarKind::String)
    }

    /// A scalar type with no known conversion.
    #[must_use]
    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::nullable(ScalarKind::Unsupported(name.into()))
    }

    /// A context type.
    #[must_use]
    pub fn context(kind: ContextKind) -> Self {
        Self::Context(kind)
    }

    /// A structured type.
    #[must_use]
    pub fn structured(ty: StructuredType) -> Self {
        Self::Structured(Arc::new(ty))
    }

    /// Returns the scalar kind if this is a scalar descriptor.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&ScalarKind> {
        match self {
            Self::Scalar { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Returns the context kind if this is a context descriptor.
    #[must_use]
    pub fn as_context(&self) -> Option<ContextKind> {
        match self {
            Self::Context(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the structured type if this is a structured descriptor.
    #[must_use]
    pub fn as_structured(&self) -> Option<&StructuredType> {
        match self {
            Self::Structured(ty) => Some(ty),
            _ => None,
        }
    }

    /// Returns `true` for scalar descriptors.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }

    /// Returns the value a freshly constructed attribute of this type holds.
    ///
    /// Non-nullable scalars start at their zero value, everything else
    /// starts absent.
    #[must_use]
    pub fn initial_value(&self) -> Value<'static> {
        match self {
            Self::Scalar {
                kind,
                nullable: false,
            } => kind.zero_value(),
            _ => Value::Absent,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar {
                kind,
                nullable: true,
            } if *kind != ScalarKind::String => write!(f, "{kind}?"),
            Self::Scalar { kind, .. } => write!(f, "{kind}"),
            Self::Context(kind) => write!(f, "{kind}"),
            Self::Structured(ty) => write!(f, "{}", ty.name()),
        }
    }
}

/// A named attribute of a [`StructuredType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    ty: TypeDescriptor,
}

impl Attribute {
    /// Creates a new attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Returns the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute type.
    #[must_use]
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }
}

/// A composite type with ordered, named attributes.
///
/// # Example
///
/// ```
/// use hermes_core::{StructuredType, TypeDescriptor};
///
/// let user = StructuredType::new("User")
///     .attribute("id", TypeDescriptor::long())
///     .attribute("name", TypeDescriptor::string());
///
/// assert_eq!(user.name(), "User");
/// assert_eq!(user.attributes().len(), 2);
/// assert!(user.get("id").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredType {
    name: String,
    attributes: Vec<Attribute>,
}

impl StructuredType {
    /// Creates a structured type with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.attributes.push(Attribute::new(name, ty));
        self
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values() {
        assert_eq!(ScalarKind::Int.zero_value(), Value::Int(0));
        assert_eq!(ScalarKind::Long.zero_value(), Value::Long(0));
        assert_eq!(ScalarKind::Double.zero_value(), Value::Double(0.0));
        assert_eq!(ScalarKind::Float.zero_value(), Value::Float(0.0));
        assert_eq!(ScalarKind::Byte.zero_value(), Value::Byte(0));
        assert_eq!(ScalarKind::Bool.zero_value(), Value::Bool(false));
        assert_eq!(ScalarKind::String.zero_value(), Value::Str(String::new()));
        assert_eq!(
            ScalarKind::Unsupported("char".into()).zero_value(),
            Value::Absent
        );
    }

    #[test]
    fn test_initial_value_respects_nullability() {
        assert_eq!(TypeDescriptor::int().initial_value(), Value::Int(0));
        assert_eq!(
            TypeDescriptor::nullable(ScalarKind::Int).initial_value(),
            Value::Absent
        );
        assert_eq!(TypeDescriptor::string().initial_value(), Value::Absent);
        assert_eq!(
            TypeDescriptor::structured(StructuredType::new("Inner")).initial_value(),
            Value::Absent
        );
    }

    #[test]
    fn test_descriptor_accessors() {
        let ty = TypeDescriptor::context(ContextKind::Request);
        assert_eq!(ty.as_context(), Some(ContextKind::Request));
        assert!(ty.as_scalar().is_none());
        assert!(!ty.is_scalar());

        let ty = TypeDescriptor::long();
        assert_eq!(ty.as_scalar(), Some(&ScalarKind::Long));
        assert!(ty.as_structured().is_none());
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(TypeDescriptor::int().to_string(), "int");
        assert_eq!(TypeDescriptor::nullable(ScalarKind::Int).to_string(), "int?");
        assert_eq!(TypeDescriptor::string().to_string(), "string");
        assert_eq!(
            TypeDescriptor::context(ContextKind::LegacySession).to_string(),
            "HttpSession"
        );
        assert_eq!(
            TypeDescriptor::structured(StructuredType::new("User")).to_string(),
            "User"
        );
    }

    #[test]
    fn test_structured_lookup() {
        let ty = StructuredType::new("Page")
            .attribute("limit", TypeDescriptor::int())
            .attribute("offset", TypeDescriptor::int());

        assert_eq!(ty.get("limit").map(Attribute::name), Some("limit"));
        assert!(ty.get("cursor").is_none());
        assert_eq!(ty.attributes()[1].name(), "offset");
    }
}
