//! Handler signatures and declarative source tags.

use std::fmt;

use crate::types::TypeDescriptor;

/// Part of the request a tagged parameter is read from.
///
/// The declaration order is the tag priority: when a parameter carries more
/// than one tag, the one whose source sorts first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamSource {
    /// Query string.
    Query,
    /// Request body.
    Body,
    /// Path segment.
    Path,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
    /// Uploaded multipart file.
    Multipart,
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
            Self::Path => write!(f, "path"),
            Self::Header => write!(f, "header"),
            Self::Cookie => write!(f, "cookie"),
            Self::Multipart => write!(f, "multipart"),
        }
    }
}

/// Options shared by every source tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    /// Explicit lookup name. Blank means "use the parameter name".
    pub name: Option<String>,
    /// Whether a blank value after defaulting is an error.
    pub required: bool,
    /// Text substituted when the source has no value.
    pub default_value: String,
}

impl TagOptions {
    /// Returns the name to look up: the explicit name when it is non-blank,
    /// otherwise `param_name`.
    #[must_use]
    pub fn effective_name<'a>(&'a self, param_name: &'a str) -> &'a str {
        match self.name.as_deref() {
            Some(name) if !crate::is_blank(name) => name,
            _ => param_name,
        }
    }
}

/// Declarative metadata naming the request source of a parameter.
///
/// # Example
///
/// ```
/// use hermes_core::{ParamSource, SourceTag};
///
/// let tag = SourceTag::query().named("q").required();
/// assert_eq!(tag.source(), ParamSource::Query);
/// assert_eq!(tag.options().effective_name("search"), "q");
/// assert!(tag.options().required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTag {
    /// Read from the query string.
    Query(TagOptions),
    /// Read from the request body.
    Body(TagOptions),
    /// Read from a path segment.
    Path(TagOptions),
    /// Read from a header.
    Header(TagOptions),
    /// Read from a cookie.
    Cookie(TagOptions),
    /// Read from an uploaded file.
    Multipart(TagOptions),
}

impl SourceTag {
    /// A query tag with default options.
    #[must_use]
    pub fn query() -> Self {
        Self::Query(TagOptions::default())
    }

    /// A body tag with default options.
    #[must_use]
    pub fn body() -> Self {
        Self::Body(TagOptions::default())
    }

    /// A path tag with default options.
    #[must_use]
    pub fn path() -> Self {
        Self::Path(TagOptions::default())
    }

    /// A header tag with default options.
    #[must_use]
    pub fn header() -> Self {
        Self::Header(TagOptions::default())
    }

    /// A cookie tag with default options.
    #[must_use]
    pub fn cookie() -> Self {
        Self::Cookie(TagOptions::default())
    }

    /// A multipart file tag with default options.
    #[must_use]
    pub fn multipart() -> Self {
        Self::Multipart(TagOptions::default())
    }

    /// Sets the explicit lookup name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.options_mut().name = Some(name.into());
        self
    }

    /// Marks the parameter as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.options_mut().required = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.options_mut().default_value = value.into();
        self
    }

    /// Returns the source this tag reads from.
    #[must_use]
    pub fn source(&self) -> ParamSource {
        match self {
            Self::Query(_) => ParamSource::Query,
            Self::Body(_) => ParamSource::Body,
            Self::Path(_) => ParamSource::Path,
            Self::Header(_) => ParamSource::Header,
            Self::Cookie(_) => ParamSource::Cookie,
            Self::Multipart(_) => ParamSource::Multipart,
        }
    }

    /// Returns the tag options.
    #[must_use]
    pub fn options(&self) -> &TagOptions {
        match self {
            Self::Query(o)
            | Self::Body(o)
            | Self::Path(o)
            | Self::Header(o)
            | Self::Cookie(o)
            | Self::Multipart(o) => o,
        }
    }

    fn options_mut(&mut self) -> &mut TagOptions {
        match self {
            Self::Query(o)
            | Self::Body(o)
            | Self::Path(o)
            | Self::Header(o)
            | Self::Cookie(o)
            | Self::Multipart(o) => o,
        }
    }
}

/// One declared handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    name: String,
    ty: TypeDescriptor,
    tags: Vec<SourceTag>,
}

impl ParamSpec {
    /// Creates an untagged parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            tags: Vec::new(),
        }
    }

    /// Attaches a source tag.
    #[must_use]
    pub fn tag(mut self, tag: SourceTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    pub fn declared_type(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// Returns all attached tags in declaration order.
    #[must_use]
    pub fn tags(&self) -> &[SourceTag] {
        &self.tags
    }

    /// Returns the tag that governs this parameter.
    ///
    /// With several tags attached, the highest-priority source wins
    /// (`Query > Body > Path > Header > Cookie > Multipart`).
    #[must_use]
    pub fn effective_tag(&self) -> Option<&SourceTag> {
        self.tags.iter().min_by_key(|tag| tag.source())
    }

    /// Returns the options of the first tag for `source`, if attached.
    #[must_use]
    pub fn tag_for(&self, source: ParamSource) -> Option<&TagOptions> {
        self.tags
            .iter()
            .find(|tag| tag.source() == source)
            .map(SourceTag::options)
    }
}

/// Immutable descriptor of a handler's parameters.
///
/// Built once when the handler is registered and shared read-only by every
/// request routed to it.
///
/// # Example
///
/// ```
/// use hermes_core::{ContextKind, HandlerSignature, ParamSpec, SourceTag, TypeDescriptor};
///
/// let sig = HandlerSignature::new("getUser")
///     .param(ParamSpec::new("id", TypeDescriptor::int()).tag(SourceTag::path()))
///     .param(ParamSpec::new("req", TypeDescriptor::context(ContextKind::Request)));
///
/// assert_eq!(sig.name(), "getUser");
/// assert_eq!(sig.params().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerSignature {
    name: String,
    params: Vec<ParamSpec>,
}

impl HandlerSignature {
    /// Creates a signature with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Returns the handler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameters in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }
}
