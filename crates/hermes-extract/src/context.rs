//! Concrete request view built from `http` types.
//!
//! [`ExtractionContext`] is what the transport layer hands to the resolver.
//! It owns the request parts and parses the query string and cookies on
//! first use.

use std::sync::OnceLock;

use bytes::Bytes;
use hermes_core::{FileItem, ParameterMap, RequestView, Session};
use http::{header, HeaderMap, HeaderName, HeaderValue, Method, Uri};
use indexmap::IndexMap;

use crate::cookie::Cookies;
use crate::multipart::MultipartForm;
use crate::params::Params;
use crate::query::QueryPairs;

/// Request data for one handler invocation.
///
/// Query lookups see the URI query string, then the fields of an
/// `application/x-www-form-urlencoded` body, then multipart text fields.
/// The first occurrence of a key wins.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use hermes_core::RequestView;
/// use hermes_extract::{ExtractionContext, Params};
/// use http::{HeaderMap, Method, Uri};
///
/// let mut params = Params::new();
/// params.push("id", "42");
///
/// let ctx = ExtractionContext::new(
///     Method::GET,
///     Uri::from_static("/users/42?name=alice"),
///     HeaderMap::new(),
///     Bytes::new(),
///     params,
/// );
///
/// assert_eq!(ctx.path_param("id"), Some("42"));
/// assert_eq!(ctx.query("name"), Some("alice"));
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    path_params: Params,
    files: IndexMap<String, FileItem>,
    form_fields: Vec<(String, String)>,
    session: Session,
    query: OnceLock<QueryPairs>,
    cookies: OnceLock<Cookies>,
}

impl ExtractionContext {
    /// Creates a context with no uploaded files and a fresh session.
    #[must_use]
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        path_params: Params,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            path_params,
            files: IndexMap::new(),
            form_fields: Vec::new(),
            session: Session::new(),
            query: OnceLock::new(),
            cookies: OnceLock::new(),
        }
    }

    /// Starts a builder.
    #[must_use]
    pub fn builder() -> ExtractionContextBuilder {
        ExtractionContextBuilder::new()
    }

    /// Attaches uploaded files. Files keep their order; a repeated field
    /// name keeps its first file.
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = FileItem>) -> Self {
        for file in files {
            if !self.files.contains_key(file.name()) {
                self.files.insert(file.name().to_string(), file);
            }
        }
        self
    }

    /// Attaches text fields of a multipart body, visible to query lookups.
    #[must_use]
    pub fn with_form_fields(mut self, fields: impl IntoIterator<Item = (String, String)>) -> Self {
        self.form_fields.extend(fields);
        self.query = OnceLock::new();
        self
    }

    /// Attaches the request's session.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the captured path segments.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }

    /// Returns the parsed `Content-Type`.
    #[must_use]
    pub fn content_type(&self) -> Option<mime::Mime> {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }

    /// Returns the decoded query pairs, parsing them on first call.
    pub fn query_pairs(&self) -> &QueryPairs {
        self.query.get_or_init(|| {
            let mut raw = self.uri.query().unwrap_or_default().to_string();
            if self.has_form_body() {
                if !raw.is_empty() {
                    raw.push('&');
                }
                raw.push_str(&String::from_utf8_lossy(&self.body));
            }
            let mut pairs = QueryPairs::parse(&raw);
            pairs.extend(self.form_fields.iter().cloned());
            pairs
        })
    }

    /// Returns the request cookies, parsing them on first call.
    pub fn cookies(&self) -> &Cookies {
        self.cookies
            .get_or_init(|| Cookies::from_headers(&self.headers))
    }

    fn has_form_body(&self) -> bool {
        !self.body.is_empty()
            && self.content_type().is_some_and(|ct| {
                ct.type_() == mime::APPLICATION && ct.subtype() == mime::WWW_FORM_URLENCODED
            })
    }
}

impl RequestView for ExtractionContext {
    fn query(&self, name: &str) -> Option<&str> {
        self.query_pairs().get(name)
    }

    fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    fn body_len(&self) -> usize {
        self.body.len()
    }

    fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params.get(name)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies().get(name)
    }

    fn file_items(&self) -> &IndexMap<String, FileItem> {
        &self.files
    }

    fn session(&self) -> Session {
        self.session.clone()
    }

    fn parameters(&self) -> ParameterMap {
        self.query_pairs().to_parameter_map()
    }
}

/// Builder for [`ExtractionContext`], mostly used by tests and adapters.
///
/// # Example
///
/// ```rust
/// use hermes_core::RequestView;
/// use hermes_extract::ExtractionContextBuilder;
///
/// let ctx = ExtractionContextBuilder::new()
///     .uri("/search?q=rust")
///     .header("X-Request-Id", "r-1")
///     .path_param("tenant", "acme")
///     .build();
///
/// assert_eq!(ctx.query("q"), Some("rust"));
/// assert_eq!(ctx.header("x-request-id"), Some("r-1"));
/// assert_eq!(ctx.path_param("tenant"), Some("acme"));
/// ```
#[derive(Debug, Default)]
pub struct ExtractionContextBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Bytes,
    path_params: Params,
    files: Vec<FileItem>,
    form_fields: Vec<(String, String)>,
    session: Option<Session>,
}

impl ExtractionContextBuilder {
    /// Creates a builder for `GET /`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI. An unparsable URI leaves the previous one in place.
    #[must_use]
    pub fn uri(mut self, uri: &str) -> Self {
        match uri.parse::<Uri>() {
            Ok(uri) => self.uri = Some(uri),
            Err(e) => tracing::debug!(uri, error = %e, "ignoring invalid uri"),
        }
        self
    }

    /// Replaces all headers.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Appends a header. Invalid names or values are skipped.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Appends a `Cookie` header with a single cookie.
    #[must_use]
    pub fn cookie(self, name: &str, value: &str) -> Self {
        self.header(header::COOKIE.as_str(), &format!("{name}={value}"))
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a JSON body and its content type.
    #[must_use]
    pub fn json(self, body: &serde_json::Value) -> Self {
        self.header(header::CONTENT_TYPE.as_str(), mime::APPLICATION_JSON.as_ref())
            .body(body.to_string())
    }

    /// Adds a captured path segment.
    #[must_use]
    pub fn path_param(mut self, name: &str, value: &str) -> Self {
        self.path_params.push(name, value);
        self
    }

    /// Replaces all captured path segments.
    #[must_use]
    pub fn path_params(mut self, params: Params) -> Self {
        self.path_params = params;
        self
    }

    /// Adds an uploaded file.
    #[must_use]
    pub fn file(mut self, file: FileItem) -> Self {
        self.files.push(file);
        self
    }

    /// Adds files produced by [`Multipart::collect_files`].
    ///
    /// [`Multipart::collect_files`]: crate::Multipart::collect_files
    #[must_use]
    pub fn multipart_files(mut self, files: impl IntoIterator<Item = FileItem>) -> Self {
        self.files.extend(files);
        self
    }

    /// Adds the fields and files of a parsed multipart body.
    #[must_use]
    pub fn multipart_form(mut self, form: MultipartForm) -> Self {
        self.form_fields.extend(form.fields);
        self.files.extend(form.files);
        self
    }

    /// Sets the session.
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Builds the context.
    #[must_use]
    pub fn build(self) -> ExtractionContext {
        let ctx = ExtractionContext::new(
            self.method.unwrap_or(Method::GET),
            self.uri.unwrap_or_else(|| Uri::from_static("/")),
            self.headers,
            self.body,
            self.path_params,
        )
        .with_files(self.files)
        .with_form_fields(self.form_fields);

        match self.session {
            Some(session) => ctx.with_session(session),
            None => ctx,
        }
    }
}
