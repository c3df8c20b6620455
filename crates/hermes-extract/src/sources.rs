//! Per-source value extraction.
//!
//! Each extractor looks up the raw text for one tagged parameter, applies
//! the tag's default and enforces `required`:
//!
//! | Source | Counts as absent | Default substituted when |
//! |--------|------------------|--------------------------|
//! | query | key not sent | absent |
//! | path | segment missing or `""` | absent |
//! | header | header missing or blank | absent |
//! | cookie | cookie not sent | absent |
//!
//! A required parameter whose text is still blank after defaulting fails
//! with [`BindingError::MissingRequiredParameter`].

use hermes_core::{is_blank, BindingError, FileItem, ParamSource, RequestView, TagOptions};

/// Returns the query text for a `Query`-tagged scalar.
pub fn query<'v>(
    request: &'v dyn RequestView,
    param: &str,
    opts: &'v TagOptions,
) -> Result<&'v str, BindingError> {
    let raw = request.query(opts.effective_name(param));
    with_default(raw, opts, param, ParamSource::Query)
}

/// Returns the path segment for a `Path`-tagged scalar.
pub fn path<'v>(
    request: &'v dyn RequestView,
    param: &str,
    opts: &'v TagOptions,
) -> Result<&'v str, BindingError> {
    let raw = request
        .path_param(opts.effective_name(param))
        .filter(|v| !v.is_empty());
    with_default(raw, opts, param, ParamSource::Path)
}

/// Returns the header value for a `Header`-tagged scalar, optionally
/// trimmed.
pub fn header<'v>(
    request: &'v dyn RequestView,
    param: &str,
    opts: &'v TagOptions,
    trim: bool,
) -> Result<&'v str, BindingError> {
    let raw = request
        .header(opts.effective_name(param))
        .map(|v| if trim { v.trim() } else { v })
        .filter(|v| !is_blank(v));
    with_default(raw, opts, param, ParamSource::Header)
}

/// Returns the cookie value for a `Cookie`-tagged scalar.
pub fn cookie<'v>(
    request: &'v dyn RequestView,
    param: &str,
    opts: &'v TagOptions,
) -> Result<&'v str, BindingError> {
    let raw = request.cookie(opts.effective_name(param));
    with_default(raw, opts, param, ParamSource::Cookie)
}

/// Returns the whole body as text.
///
/// # Errors
///
/// - [`BindingError::PayloadTooLarge`] when the body is longer than
///   `max_size` bytes
/// - [`BindingError::MalformedBody`] when the body is not valid UTF-8
pub fn body(request: &dyn RequestView, max_size: usize) -> Result<&str, BindingError> {
    let len = request.body_len();
    if len > max_size {
        return Err(BindingError::payload_too_large(max_size, len));
    }
    std::str::from_utf8(request.body_bytes())
        .map_err(|e| BindingError::malformed_body(format!("body is not valid UTF-8: {e}")))
}

/// Returns the file uploaded under form field `name`.
pub fn file<'v>(request: &'v dyn RequestView, name: &str) -> Option<&'v FileItem> {
    request.file_item(name)
}

/// Returns the first uploaded file, in upload order.
pub fn first_file(request: &dyn RequestView) -> Option<&FileItem> {
    request.file_items().values().next()
}

/// Substitutes the tag default for an absent value and enforces
/// `required` against the result.
///
/// # Errors
///
/// Returns [`BindingError::MissingRequiredParameter`] naming `param` when
/// the tag is required and the value is blank after substitution.
///
/// # Example
///
/// ```rust
/// use hermes_core::{ParamSource, SourceTag};
/// use hermes_extract::sources::with_default;
///
/// let tag = SourceTag::query().default_value("10");
/// assert_eq!(with_default(None, tag.options(), "limit", ParamSource::Query).unwrap(), "10");
/// assert_eq!(with_default(Some("5"), tag.options(), "limit", ParamSource::Query).unwrap(), "5");
///
/// let tag = SourceTag::query().required();
/// assert!(with_default(Some(" "), tag.options(), "q", ParamSource::Query).is_err());
/// ```
pub fn with_default<'v>(
    raw: Option<&'v str>,
    opts: &'v TagOptions,
    param: &str,
    location: ParamSource,
) -> Result<&'v str, BindingError> {
    let value = raw.unwrap_or(opts.default_value.as_str());
    if opts.required && is_blank(value) {
        return Err(BindingError::missing(location, param));
    }
    Ok(value)
}
