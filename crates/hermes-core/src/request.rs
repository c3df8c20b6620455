//! Read-only request facade.

use std::fmt;

use indexmap::IndexMap;

use crate::file::FileItem;
use crate::session::Session;

/// Request parameters by name, in request order.
pub type ParameterMap = IndexMap<String, String>;

/// Read-only view of one request, as seen by argument resolution.
///
/// Implemented by the transport layer. A view lives for one request and is
/// never shared across concurrent invocations.
pub trait RequestView: fmt::Debug + Send + Sync {
    /// Returns the first query value for `name`.
    fn query(&self, name: &str) -> Option<&str>;

    /// Returns the raw request body.
    fn body_bytes(&self) -> &[u8];

    /// Returns the body size in bytes.
    fn body_len(&self) -> usize {
        self.body_bytes().len()
    }

    /// Returns the path segment captured as `name`.
    fn path_param(&self, name: &str) -> Option<&str>;

    /// Returns the value of header `name` (case-insensitive).
    fn header(&self, name: &str) -> Option<&str>;

    /// Returns the value of cookie `name`.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Returns all uploaded files keyed by form field name.
    fn file_items(&self) -> &IndexMap<String, FileItem>;

    /// Returns the uploaded file for form field `name`.
    fn file_item(&self, name: &str) -> Option<&FileItem> {
        self.file_items().get(name)
    }

    /// Returns the session handle.
    fn session(&self) -> Session;

    /// Returns every request parameter.
    fn parameters(&self) -> ParameterMap;
}
