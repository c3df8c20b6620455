//! Test fixtures for Hermes development and testing.
//!
//! Pre-built signatures, structured types and a request view with no data,
//! shared by tests across the workspace.
//!
//! # Example
//!
//! ```
//! use hermes_core::fixtures;
//!
//! let sig = fixtures::get_user_signature();
//! assert_eq!(sig.params().len(), 3);
//! ```

use indexmap::IndexMap;

use crate::file::FileItem;
use crate::request::{ParameterMap, RequestView};
use crate::session::Session;
use crate::signature::{HandlerSignature, ParamSpec, SourceTag};
use crate::types::{ContextKind, StructuredType, TypeDescriptor};

/// `getUser(id: int @Path, name: string @Query(required), req: Request)`.
#[must_use]
pub fn get_user_signature() -> HandlerSignature {
    HandlerSignature::new("getUser")
        .param(ParamSpec::new("id", TypeDescriptor::int()).tag(SourceTag::path()))
        .param(ParamSpec::new("name", TypeDescriptor::string()).tag(SourceTag::query().required()))
        .param(ParamSpec::new(
            "req",
            TypeDescriptor::context(ContextKind::Request),
        ))
}

/// A user-search filter: `{ age: int, name: string, score: double?, active: bool }`.
#[must_use]
pub fn user_filter_type() -> StructuredType {
    StructuredType::new("UserFilter")
        .attribute("age", TypeDescriptor::int())
        .attribute("name", TypeDescriptor::string())
        .attribute("score", TypeDescriptor::nullable(crate::ScalarKind::Double))
        .attribute("active", TypeDescriptor::bool())
}

/// An address with a nested structured attribute and a serialization
/// version marker, for exercising the one-level binding rules.
#[must_use]
pub fn address_type() -> StructuredType {
    StructuredType::new("Address")
        .attribute("serial_version_uid", TypeDescriptor::long())
        .attribute("street", TypeDescriptor::string())
        .attribute("zip", TypeDescriptor::int())
        .attribute(
            "geo",
            TypeDescriptor::structured(
                StructuredType::new("Geo")
                    .attribute("lat", TypeDescriptor::double())
                    .attribute("lng", TypeDescriptor::double()),
            ),
        )
}

/// A request with no query, body, headers, cookies or files.
#[derive(Debug, Default)]
pub struct EmptyRequest {
    files: IndexMap<String, FileItem>,
    session: Session,
}

impl RequestView for EmptyRequest {
    fn query(&self, _name: &str) -> Option<&str> {
        None
    }

    fn body_bytes(&self) -> &[u8] {
        &[]
    }

    fn path_param(&self, _name: &str) -> Option<&str> {
        None
    }

    fn header(&self, _name: &str) -> Option<&str> {
        None
    }

    fn cookie(&self, _name: &str) -> Option<&str> {
        None
    }

    fn file_items(&self) -> &IndexMap<String, FileItem> {
        &self.files
    }

    fn session(&self) -> Session {
        self.session.clone()
    }

    fn parameters(&self) -> ParameterMap {
        ParameterMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::ParamSource;

    #[test]
    fn test_get_user_signature_shape() {
        let sig = get_user_signature();
        let params = sig.params();
        assert_eq!(params[0].name(), "id");
        assert_eq!(
            params[0].effective_tag().map(SourceTag::source),
            Some(ParamSource::Path)
        );
        assert!(params[1].tag_for(ParamSource::Query).is_some_and(|o| o.required));
        assert_eq!(
            params[2].declared_type().as_context(),
            Some(ContextKind::Request)
        );
    }

    #[test]
    fn test_empty_request() {
        let req = EmptyRequest::default();
        assert!(req.query("a").is_none());
        assert!(req.body_bytes().is_empty());
        assert_eq!(req.body_len(), 0);
        assert!(req.file_item("f").is_none());
        assert!(req.parameters().is_empty());
    }
}
