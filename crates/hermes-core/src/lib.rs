//! # Hermes Core
//!
//! Core types for resolving handler arguments from HTTP requests.
//!
//! This crate provides the vocabulary shared by the resolver and the
//! transport layer:
//!
//! - [`HandlerSignature`] - Ordered parameter descriptors of one handler
//! - [`SourceTag`] - Declarative source of a parameter (query, path, ...)
//! - [`TypeDescriptor`] - Declared type of a parameter or model attribute
//! - [`Value`] / [`Arguments`] - Resolved argument values
//! - [`RequestView`] - Read-only request facade consumed by the resolver
//! - [`Signature`] - One handler invocation (handler + request + response)
//! - [`BindingError`] - The single error type of argument resolution

#![doc(html_root_url = "https://docs.rs/hermes-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod file;
pub mod fixtures;
mod invocation;
mod request;
mod response;
mod session;
mod signature;
mod types;
mod value;

pub use error::{BindingError, BindingResult};
pub use file::FileItem;
pub use invocation::Signature;
pub use request::{ParameterMap, RequestView};
pub use response::{Response, ResponseParts};
pub use session::Session;
pub use signature::{HandlerSignature, ParamSource, ParamSpec, SourceTag, TagOptions};
pub use types::{Attribute, ContextKind, ScalarKind, StructuredType, TypeDescriptor};
pub use value::{Arguments, ModelInstance, Value, ViewModel};

/// Returns `true` if the text is empty or only whitespace.
///
/// Blank text is treated as "no value" throughout argument resolution.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" a "));
    }
}
