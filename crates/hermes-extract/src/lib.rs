//! # Hermes Extract
//!
//! Handler argument resolution for the Hermes framework.
//!
//! Given a handler's declared parameters and an incoming request, this crate
//! produces the ordered argument list the handler is invoked with. Values are
//! pulled from the request, coerced to their declared scalar type, or bound
//! onto structured types.
//!
//! ## Sources
//!
//! | Source | Request part | Module |
//! |--------|--------------|--------|
//! | `Query` | Query string and form fields | [`sources::query`] |
//! | `Path` | Captured path segments | [`sources::path`] |
//! | `Header` | Headers (case-insensitive) | [`sources::header`] |
//! | `Cookie` | `Cookie` headers | [`sources::cookie`] |
//! | `Body` | Raw body or JSON object | [`json`] |
//! | `Multipart` | Uploaded files | [`sources::file`] |
//!
//! Context types (request, response, session, ...) are injected by
//! [`inject`] and never read from a source.
//!
//! ## Example
//!
//! ```rust
//! use hermes_core::{HandlerSignature, ParamSpec, Response, Signature, SourceTag, TypeDescriptor, Value};
//! use hermes_extract::{ArgumentResolver, ExtractionContextBuilder};
//!
//! let handler = HandlerSignature::new("list_users")
//!     .param(ParamSpec::new("page", TypeDescriptor::int()).tag(SourceTag::query().default_value("1")))
//!     .param(ParamSpec::new("tenant", TypeDescriptor::string()).tag(SourceTag::header().named("X-Tenant")));
//!
//! let request = ExtractionContextBuilder::new()
//!     .uri("/users")
//!     .header("x-tenant", "acme")
//!     .build();
//! let response = Response::new();
//! let sig = Signature::new(&handler, &request, &response);
//!
//! let args = ArgumentResolver::new().resolve(&sig).unwrap();
//! assert_eq!(args[0], Value::Int(1));
//! assert_eq!(args[1], Value::Str("acme".into()));
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`hermes_core::BindingError`], which maps to an HTTP
//! status code. Absent optional data is never an error.

#![doc(html_root_url = "https://docs.rs/hermes-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod coerce;
mod context;
mod cookie;
pub mod inject;
pub mod json;
mod model;
mod multipart;
mod params;
mod query;
mod resolver;
pub mod sources;

pub use coerce::{coerce, CoercionError};
pub use context::{ExtractionContext, ExtractionContextBuilder};
pub use cookie::Cookies;
pub use model::ModelBinder;
pub use multipart::{
    Multipart, MultipartConfig, MultipartError, MultipartForm, Part, DEFAULT_MAX_BODY_SIZE,
    DEFAULT_MAX_FIELDS, DEFAULT_MAX_FIELD_SIZE,
};
pub use params::Params;
pub use query::QueryPairs;
pub use resolver::ArgumentResolver;
