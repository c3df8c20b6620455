//! # Hermes
//!
//! **Handler argument resolution for HTTP frameworks**
//!
//! Hermes turns an incoming request into the exact, ordered argument list a
//! handler is invoked with:
//!
//! - **Six sources**: query string, path segments, headers, cookies, body and
//!   multipart uploads, selected by declarative source tags
//! - **Type coercion**: text to `int`, `long`, `double`, `float`, `byte`,
//!   `bool` or `string`, with documented fallbacks for blank input
//! - **Model binding**: structured types populated from `prefix[attr]` keys or
//!   a JSON body
//! - **Context injection**: request, response, session, parameter map,
//!   uploaded file and view model
//!
//! ## Quick Start
//!
//! ```rust
//! use hermes::prelude::*;
//!
//! let handler = HandlerSignature::new("getUser")
//!     .param(ParamSpec::new("id", TypeDescriptor::int()).tag(SourceTag::path()))
//!     .param(ParamSpec::new("name", TypeDescriptor::string()).tag(SourceTag::query().required()))
//!     .param(ParamSpec::new("req", TypeDescriptor::context(ContextKind::Request)));
//!
//! let request = ExtractionContextBuilder::new()
//!     .uri("/users/42?name=alice")
//!     .path_param("id", "42")
//!     .build();
//! let response = Response::new();
//! let sig = Signature::new(&handler, &request, &response);
//!
//! let args = Hermes::default().resolve(&sig).unwrap();
//! assert_eq!(args[0], Value::Int(42));
//! assert_eq!(args[1], Value::Str("alice".into()));
//! ```
//!
//! ## Crates
//!
//! ```text
//! hermes ─┬─ hermes-extract ─┬─ hermes-core
//!         │                  └─ hermes-config ── hermes-telemetry
//!         └─ hermes-telemetry
//! ```

#![doc(html_root_url = "https://docs.rs/hermes/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod error;

pub use engine::Hermes;
pub use error::HermesError;

// Re-export core types
pub use hermes_core as core;

// Re-export extraction types
pub use hermes_extract as extract;

// Re-export configuration types
pub use hermes_config as config;

// Re-export telemetry types
pub use hermes_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use hermes::prelude::*;
///
/// let resolver = ArgumentResolver::new();
/// assert_eq!(resolver.config(), &BindingConfig::default());
/// ```
pub mod prelude {
    pub use crate::{Hermes, HermesError};

    pub use hermes_core::{
        fixtures, Arguments, BindingError, ContextKind, FileItem, HandlerSignature,
        ModelInstance, ParamSource, ParamSpec, RequestView, Response, ScalarKind, Session,
        Signature, SourceTag, StructuredType, TypeDescriptor, Value, ViewModel,
    };

    pub use hermes_extract::{
        ArgumentResolver, ExtractionContext, ExtractionContextBuilder, ModelBinder, Multipart,
        MultipartConfig, MultipartError, Params,
    };

    pub use hermes_config::{BindingConfig, ConfigLoader, HermesConfig};

    pub use hermes_telemetry::{init_logging, LogConfig};
}
