//! Handler invocation context.
//!
//! A [`Signature`] bundles the handler's parameter metadata with the request
//! and response of the current invocation. It is what the resolver consumes
//! and what handlers declaring a `Signature` parameter receive.

use std::fmt;

use crate::request::RequestView;
use crate::response::Response;
use crate::signature::{HandlerSignature, ParamSpec};

/// One handler invocation: handler metadata plus the current request and
/// response.
///
/// # Example
///
/// ```
/// use hermes_core::{HandlerSignature, Response, Signature};
/// # use hermes_core::fixtures::EmptyRequest;
///
/// let handler = HandlerSignature::new("health");
/// let request = EmptyRequest::default();
/// let response = Response::new();
///
/// let sig = Signature::new(&handler, &request, &response);
/// assert_eq!(sig.handler().name(), "health");
/// assert!(sig.parameters().is_empty());
/// ```
#[derive(Clone, Copy)]
pub struct Signature<'a> {
    handler: &'a HandlerSignature,
    request: &'a dyn RequestView,
    response: &'a Response,
}

impl<'a> Signature<'a> {
    /// Creates an invocation for `handler`.
    #[must_use]
    pub fn new(
        handler: &'a HandlerSignature,
        request: &'a dyn RequestView,
        response: &'a Response,
    ) -> Self {
        Self {
            handler,
            request,
            response,
        }
    }

    /// Returns the handler metadata.
    #[must_use]
    pub fn handler(&self) -> &'a HandlerSignature {
        self.handler
    }

    /// Returns the handler's declared parameters.
    #[must_use]
    pub fn parameters(&self) -> &'a [ParamSpec] {
        self.handler.params()
    }

    /// Returns the current request.
    #[must_use]
    pub fn request(&self) -> &'a dyn RequestView {
        self.request
    }

    /// Returns the current response.
    #[must_use]
    pub fn response(&self) -> &'a Response {
        self.response
    }
}

impl fmt::Debug for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("handler", &self.handler.name())
            .field("parameters", &self.handler.params().len())
            .finish_non_exhaustive()
    }
}
