//! Framework context injection.
//!
//! Context-typed parameters are bound by table lookup on their
//! [`ContextKind`], before and regardless of any source tag.

use hermes_core::{ContextKind, Signature, Value, ViewModel};

/// Produces the argument for one context kind.
pub type ContextBinder = for<'a> fn(&'a Signature<'a>) -> Value<'a>;

static BINDERS: [(ContextKind, ContextBinder); 8] = [
    (ContextKind::Signature, bind_signature as ContextBinder),
    (ContextKind::Request, bind_request as ContextBinder),
    (ContextKind::Response, bind_response as ContextBinder),
    (ContextKind::Session, bind_session as ContextBinder),
    (ContextKind::LegacySession, bind_session as ContextBinder),
    (ContextKind::Parameters, bind_parameters as ContextBinder),
    (ContextKind::File, bind_first_file as ContextBinder),
    (ContextKind::ViewModel, bind_view_model as ContextBinder),
];

/// Returns the binder registered for `kind`.
#[must_use]
pub fn binder_for(kind: ContextKind) -> Option<ContextBinder> {
    BINDERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, binder)| *binder)
}

/// Binds a context-typed parameter.
///
/// # Example
///
/// ```rust
/// use hermes_core::{ContextKind, HandlerSignature, Response, Signature};
/// use hermes_extract::{inject, ExtractionContextBuilder};
///
/// let handler = HandlerSignature::new("index");
/// let request = ExtractionContextBuilder::new().build();
/// let response = Response::new();
/// let sig = Signature::new(&handler, &request, &response);
///
/// let value = inject::inject(ContextKind::Response, &sig);
/// assert!(std::ptr::eq(value.as_response().unwrap(), &response));
/// ```
#[must_use]
pub fn inject<'a>(kind: ContextKind, sig: &'a Signature<'a>) -> Value<'a> {
    binder_for(kind).map_or(Value::Absent, |binder| binder(sig))
}

fn bind_signature<'a>(sig: &'a Signature<'a>) -> Value<'a> {
    Value::Signature(sig)
}

fn bind_request<'a>(sig: &'a Signature<'a>) -> Value<'a> {
    Value::Request(sig.request())
}

fn bind_response<'a>(sig: &'a Signature<'a>) -> Value<'a> {
    Value::Response(sig.response())
}

fn bind_session<'a>(sig: &'a Signature<'a>) -> Value<'a> {
    Value::Session(sig.request().session())
}

fn bind_parameters<'a>(sig: &'a Signature<'a>) -> Value<'a> {
    Value::Parameters(sig.request().parameters())
}

fn bind_first_file<'a>(sig: &'a Signature<'a>) -> Value<'a> {
    match crate::sources::first_file(sig.request()) {
        Some(file) => Value::File(file.clone()),
        None => {
            tracing::debug!(handler = sig.handler().name(), "no uploaded file to inject");
            Value::Absent
        }
    }
}

fn bind_view_model<'a>(_sig: &'a Signature<'a>) -> Value<'a> {
    Value::ViewModel(ViewModel::new())
}
