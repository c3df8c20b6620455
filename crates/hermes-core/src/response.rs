//! Response handle passed to handlers.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use parking_lot::Mutex;

/// Accumulated response state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseParts {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

/// The response of the current invocation.
///
/// Owned by the transport layer and handed to handlers by shared reference,
/// so writes go through an internal lock.
#[derive(Debug, Default)]
pub struct Response {
    parts: Mutex<ResponseParts>,
}

impl Response {
    /// Creates a `200 OK` response with no headers and an empty body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status code.
    pub fn set_status(&self, status: StatusCode) {
        self.parts.lock().status = status;
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.parts.lock().status
    }

    /// Sets a header, replacing existing values.
    pub fn set_header(&self, name: HeaderName, value: HeaderValue) {
        self.parts.lock().headers.insert(name, value);
    }

    /// Sets the body.
    pub fn set_body(&self, body: impl Into<Bytes>) {
        self.parts.lock().body = body.into();
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ResponseParts {
        self.parts.lock().clone()
    }

    /// Consumes the handle and returns the accumulated state.
    #[must_use]
    pub fn into_parts(self) -> ResponseParts {
        self.parts.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header;

    #[test]
    fn test_response_defaults() {
        let response = Response::new();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.snapshot().body.is_empty());
    }

    #[test]
    fn test_response_writes_through_shared_ref() {
        let response = Response::new();
        let shared = &response;
        shared.set_status(StatusCode::CREATED);
        shared.set_header(header::LOCATION, HeaderValue::from_static("/users/1"));
        shared.set_body("created");

        let parts = response.into_parts();
        assert_eq!(parts.status, StatusCode::CREATED);
        assert_eq!(parts.headers.get(header::LOCATION).unwrap(), "/users/1");
        assert_eq!(&parts.body[..], b"created");
    }
}
