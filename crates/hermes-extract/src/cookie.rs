//! `Cookie` header parsing.

use std::collections::HashMap;

use http::{header, HeaderMap};

/// Cookies sent with a request.
///
/// # Example
///
/// ```rust
/// use hermes_extract::Cookies;
/// use http::{header, HeaderMap, HeaderValue};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     header::COOKIE,
///     HeaderValue::from_static("session=abc123; theme=\"dark\""),
/// );
///
/// let cookies = Cookies::from_headers(&headers);
/// assert_eq!(cookies.get("session"), Some("abc123"));
/// assert_eq!(cookies.get("theme"), Some("dark"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    cookies: HashMap<String, String>,
}

impl Cookies {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every `Cookie` header in `headers`.
    ///
    /// Headers that are not visible ASCII are skipped. When a name repeats
    /// the first value is kept.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = Self::new();
        for value in headers.get_all(header::COOKIE) {
            if let Ok(value) = value.to_str() {
                cookies.parse_into(value);
            }
        }
        cookies
    }

    /// Parses a single `Cookie` header value.
    #[must_use]
    pub fn parse(header_value: &str) -> Self {
        let mut cookies = Self::new();
        cookies.parse_into(header_value);
        cookies
    }

    fn parse_into(&mut self, header_value: &str) {
        for cookie in header_value.split(';') {
            if let Some((name, value)) = cookie.trim().split_once('=') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                let value = value.trim().trim_matches('"');
                self.cookies
                    .entry(name.to_string())
                    .or_insert_with(|| value.to_string());
            }
        }
    }

    /// Returns the value of cookie `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Returns `true` if cookie `name` was sent.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Returns the number of cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Returns `true` if no cookie was sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Iterates all cookies in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
