//! Cookie extraction.
//!
//! Cookies are read from every `Cookie` header on the request. When a name
//! repeats, the last occurrence wins.

use http::{header, HeaderMap};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Cookies parsed from a request.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, HeaderValue};
/// use pactum_extract::Cookies;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     http::header::COOKIE,
///     HeaderValue::from_static("session=abc123; theme=\"dark\""),
/// );
///
/// let cookies = Cookies::from_headers(&headers);
/// assert_eq!(cookies.get("session"), Some("abc123"));
/// assert_eq!(cookies.get("theme"), Some("dark"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    cookies: IndexMap<String, String>,
}

impl Cookies {
    /// Creates an empty cookie set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses all `Cookie` headers in `headers`.
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
                self.cookies.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// Returns a cookie value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Iterates cookies in the order they were first seen.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct cookie names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// True when the request carried no cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Converts the cookies into a JSON object of strings.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let object: Map<String, Value> = self
            .cookies
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(object)
    }
}
