//! Extraction context providing access to request data.

use bytes::Bytes;
use http::{header, request::Parts, HeaderMap, Method, Uri};

/// Default limit on a request body, before and after decompression (1 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// The parts of a request the parser reads.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use http::{HeaderMap, HeaderValue, Method, Uri};
/// use pactum_extract::ExtractionContext;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
///
/// let ctx = ExtractionContext::new(
///     Method::POST,
///     Uri::from_static("/users?dry_run=true"),
///     headers,
///     Bytes::from_static(b"{}"),
/// );
///
/// assert_eq!(ctx.query_string(), Some("dry_run=true"));
/// assert_eq!(ctx.content_type(), Some("application/json"));
/// assert_eq!(ctx.max_body_size(), pactum_extract::DEFAULT_MAX_BODY_SIZE);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    max_body_size: usize,
}

impl ExtractionContext {
    /// Creates a new extraction context.
    #[must_use]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Sets the largest body, in bytes, the decoders will accept.
    ///
    /// The limit applies to the raw body and again to a decompressed one.
    #[must_use]
    pub fn with_max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    /// Creates a context from request parts and a collected body.
    #[must_use]
    pub fn from_parts(parts: &Parts, body: Bytes) -> Self {
        Self::new(
            parts.method.clone(),
            parts.uri.clone(),
            parts.headers.clone(),
            body,
        )
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the raw query string, without the `?`.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body size limit in bytes.
    #[must_use]
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    /// Returns the `Content-Type` header, if present and readable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE)
    }

    /// Returns the `Content-Encoding` header, if present and readable.
    #[must_use]
    pub fn content_encoding(&self) -> Option<&str> {
        self.header_str(header::CONTENT_ENCODING)
    }

    fn header_str(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
