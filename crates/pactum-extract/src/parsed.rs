//! The four parsed request locations.

use pactum_core::Location;
use serde_json::{Map, Value};

use crate::{headers_value, parse_body, parse_query, Cookies, ExtractionContext};

/// A request reduced to one JSON value per validation location.
///
/// Parsing never fails: each location degrades to an empty object when its
/// raw input cannot be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    /// Flattened query string.
    pub query: Value,
    /// Decoded body.
    pub body: Value,
    /// Lower-case header names to values.
    pub headers: Value,
    /// Cookie names to values.
    pub cookies: Value,
}

impl ParsedRequest {
    /// Parses every location of the request.
    ///
    /// ```rust
    /// use bytes::Bytes;
    /// use http::{HeaderMap, HeaderValue, Method, Uri};
    /// use pactum_core::Location;
    /// use pactum_extract::{ExtractionContext, ParsedRequest};
    /// use serde_json::json;
    ///
    /// # tokio_test::block_on(async {
    /// let mut headers = HeaderMap::new();
    /// headers.insert(http::header::COOKIE, HeaderValue::from_static("pub=k1"));
    /// let ctx = ExtractionContext::new(Method::GET, Uri::from_static("/?a=5"), headers, Bytes::new());
    ///
    /// let parsed = ParsedRequest::parse(&ctx).await;
    /// assert_eq!(parsed.get(Location::Query), &json!({"a": 5}));
    /// assert_eq!(parsed.get(Location::Cookies), &json!({"pub": "k1"}));
    /// assert_eq!(parsed.get(Location::Body), &json!({}));
    /// # });
    /// ```
    pub async fn parse(ctx: &ExtractionContext) -> Self {
        let mut parsed = Self::parse_without_body(ctx);
        parsed.body = parse_body(ctx).await;
        parsed
    }

    /// Parses query, headers and cookies. The body is left undecoded and
    /// reads as an empty object.
    #[must_use]
    pub fn parse_without_body(ctx: &ExtractionContext) -> Self {
        Self {
            query: parse_query(ctx.query_string()),
            body: Value::Object(Map::new()),
            headers: headers_value(ctx.headers()),
            cookies: Cookies::from_headers(ctx.headers()).to_value(),
        }
    }

    /// Returns the parsed value for a location.
    #[must_use]
    pub fn get(&self, location: Location) -> &Value {
        match location {
            Location::Query => &self.query,
            Location::Body => &self.body,
            Location::Headers => &self.headers,
            Location::Cookies => &self.cookies,
        }
    }
}
