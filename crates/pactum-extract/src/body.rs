//! Request body decoding.
//!
//! The body is decoded according to the request's own `Content-Type`. Any
//! failure degrades to an empty object so model validation can report the
//! missing fields instead of the parser rejecting the request. A body over
//! the context's size limit, raw or after gzip decompression, is a failure.

use std::io::Read;

use flate2::read::GzDecoder;
use serde_json::{Map, Value};
use tracing::warn;

use crate::{decode_pairs, flatten_pairs, multipart::multipart_pairs, ExtractionContext, ExtractionError};

/// How a body is encoded, derived from its content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `application/json` or a `+json` suffix type.
    Json,
    /// `multipart/form-data`.
    Multipart,
    /// `application/x-www-form-urlencoded`.
    UrlEncoded,
    /// Anything else, passed through raw.
    Raw,
}

impl BodyEncoding {
    /// Classifies a `Content-Type` header value.
    ///
    /// ```rust
    /// use pactum_extract::BodyEncoding;
    ///
    /// assert_eq!(BodyEncoding::from_content_type(Some("application/json; charset=utf-8")), BodyEncoding::Json);
    /// assert_eq!(BodyEncoding::from_content_type(Some("application/problem+json")), BodyEncoding::Json);
    /// assert_eq!(BodyEncoding::from_content_type(Some("text/plain")), BodyEncoding::Raw);
    /// assert_eq!(BodyEncoding::from_content_type(None), BodyEncoding::Raw);
    /// ```
    #[must_use]
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(parsed) = content_type.and_then(|ct| ct.parse::<mime::Mime>().ok()) else {
            return Self::Raw;
        };

        let (type_, subtype) = (parsed.type_(), parsed.subtype());
        if subtype == mime::JSON || parsed.suffix() == Some(mime::JSON) {
            Self::Json
        } else if type_ == mime::APPLICATION && subtype == mime::WWW_FORM_URLENCODED {
            Self::UrlEncoded
        } else if type_ == mime::MULTIPART && subtype == mime::FORM_DATA {
            Self::Multipart
        } else {
            Self::Raw
        }
    }
}

/// Decodes the request body into a JSON value.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use http::{HeaderMap, HeaderValue, Method, Uri};
/// use pactum_extract::{parse_body, ExtractionContext};
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let mut headers = HeaderMap::new();
/// headers.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
/// let ctx = ExtractionContext::new(
///     Method::POST,
///     Uri::from_static("/items"),
///     headers,
///     Bytes::from_static(br#"{"name": "widget"}"#),
/// );
///
/// assert_eq!(parse_body(&ctx).await, json!({"name": "widget"}));
/// # });
/// ```
pub async fn parse_body(ctx: &ExtractionContext) -> Value {
    let body = ctx.body();
    if body.is_empty() {
        return empty_object();
    }
    if body.len() > ctx.max_body_size() {
        let err = ExtractionError::PayloadTooLarge {
            limit: ctx.max_body_size(),
        };
        warn!(error = %err, size = body.len(), "oversized body treated as empty");
        return empty_object();
    }

    match BodyEncoding::from_content_type(ctx.content_type()) {
        BodyEncoding::Json => match decode_json(ctx) {
            Ok(value) if is_falsy(&value) => empty_object(),
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "undecodable JSON body treated as empty");
                empty_object()
            }
        },
        BodyEncoding::Multipart => {
            let content_type = ctx.content_type().unwrap_or_default();
            match multipart_pairs(content_type, body.clone(), ctx.max_body_size()).await {
                Ok(pairs) => flatten_pairs(pairs),
                Err(err) => {
                    warn!(error = %err, "undecodable multipart body treated as empty");
                    empty_object()
                }
            }
        }
        BodyEncoding::UrlEncoded => {
            let decoded = std::str::from_utf8(body)
                .map_err(ExtractionError::from)
                .and_then(decode_pairs);
            match decoded {
                Ok(pairs) => flatten_pairs(pairs),
                Err(err) => {
                    warn!(error = %err, "undecodable form body treated as empty");
                    empty_object()
                }
            }
        }
        BodyEncoding::Raw => match std::str::from_utf8(body) {
            Ok(text) => Value::String(text.to_string()),
            Err(_) => Value::Array(body.iter().map(|b| Value::from(*b)).collect()),
        },
    }
}

fn decode_json(ctx: &ExtractionContext) -> Result<Value, ExtractionError> {
    let gzipped = ctx
        .content_encoding()
        .is_some_and(|encoding| encoding.to_ascii_lowercase().contains("gzip"));

    if gzipped {
        let limit = ctx.max_body_size();
        let mut decompressed = Vec::new();
        GzDecoder::new(ctx.body().as_ref())
            .take(limit as u64 + 1)
            .read_to_end(&mut decompressed)
            .map_err(ExtractionError::Decompress)?;
        if decompressed.len() > limit {
            return Err(ExtractionError::PayloadTooLarge { limit });
        }
        Ok(serde_json::from_slice(&decompressed)?)
    } else {
        Ok(serde_json::from_slice(ctx.body())?)
    }
}

/// `null`, `false`, zero, `""`, `[]` and `{}` all stand for "no body".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}
