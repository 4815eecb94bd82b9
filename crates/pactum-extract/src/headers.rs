//! Header flattening.

use http::HeaderMap;
use serde_json::{Map, Value};

/// Converts request headers into a JSON object keyed by lower-case name.
///
/// When a header repeats, the last value wins. Values that are not valid
/// visible ASCII are skipped.
///
/// # Example
///
/// ```rust
/// use http::{HeaderMap, HeaderValue};
/// use pactum_extract::headers_value;
/// use serde_json::json;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("X-Request-Id", HeaderValue::from_static("r-1"));
/// assert_eq!(headers_value(&headers), json!({"x-request-id": "r-1"}));
/// ```
#[must_use]
pub fn headers_value(headers: &HeaderMap) -> Value {
    let mut object = Map::new();
    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            object.insert(name.as_str().to_string(), Value::String(value.to_string()));
        }
    }
    Value::Object(object)
}
