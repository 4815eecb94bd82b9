//! Query string and multi-valued form flattening.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;

use crate::ExtractionError;

/// Flattens ordered key/value pairs into a JSON object.
///
/// A key seen once maps to its value parsed as JSON when that succeeds
/// (`5` becomes a number, `true` a boolean) and to the raw string otherwise.
/// A key seen several times maps to an array of its raw strings, in order.
///
/// # Example
///
/// ```rust
/// use pactum_extract::flatten_pairs;
/// use serde_json::json;
///
/// let pairs = vec![
///     ("a".to_string(), "5".to_string()),
///     ("tag".to_string(), "x".to_string()),
///     ("tag".to_string(), "y".to_string()),
///     ("name".to_string(), "foo".to_string()),
/// ];
/// assert_eq!(
///     flatten_pairs(pairs),
///     json!({"a": 5, "tag": ["x", "y"], "name": "foo"})
/// );
/// ```
#[must_use]
pub fn flatten_pairs(pairs: Vec<(String, String)>) -> Value {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in pairs {
        grouped.entry(key).or_default().push(value);
    }

    let object: Map<String, Value> = grouped
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                let raw = values.remove(0);
                serde_json::from_str(&raw).unwrap_or(Value::String(raw))
            } else {
                Value::Array(values.into_iter().map(Value::String).collect())
            };
            (key, value)
        })
        .collect();

    Value::Object(object)
}

/// Decodes a URL-encoded string into ordered pairs.
pub fn decode_pairs(encoded: &str) -> Result<Vec<(String, String)>, ExtractionError> {
    Ok(serde_urlencoded::from_str(encoded)?)
}

/// Parses a query string into a flattened JSON object.
///
/// A missing or malformed query string yields an empty object.
#[must_use]
pub fn parse_query(query: Option<&str>) -> Value {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Value::Object(Map::new());
    };

    match decode_pairs(query) {
        Ok(pairs) => flatten_pairs(pairs),
        Err(err) => {
            warn!(error = %err, "ignoring malformed query string");
            Value::Object(Map::new())
        }
    }
}
