//! Request and response validation failure types.
//!
//! A failed request validation produces one [`ValidationErrorItem`] per failing
//! location. The items are aggregated into a [`RequestValidationError`], which
//! renders the structured error map returned to the caller:
//!
//! ```json
//! {
//!   "query":   { "model": "Pagination", "errors": [...], "input": {...} },
//!   "headers": { "model": "AuthHeaders", "errors": [...], "input": {...} }
//! }
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Request location a declared model is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Query string.
    Query,
    /// Request body.
    Body,
    /// Request headers.
    Headers,
    /// Request cookies.
    Cookies,
}

impl Location {
    /// All locations, in validation order.
    pub const ALL: [Location; 4] = [Self::Query, Self::Body, Self::Headers, Self::Cookies];

    /// Returns the key used for this location in the error map.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Body => "body",
            Self::Headers => "headers",
            Self::Cookies => "cookies",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// JSON pointer to the failing field (empty for the document root).
    pub loc: String,
    /// Human-readable message.
    pub msg: String,
    /// Error kind, usually the failing schema keyword.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(loc: impl Into<String>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loc.is_empty() {
            write!(f, "{} ({})", self.msg, self.kind)
        } else {
            write!(f, "{}: {} ({})", self.loc, self.msg, self.kind)
        }
    }
}

/// All failures for one location of one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrorItem {
    /// Where the failing input came from.
    #[serde(skip)]
    pub location: Location,
    /// Name of the declared model.
    pub model: String,
    /// Field-level failures.
    pub errors: Vec<FieldError>,
    /// The parsed input that failed.
    pub input: Value,
}

/// Aggregated request validation failure.
///
/// Carries at most one item per [`Location`]; every location with a declared
/// model is attempted before this error is produced.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("request validation failed at {}", describe_locations(.items))]
pub struct RequestValidationError {
    items: Vec<ValidationErrorItem>,
}

impl RequestValidationError {
    /// Creates an empty error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the failure for one location.
    pub fn push(&mut self, item: ValidationErrorItem) {
        self.items.push(item);
    }

    /// Returns the collected items.
    #[must_use]
    pub fn items(&self) -> &[ValidationErrorItem] {
        &self.items
    }

    /// Returns the item for a given location, if that location failed.
    #[must_use]
    pub fn get(&self, location: Location) -> Option<&ValidationErrorItem> {
        self.items.iter().find(|item| item.location == location)
    }

    /// Returns the failing locations in the order they were validated.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.items.iter().map(|item| item.location)
    }

    /// Number of failing locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no location failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts into `Err(self)` when any location failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Renders the structured error map keyed by location.
    #[must_use]
    pub fn to_error_map(&self) -> Value {
        let map: IndexMap<&str, &ValidationErrorItem> = self
            .items
            .iter()
            .map(|item| (item.location.as_str(), item))
            .collect();
        serde_json::to_value(map).unwrap_or(Value::Null)
    }
}

fn describe_locations(items: &[ValidationErrorItem]) -> String {
    items
        .iter()
        .map(|item| item.location.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A handler response that does not conform to its declared model.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("response validation error: status {status} does not match model {model:?}")]
pub struct ResponseValidationError {
    /// Status code the handler returned.
    pub status: u16,
    /// Declared model for that status.
    pub model: String,
    /// Field-level failures.
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(location: Location, model: &str) -> ValidationErrorItem {
        ValidationErrorItem {
            location,
            model: model.to_string(),
            errors: vec![FieldError::new("/a", "\"foo\" is not of type \"integer\"", "type")],
            input: json!({"a": "foo"}),
        }
    }

    #[test]
    fn test_location_names() {
        assert_eq!(Location::Query.as_str(), "query");
        assert_eq!(Location::Cookies.to_string(), "cookies");
        assert_eq!(Location::ALL.len(), 4);
    }

    #[test]
    fn test_field_error_serializes_kind_as_type() {
        let err = FieldError::new("/a", "bad", "type");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, json!({"loc": "/a", "msg": "bad", "type": "type"}));
    }

    #[test]
    fn test_error_map_keys_by_location() {
        let mut err = RequestValidationError::new();
        err.push(item(Location::Headers, "Headers"));
        err.push(item(Location::Cookies, "Cookies"));

        let map = err.to_error_map();
        let object = map.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(map["headers"]["model"], "Headers");
        assert_eq!(map["cookies"]["input"], json!({"a": "foo"}));
        assert_eq!(map["cookies"]["errors"][0]["type"], "type");
        assert!(map["headers"].get("location").is_none());
    }

    #[test]
    fn test_display_lists_locations() {
        let mut err = RequestValidationError::new();
        err.push(item(Location::Query, "Q"));
        err.push(item(Location::Body, "B"));
        assert_eq!(err.to_string(), "request validation failed at query, body");
        assert_eq!(err.locations().collect::<Vec<_>>(), vec![Location::Query, Location::Body]);
        assert!(err.get(Location::Body).is_some());
        assert!(err.get(Location::Cookies).is_none());
    }

    #[test]
    fn test_into_result() {
        assert!(RequestValidationError::new().into_result().is_ok());

        let mut err = RequestValidationError::new();
        err.push(item(Location::Query, "Q"));
        assert_eq!(err.into_result().unwrap_err().len(), 1);
    }
}
