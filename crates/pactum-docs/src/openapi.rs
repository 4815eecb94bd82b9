//! OpenAPI document types.
//!
//! Only the parts of the OpenAPI 3 object model the builder emits are
//! represented. Schemas are kept as raw JSON values since they come out of
//! the schema registry already in document form.
//!
//! <https://spec.openapis.org/oas/v3.0.3>

use indexmap::IndexMap;
use pactum_core::ParameterSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operation parameters are the route and model derived specs as-is.
pub type Parameter = ParameterSpec;

/// OpenAPI document root object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    /// OpenAPI version, e.g. "3.0.3".
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Tags in first-seen order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Document path to operations.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable component schemas.
    #[serde(default)]
    pub components: Components,
}

impl OpenApi {
    /// Looks up the operation for a document path and lower-case method.
    #[must_use]
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.get(method))
    }

    /// Serializes the document as JSON bytes.
    pub fn to_json(&self) -> Result<bytes::Bytes, serde_json::Error> {
        serde_json::to_vec(self).map(bytes::Bytes::from)
    }
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Document tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations available on one path, keyed by lower-case method name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathItem {
    operations: IndexMap<String, Operation>,
}

impl PathItem {
    /// Returns the operation for a lower-case method name.
    #[must_use]
    pub fn get(&self, method: &str) -> Option<&Operation> {
        self.operations.get(method)
    }

    /// Sets the operation for a lower-case method name.
    pub fn insert(&mut self, method: impl Into<String>, operation: Operation) {
        self.operations.insert(method.into(), operation);
    }

    /// Iterates methods and operations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.operations.iter().map(|(m, op)| (m.as_str(), op))
    }

    /// Number of operations on this path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True when no operation is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// A single API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Camel-cased handler name.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Short summary.
    pub summary: String,
    /// Longer description, empty when the handler has none.
    pub description: String,
    /// Tags for grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether the operation is deprecated.
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Path, query, header and cookie parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(rename = "requestBody", default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

/// Request body definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Content by media type.
    pub content: IndexMap<String, MediaType>,
}

/// Schema for one media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Body schema.
    pub schema: Value,
}

impl MediaType {
    /// A media type whose schema references a component.
    #[must_use]
    pub fn reference(name: &str) -> Self {
        Self {
            schema: serde_json::json!({ "$ref": format!("{}{name}", pactum_schema::COMPONENTS_PREFIX) }),
        }
    }
}

/// Response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response description.
    pub description: String,
    /// Content by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    /// A response carrying no body schema.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: IndexMap::new(),
        }
    }

    /// Adds a media type to the response.
    #[must_use]
    pub fn with_content(mut self, content_type: impl Into<String>, media: MediaType) -> Self {
        self.content.insert(content_type.into(), media);
        self
    }
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Flattened model schemas by name.
    #[serde(default)]
    pub schemas: IndexMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn operation() -> Operation {
        Operation {
            operation_id: "getItem".to_string(),
            summary: "Get an item".to_string(),
            description: String::new(),
            tags: vec![],
            deprecated: false,
            parameters: vec![ParameterSpec::path("id", json!({"type": "integer"}))],
            request_body: None,
            responses: IndexMap::from([(
                "200".to_string(),
                Response::described("OK").with_content("application/json", MediaType::reference("Item")),
            )]),
        }
    }

    #[test]
    fn test_operation_serialization() {
        let value = serde_json::to_value(operation()).unwrap();
        assert_eq!(value["operationId"], "getItem");
        assert_eq!(value["description"], "");
        assert!(value.get("deprecated").is_none());
        assert!(value.get("tags").is_none());
        assert!(value.get("requestBody").is_none());
        assert_eq!(value["parameters"][0]["in"], "path");
        assert_eq!(
            value["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/Item"
        );
    }

    #[test]
    fn test_path_item_is_method_map() {
        let mut item = PathItem::default();
        item.insert("get", operation());
        let value = serde_json::to_value(&item).unwrap();
        assert!(value["get"].is_object());
        assert_eq!(item.len(), 1);
        assert!(item.get("post").is_none());
    }

    #[test]
    fn test_document_serialization() {
        let mut paths = IndexMap::new();
        let mut item = PathItem::default();
        item.insert("get", operation());
        paths.insert("/items/{id}".to_string(), item);

        let doc = OpenApi {
            openapi: "3.0.3".to_string(),
            info: Info {
                title: "Items".to_string(),
                version: "1".to_string(),
                description: None,
            },
            tags: vec![],
            paths,
            components: Components::default(),
        };

        let value: Value = serde_json::from_slice(&doc.to_json().unwrap()).unwrap();
        assert_eq!(value["openapi"], "3.0.3");
        assert!(value["info"].get("description").is_none());
        assert_eq!(value["components"], json!({"schemas": {}}));
        assert_eq!(doc.operation("/items/{id}", "get").unwrap().summary, "Get an item");
    }
}
