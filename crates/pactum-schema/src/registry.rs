//! The named schema registry.

use indexmap::IndexMap;
use pactum_core::ModelRef;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::filter::{filter_properties, rewrite_refs, take_definitions};

/// A registered, canonical schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaModel {
    /// Registry key.
    pub name: String,
    /// Filtered definition with nested definitions hoisted out.
    pub definition: Value,
}

impl SchemaModel {
    /// Returns the `properties` object, if present.
    #[must_use]
    pub fn properties(&self) -> Option<&serde_json::Map<String, Value>> {
        self.definition.get("properties").and_then(Value::as_object)
    }

    /// Returns the names listed under `required`.
    #[must_use]
    pub fn required(&self) -> Vec<&str> {
        self.definition
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns true if `property` is listed under `required`.
    #[must_use]
    pub fn is_required(&self, property: &str) -> bool {
        self.required().contains(&property)
    }
}

/// Stores named structural schemas for one engine.
///
/// Registration filters each property down to the allowed keywords, hoists
/// nested definitions into their own entries and rewrites references to the
/// component naming convention. Re-registering a name replaces the stored
/// definition.
///
/// # Example
///
/// ```
/// use pactum_schema::SchemaRegistry;
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry.register("Person", json!({
///     "type": "object",
///     "properties": {"address": {"$ref": "#/definitions/Address"}},
///     "definitions": {"Address": {"type": "object"}}
/// }));
///
/// let flat = registry.flatten_definitions();
/// assert!(flat.contains_key("Address"));
/// assert_eq!(
///     flat["Person"].definition["properties"]["address"]["$ref"],
///     "#/components/schemas/Address"
/// );
/// ```
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    models: RwLock<IndexMap<String, Value>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a raw schema under `name`.
    pub fn register(&self, name: impl Into<String>, raw: Value) {
        let mut pending = vec![(name.into(), raw)];

        while let Some((name, mut schema)) = pending.pop() {
            let nested = take_definitions(&mut schema);
            filter_properties(&mut schema);
            rewrite_refs(&mut schema);
            self.store(name, schema);
            // Pushed in reverse so nested models register in declaration order.
            pending.extend(nested.into_iter().rev());
        }
    }

    /// Registers a declared model under its own name.
    pub fn register_model(&self, model: &ModelRef) {
        self.register(model.name(), model.raw_schema());
    }

    /// Looks up a registered schema.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<SchemaModel> {
        self.models.read().get(name).map(|definition| SchemaModel {
            name: name.to_string(),
            definition: definition.clone(),
        })
    }

    /// Returns every registered schema keyed by name, in registration order.
    ///
    /// No entry carries a nested definitions block, and every internal
    /// reference points at the component schemas.
    #[must_use]
    pub fn flatten_definitions(&self) -> IndexMap<String, SchemaModel> {
        self.models
            .read()
            .iter()
            .map(|(name, definition)| {
                let model = SchemaModel {
                    name: name.clone(),
                    definition: definition.clone(),
                };
                (name.clone(), model)
            })
            .collect()
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.models.read().contains_key(name)
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }

    fn store(&self, name: String, schema: Value) {
        let mut models = self.models.write();
        match models.get(&name) {
            Some(existing) if *existing != schema => {
                warn!(model = %name, "schema name collision, replacing previous definition");
            }
            Some(_) => {}
            None => debug!(model = %name, "registered schema"),
        }
        models.insert(name, schema);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, JsonSchema)]
    struct Address {
        _city: String,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Person {
        _name: String,
        _home: Address,
        _previous: Vec<Address>,
    }

    fn has_nested_block(value: &Value) -> bool {
        match value {
            Value::Object(map) => {
                map.contains_key("definitions")
                    || map.contains_key("$defs")
                    || map.values().any(has_nested_block)
            }
            Value::Array(items) => items.iter().any(has_nested_block),
            _ => false,
        }
    }

    fn refs(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    match (key.as_str(), child) {
                        ("$ref", Value::String(r)) => out.push(r.clone()),
                        _ => refs(child, out),
                    }
                }
            }
            Value::Array(items) => items.iter().for_each(|v| refs(v, out)),
            _ => {}
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = SchemaRegistry::new();
        registry.register("Ping", json!({"type": "object", "properties": {"ok": {"type": "boolean"}}}));

        let model = registry.resolve("Ping").unwrap();
        assert_eq!(model.name, "Ping");
        assert_eq!(model.properties().unwrap().len(), 1);
        assert!(registry.resolve("Pong").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_nested_definitions_become_top_level() {
        let registry = SchemaRegistry::new();
        registry.register_model(&ModelRef::of::<Person>());

        let flat = registry.flatten_definitions();
        assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["Person", "Address"]);

        for model in flat.values() {
            assert!(!has_nested_block(&model.definition), "{} still nests", model.name);
            let mut found = Vec::new();
            refs(&model.definition, &mut found);
            for reference in found {
                assert!(reference.starts_with("#/components/schemas/"), "{reference}");
            }
        }

        let person = &flat["Person"];
        assert_eq!(person.definition["properties"]["_home"]["$ref"], "#/components/schemas/Address");
        assert_eq!(
            person.definition["properties"]["_previous"]["items"]["$ref"],
            "#/components/schemas/Address"
        );
    }

    #[test]
    fn test_deeply_nested_definitions_are_hoisted() {
        let registry = SchemaRegistry::new();
        registry.register(
            "Outer",
            json!({
                "properties": {"m": {"$ref": "#/$defs/Middle"}},
                "$defs": {
                    "Middle": {
                        "properties": {"i": {"$ref": "#/definitions/Inner"}},
                        "definitions": {"Inner": {"type": "string"}}
                    }
                }
            }),
        );

        assert!(registry.contains("Outer"));
        assert!(registry.contains("Middle"));
        assert!(registry.contains("Inner"));
        assert_eq!(
            registry.resolve("Middle").unwrap().definition["properties"]["i"]["$ref"],
            "#/components/schemas/Inner"
        );
    }

    #[test]
    fn test_properties_are_filtered() {
        let registry = SchemaRegistry::new();
        registry.register(
            "Q",
            json!({
                "title": "Q",
                "x-top": 1,
                "required": ["a"],
                "properties": {"a": {"type": "integer", "x-flag": true, "minimum": 1}}
            }),
        );

        let model = registry.resolve("Q").unwrap();
        assert_eq!(model.definition["properties"]["a"], json!({"type": "integer", "minimum": 1}));
        assert_eq!(model.definition["x-top"], 1);
        assert!(model.is_required("a"));
        assert!(!model.is_required("b"));
    }

    #[test]
    fn test_last_write_wins() {
        let registry = SchemaRegistry::new();
        registry.register("Item", json!({"type": "object", "properties": {"a": {"type": "string"}}}));
        registry.register("Item", json!({"type": "object", "properties": {"b": {"type": "integer"}}}));

        let model = registry.resolve("Item").unwrap();
        assert!(model.properties().unwrap().contains_key("b"));
        assert!(!model.properties().unwrap().contains_key("a"));
        assert_eq!(registry.len(), 1);
    }
}
