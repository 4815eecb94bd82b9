//! Schema keyword filtering and reference rewriting.

use serde_json::Value;

/// Schema keywords kept on each property.
///
/// Anything else (serializer hints, validator-specific extensions) is dropped
/// so the emitted document only carries keywords the document format knows.
pub const ALLOWED_KEYWORDS: &[&str] = &[
    "title",
    "multipleOf",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "pattern",
    "maxItems",
    "minItems",
    "uniqueItems",
    "maxProperties",
    "minProperties",
    "required",
    "enum",
    "type",
    "allOf",
    "anyOf",
    "oneOf",
    "not",
    "items",
    "properties",
    "additionalProperties",
    "description",
    "format",
    "default",
    "nullable",
    "discriminator",
    "readOnly",
    "writeOnly",
    "xml",
    "externalDocs",
    "example",
    "deprecated",
    "$ref",
];

/// Keys under which nested model definitions are carried.
pub const DEFINITION_KEYS: &[&str] = &["definitions", "$defs"];

/// Prefix of references into the document's component schemas.
pub const COMPONENTS_PREFIX: &str = "#/components/schemas/";

const NESTED_PREFIXES: &[&str] = &["#/definitions/", "#/$defs/"];

/// Returns true if `keyword` survives property filtering.
#[must_use]
pub fn is_allowed(keyword: &str) -> bool {
    ALLOWED_KEYWORDS.contains(&keyword)
}

/// Strips disallowed keywords from every entry of `schema["properties"]`.
///
/// Descends into the `properties` of kept property schemas. Keys of the
/// schema itself are left untouched.
pub fn filter_properties(schema: &mut Value) {
    let Some(Value::Object(properties)) = schema.get_mut("properties") else {
        return;
    };

    for property in properties.values_mut() {
        if let Value::Object(keywords) = property {
            keywords.retain(|key, _| is_allowed(key));
        }
        filter_properties(property);
    }
}

/// Removes and returns the nested definitions blocks of a schema.
pub fn take_definitions(schema: &mut Value) -> Vec<(String, Value)> {
    let Value::Object(map) = schema else {
        return Vec::new();
    };

    DEFINITION_KEYS
        .iter()
        .filter_map(|key| map.remove(*key))
        .filter_map(|block| match block {
            Value::Object(entries) => Some(entries),
            _ => None,
        })
        .flatten()
        .collect()
}

/// Rewrites nested-definition references to component references, in place.
///
/// `#/definitions/Address` and `#/$defs/Address` both become
/// `#/components/schemas/Address`.
pub fn rewrite_refs(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == "$ref" {
                    if let Value::String(reference) = child {
                        if let Some(rewritten) = rewrite_ref(reference) {
                            *reference = rewritten;
                        }
                    }
                } else {
                    rewrite_refs(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(rewrite_refs),
        _ => {}
    }
}

fn rewrite_ref(reference: &str) -> Option<String> {
    NESTED_PREFIXES.iter().find_map(|prefix| {
        reference
            .strip_prefix(prefix)
            .map(|name| format!("{COMPONENTS_PREFIX}{name}"))
    })
}
