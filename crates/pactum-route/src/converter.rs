//! Converter to schema mapping.

use pactum_core::ConverterType;
use serde_json::{json, Map, Value};

use crate::ConverterArgs;

/// Keyword arguments of the `string` converter that carry over to the schema,
/// paired with the schema keyword they become.
const STRING_LENGTH_ARGS: &[(&str, &str)] = &[
    ("length", "length"),
    ("maxLength", "maxLength"),
    ("minLength", "minLength"),
    ("maxlength", "maxLength"),
    ("minlength", "minLength"),
];

/// Derives the structural schema of a path variable from its converter.
///
/// Built-in converters map to a fixed table. Anything else is looked up with
/// `custom`: converters declaring an enumerated output become an enum schema,
/// all others degrade to a plain string.
pub fn converter_schema(
    converter: &str,
    args: &ConverterArgs,
    custom: &dyn Fn(&str) -> Option<ConverterType>,
) -> Value {
    match converter {
        "any" => json!({"type": "string", "enum": args.positional}),
        "int" => {
            let mut schema = object(json!({"type": "integer", "format": "int32"}));
            copy_arg(args, "max", "maximum", &mut schema);
            copy_arg(args, "min", "minimum", &mut schema);
            Value::Object(schema)
        }
        "float" => json!({"type": "number", "format": "float"}),
        "uuid" => json!({"type": "string", "format": "uuid"}),
        "path" => json!({"type": "string", "format": "path"}),
        "string" => {
            let mut schema = object(json!({"type": "string"}));
            for (arg, keyword) in STRING_LENGTH_ARGS {
                copy_arg(args, arg, keyword, &mut schema);
            }
            Value::Object(schema)
        }
        "default" => json!({"type": "string"}),
        other => match custom(other) {
            Some(ConverterType::Enumeration(values)) if !values.is_empty() => {
                json!({"type": enum_type(&values), "enum": values})
            }
            _ => json!({"type": "string"}),
        },
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn copy_arg(args: &ConverterArgs, arg: &str, keyword: &str, schema: &mut Map<String, Value>) {
    if let Some(value) = args.get(arg) {
        schema.insert(keyword.to_string(), value.clone());
    }
}

fn enum_type(values: &[Value]) -> &'static str {
    if values.iter().all(|v| v.is_i64() || v.is_u64()) {
        "integer"
    } else if values.iter().all(Value::is_number) {
        "number"
    } else {
        "string"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_custom(_: &str) -> Option<ConverterType> {
        None
    }

    fn schema(converter: &str, raw_args: &str) -> Value {
        let args = ConverterArgs::parse("/t", raw_args).unwrap();
        converter_schema(converter, &args, &no_custom)
    }

    #[test]
    fn test_fixed_table() {
        assert_eq!(schema("default", ""), json!({"type": "string"}));
        assert_eq!(schema("float", ""), json!({"type": "number", "format": "float"}));
        assert_eq!(schema("uuid", ""), json!({"type": "string", "format": "uuid"}));
        assert_eq!(schema("path", ""), json!({"type": "string", "format": "path"}));
    }

    #[test]
    fn test_int_bounds() {
        assert_eq!(
            schema("int", "min=1, max=100"),
            json!({"type": "integer", "format": "int32", "minimum": 1, "maximum": 100})
        );
        assert_eq!(schema("int", ""), json!({"type": "integer", "format": "int32"}));
    }

    #[test]
    fn test_any_enum() {
        assert_eq!(
            schema("any", "red, green"),
            json!({"type": "string", "enum": ["red", "green"]})
        );
    }

    #[test]
    fn test_string_lengths() {
        assert_eq!(
            schema("string", "minlength=2, maxlength=8"),
            json!({"type": "string", "minLength": 2, "maxLength": 8})
        );
        assert_eq!(schema("string", "length=4"), json!({"type": "string", "length": 4}));
    }

    #[test]
    fn test_custom_enumeration() {
        let lookup = |name: &str| match name {
            "color" => Some(ConverterType::Enumeration(vec![json!("red"), json!("blue")])),
            "level" => Some(ConverterType::Enumeration(vec![json!(1), json!(2)])),
            "opaque" => Some(ConverterType::Opaque),
            _ => None,
        };
        let args = ConverterArgs::default();

        assert_eq!(
            converter_schema("color", &args, &lookup),
            json!({"type": "string", "enum": ["red", "blue"]})
        );
        assert_eq!(
            converter_schema("level", &args, &lookup),
            json!({"type": "integer", "enum": [1, 2]})
        );
        assert_eq!(converter_schema("opaque", &args, &lookup), json!({"type": "string"}));
        assert_eq!(converter_schema("unknown", &args, &lookup), json!({"type": "string"}));
    }
}
