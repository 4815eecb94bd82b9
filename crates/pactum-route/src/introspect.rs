//! Path template introspection.

use pactum_core::{ContractResult, ConverterType, ParameterSpec};

use crate::{converter_schema, ConverterArgs, RouteTemplate, Segment};

/// A template reduced to a document path plus its path parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPath {
    /// Path with `{name}` placeholders.
    pub path: String,
    /// One required path parameter per variable, in order.
    pub parameters: Vec<ParameterSpec>,
}

/// Parses a template into a document path and its parameters.
///
/// `custom` resolves converters outside the built-in table.
///
/// # Example
///
/// ```rust
/// use pactum_core::ParameterLocation;
/// use pactum_route::parse_path;
/// use serde_json::json;
///
/// let parsed = parse_path("/items/<int(min=1):id>", &|_| None).unwrap();
/// assert_eq!(parsed.path, "/items/{id}");
///
/// let id = &parsed.parameters[0];
/// assert_eq!(id.location, ParameterLocation::Path);
/// assert!(id.required);
/// assert_eq!(id.schema, json!({"type": "integer", "format": "int32", "minimum": 1}));
/// ```
pub fn parse_path(
    template: &str,
    custom: &dyn Fn(&str) -> Option<ConverterType>,
) -> ContractResult<ParsedPath> {
    let parsed = RouteTemplate::parse(template)?;
    let mut parameters = Vec::new();

    for segment in parsed.segments() {
        if let Segment::Variable {
            converter,
            args,
            name,
        } = segment
        {
            let args = match args {
                Some(raw) => ConverterArgs::parse(template, raw)?,
                None => ConverterArgs::default(),
            };
            parameters.push(ParameterSpec::path(
                name,
                converter_schema(converter, &args, custom),
            ));
        }
    }

    Ok(ParsedPath {
        path: parsed.normalized(),
        parameters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_static_path_has_no_parameters() {
        let parsed = parse_path("/health", &|_| None).unwrap();
        assert_eq!(parsed.path, "/health");
        assert!(parsed.parameters.is_empty());
    }

    #[test]
    fn test_multiple_parameters() {
        let parsed = parse_path("/org/<uuid:org>/files/<path:rest>", &|_| None).unwrap();
        assert_eq!(parsed.path, "/org/{org}/files/{rest}");
        let names: Vec<_> = parsed.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["org", "rest"]);
        assert_eq!(parsed.parameters[1].schema, json!({"type": "string", "format": "path"}));
    }

    #[test]
    fn test_custom_converter() {
        let lookup = |name: &str| {
            (name == "lang").then(|| ConverterType::Enumeration(vec![json!("en"), json!("fr")]))
        };
        let parsed = parse_path("/<lang:code>/docs", &lookup).unwrap();
        assert_eq!(parsed.parameters[0].schema, json!({"type": "string", "enum": ["en", "fr"]}));
    }

    #[test]
    fn test_bad_arguments_fail() {
        assert!(parse_path("/<int(min=%):id>", &|_| None).is_err());
    }
}
