//! Property tests for path introspection.

use pactum_core::ParameterLocation;
use pactum_route::{parse_path, RouteTemplate};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn int_bounds_carry_into_parameter(
        prefix in "[a-z/]{0,12}",
        name in "[a-z_][a-z0-9_]{0,10}",
        a in any::<i32>(),
        b in any::<i32>(),
    ) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let template = format!("/{prefix}<int(min={min}, max={max}):{name}>");

        let parsed = parse_path(&template, &|_| None).unwrap();
        prop_assert_eq!(parsed.parameters.len(), 1);

        let param = &parsed.parameters[0];
        prop_assert_eq!(&param.name, &name);
        prop_assert_eq!(param.location, ParameterLocation::Path);
        prop_assert!(param.required);
        prop_assert_eq!(&param.schema["type"], &json!("integer"));
        prop_assert_eq!(&param.schema["minimum"], &json!(min));
        prop_assert_eq!(&param.schema["maximum"], &json!(max));
    }

    #[test]
    fn reused_variable_is_rejected(
        name in "[a-z_][a-z0-9_]{0,10}",
        middle in "[a-z/]{1,8}",
    ) {
        let template = format!("/<{name}>{middle}<int:{name}>");
        let err = RouteTemplate::parse(&template).unwrap_err();
        prop_assert!(err.is_route_grammar());
    }

    #[test]
    fn normalized_path_keeps_static_text(
        parts in proptest::collection::vec("[a-z]{1,6}", 1..5),
    ) {
        let template: String = parts
            .iter()
            .enumerate()
            .map(|(i, part)| format!("/{part}/<v{i}>"))
            .collect();
        let expected: String = parts
            .iter()
            .enumerate()
            .map(|(i, part)| format!("/{part}/{{v{i}}}"))
            .collect();

        let parsed = parse_path(&template, &|_| None).unwrap();
        prop_assert_eq!(parsed.path, expected);
        prop_assert_eq!(parsed.parameters.len(), parts.len());
    }
}
