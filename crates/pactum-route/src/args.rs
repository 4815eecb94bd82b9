//! Converter argument parsing.
//!
//! Arguments are a comma separated list of positional values and `name=value`
//! pairs: `min=1, max=10`, `red, green, 'dark blue'`. Values are typed the way
//! they read: `True`/`False` become booleans, `None` becomes null, numeric
//! literals become numbers, and everything else is a string (with surrounding
//! quotes removed).

use std::sync::OnceLock;

use indexmap::IndexMap;
use pactum_core::{ContractError, ContractResult};
use regex::Regex;
use serde_json::{Number, Value};

fn args_regex() -> &'static Regex {
    static ARGS: OnceLock<Regex> = OnceLock::new();
    ARGS.get_or_init(|| {
        Regex::new(
            r#"\s*(?:(?P<name>\w+)\s*=\s*)?(?P<value>True|False|-?\d+\.\d+|-?\d+\.|-?\d+|[\w.]+|"[^"]*"|'[^']*')\s*,"#,
        )
        .expect("valid regex")
    })
}

/// Parsed converter arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConverterArgs {
    /// Positional arguments, in order.
    pub positional: Vec<Value>,
    /// Keyword arguments, in order.
    pub keyword: IndexMap<String, Value>,
}

impl ConverterArgs {
    /// Parses the text between a converter's parentheses.
    ///
    /// `template` is only used for error reporting.
    pub fn parse(template: &str, raw: &str) -> ContractResult<Self> {
        let mut args = Self::default();
        if raw.trim().is_empty() {
            return Ok(args);
        }

        let input = format!("{raw},");
        let mut position = 0;

        for caps in args_regex().captures_iter(&input) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() != position {
                return Err(ContractError::route_grammar(
                    template,
                    format!(
                        "cannot parse converter argument {:?}",
                        &input[position..whole.start()]
                    ),
                ));
            }

            let value = typed_value(&caps["value"]);
            match caps.name("name") {
                Some(name) => {
                    args.keyword.insert(name.as_str().to_string(), value);
                }
                None => args.positional.push(value),
            }
            position = whole.end();
        }

        if !input[position..].trim().is_empty() {
            return Err(ContractError::route_grammar(
                template,
                format!("cannot parse converter argument {:?}", input[position..].trim_end_matches(',')),
            ));
        }

        Ok(args)
    }

    /// Returns a keyword argument.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Returns true if no arguments were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

fn typed_value(raw: &str) -> Value {
    match raw {
        "None" => return Value::Null,
        "True" => return Value::Bool(true),
        "False" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Some(number) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }

    let unquoted = ['"', '\'']
        .iter()
        .find_map(|quote| raw.strip_prefix(*quote)?.strip_suffix(*quote))
        .unwrap_or(raw);
    Value::String(unquoted.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(raw: &str) -> ConverterArgs {
        ConverterArgs::parse("/t", raw).unwrap()
    }

    #[test]
    fn test_empty() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn test_keyword_numbers() {
        let args = parse("min=1, max=10");
        assert_eq!(args.get("min"), Some(&json!(1)));
        assert_eq!(args.get("max"), Some(&json!(10)));
        assert!(args.positional.is_empty());
    }

    #[test]
    fn test_negative_and_float() {
        let args = parse("min=-5, step=0.5, tail=2.");
        assert_eq!(args.get("min"), Some(&json!(-5)));
        assert_eq!(args.get("step"), Some(&json!(0.5)));
        assert_eq!(args.get("tail"), Some(&json!(2.0)));
    }

    #[test]
    fn test_positional_words_and_strings() {
        let args = parse("red, 'dark blue', \"green\"");
        assert_eq!(args.positional, vec![json!("red"), json!("dark blue"), json!("green")]);
    }

    #[test]
    fn test_constants() {
        let args = parse("signed=True, fixed=False, default=None");
        assert_eq!(args.get("signed"), Some(&json!(true)));
        assert_eq!(args.get("fixed"), Some(&json!(false)));
        assert_eq!(args.get("default"), Some(&Value::Null));
    }

    #[test]
    fn test_mixed_order_is_kept() {
        let args = parse("a, b, length=3");
        assert_eq!(args.positional, vec![json!("a"), json!("b")]);
        assert_eq!(args.keyword.keys().collect::<Vec<_>>(), vec!["length"]);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = ConverterArgs::parse("/t", "min=1, @@").unwrap_err();
        assert!(err.to_string().contains("cannot parse converter argument"));
    }
}
