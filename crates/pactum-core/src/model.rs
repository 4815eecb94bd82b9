//! Declared data models.
//!
//! A model is any type that can be deserialized and describes itself with a
//! JSON schema. [`ModelRef`] erases the concrete type so route metadata can hold
//! models for different locations side by side.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use jsonschema::Validator;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{ContractError, FieldError};

/// A validated, type-erased value produced by [`ModelRef::validate`].
pub type ValidatedValue = Arc<dyn Any + Send + Sync>;

/// Marker for types usable as declared models.
pub trait Model: DeserializeOwned + JsonSchema + Send + Sync + 'static {}

impl<T> Model for T where T: DeserializeOwned + JsonSchema + Send + Sync + 'static {}

/// A type-erased declared model.
///
/// Cloning is cheap; the schema and the compiled validator are shared.
///
/// # Example
///
/// ```
/// use pactum_core::ModelRef;
/// use schemars::JsonSchema;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct Pagination {
///     page: u32,
/// }
///
/// let model = ModelRef::of::<Pagination>();
/// assert_eq!(model.name(), "Pagination");
///
/// let value = model.validate(&json!({"page": 2})).unwrap();
/// assert_eq!(value.downcast_ref::<Pagination>().unwrap().page, 2);
/// assert!(model.validate(&json!({"page": "two"})).is_err());
/// ```
#[derive(Clone)]
pub struct ModelRef {
    inner: Arc<ModelInner>,
}

struct ModelInner {
    name: String,
    root: Value,
    validator: OnceLock<Result<Validator, String>>,
    construct: fn(Value) -> Result<ValidatedValue, serde_json::Error>,
}

impl ModelRef {
    /// Creates a model reference for a concrete type.
    #[must_use]
    pub fn of<T: Model>() -> Self {
        let root = serde_json::to_value(schemars::schema_for!(T)).unwrap_or(Value::Null);
        Self::from_parts(T::schema_name(), root, construct::<T>)
    }

    /// Creates a model from a hand-written JSON schema.
    ///
    /// Validated values are the input [`Value`] itself.
    pub fn dynamic(name: impl Into<String>, schema: Value) -> Self {
        Self::from_parts(name.into(), schema, construct_value)
    }

    fn from_parts(
        name: String,
        root: Value,
        construct: fn(Value) -> Result<ValidatedValue, serde_json::Error>,
    ) -> Self {
        Self {
            inner: Arc::new(ModelInner {
                name,
                root,
                validator: OnceLock::new(),
                construct,
            }),
        }
    }

    /// Returns the model name, used as its key in the component schemas.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the model's JSON schema, including nested definitions.
    ///
    /// The draft marker (`$schema`) is stripped since the schema is embedded
    /// in an interface document rather than published standalone.
    #[must_use]
    pub fn raw_schema(&self) -> Value {
        let mut schema = self.inner.root.clone();
        if let Value::Object(map) = &mut schema {
            map.remove("$schema");
        }
        schema
    }

    /// Compiles the validator, reporting an unusable schema as an error.
    pub fn compile(&self) -> Result<&Validator, ContractError> {
        self.validator()
            .map_err(|reason| ContractError::invalid_schema(self.name(), reason))
    }

    /// Validates `input` and constructs the typed value.
    ///
    /// All schema violations are reported together. If the schema accepts the
    /// input but deserialization still fails, a single `deserialize` error is
    /// returned.
    pub fn validate(&self, input: &Value) -> Result<ValidatedValue, Vec<FieldError>> {
        let validator = self
            .validator()
            .map_err(|reason| vec![FieldError::new("", reason, "schema")])?;

        let errors: Vec<FieldError> = validator
            .iter_errors(input)
            .map(|err| {
                let schema_path = err.schema_path.to_string();
                let kind = schema_path
                    .rsplit('/')
                    .find(|segment| !segment.is_empty())
                    .unwrap_or("schema")
                    .to_string();
                FieldError::new(err.instance_path.to_string(), err.to_string(), kind)
            })
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        (self.inner.construct)(input.clone())
            .map_err(|err| vec![FieldError::new("", err.to_string(), "deserialize")])
    }

    fn validator(&self) -> Result<&Validator, String> {
        self.inner
            .validator
            .get_or_init(|| {
                debug!(model = %self.inner.name, "compiling model validator");
                jsonschema::validator_for(&self.inner.root).map_err(|err| err.to_string())
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRef")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

fn construct<T: Model>(value: Value) -> Result<ValidatedValue, serde_json::Error> {
    Ok(Arc::new(serde_json::from_value::<T>(value)?))
}

fn construct_value(value: Value) -> Result<ValidatedValue, serde_json::Error> {
    Ok(Arc::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Query {
        a: i32,
        #[serde(default)]
        tag: Option<String>,
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Address {
        city: String,
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Person {
        name: String,
        address: Address,
    }

    #[test]
    fn test_name_and_schema() {
        let model = ModelRef::of::<Query>();
        assert_eq!(model.name(), "Query");

        let schema = model.raw_schema();
        assert!(schema.get("$schema").is_none());
        assert_eq!(schema["properties"]["a"]["type"], "integer");
        assert_eq!(schema["required"], json!(["a"]));
    }

    #[test]
    fn test_nested_definitions_are_kept() {
        let schema = ModelRef::of::<Person>().raw_schema();
        assert!(schema["definitions"]["Address"].is_object());
        assert_eq!(
            schema["properties"]["address"]["$ref"],
            "#/definitions/Address"
        );
    }

    #[test]
    fn test_validate_constructs_value() {
        let model = ModelRef::of::<Query>();
        let value = model.validate(&json!({"a": 5})).unwrap();
        let query = value.downcast_ref::<Query>().unwrap();
        assert_eq!(query.a, 5);
        assert!(query.tag.is_none());
    }

    #[test]
    fn test_validate_reports_field_errors() {
        let model = ModelRef::of::<Query>();
        let errors = model.validate(&json!({"a": "foo"})).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].loc, "/a");
        assert_eq!(errors[0].kind, "type");
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let model = ModelRef::of::<Person>();
        let errors = model
            .validate(&json!({"name": 1, "address": {"city": 2}}))
            .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_missing_required_field() {
        let errors = ModelRef::of::<Query>().validate(&json!({})).unwrap_err();
        assert_eq!(errors[0].kind, "required");
        assert_eq!(errors[0].loc, "");
    }

    #[test]
    fn test_dynamic_model() {
        let model = ModelRef::dynamic(
            "Limit",
            json!({"type": "object", "properties": {"n": {"type": "integer", "maximum": 10}}}),
        );
        assert_eq!(model.name(), "Limit");

        let value = model.validate(&json!({"n": 3})).unwrap();
        assert_eq!(value.downcast_ref::<Value>().unwrap()["n"], 3);

        let errors = model.validate(&json!({"n": 30})).unwrap_err();
        assert_eq!(errors[0].kind, "maximum");
    }

    #[test]
    fn test_invalid_schema_is_reported() {
        let model = ModelRef::dynamic("Broken", json!({"type": 12}));
        assert!(model.compile().is_err());
        let errors = model.validate(&json!({})).unwrap_err();
        assert_eq!(errors[0].kind, "schema");
    }

    #[test]
    fn test_clone_shares_validator() {
        let model = ModelRef::of::<Query>();
        let copy = model.clone();
        assert!(model.compile().is_ok());
        assert!(Arc::ptr_eq(&model.inner, &copy.inner));
    }
}
