//! Validation metadata recorded for a bound handler.
//!
//! A [`RouteContract`] is an explicit record with one optional slot per request
//! location. It is built once at binding time and shared read-only afterwards.

use std::collections::BTreeMap;

use crate::{ContractError, Location, ModelRef};

/// Content type of a JSON body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type of a multipart form body.
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// A declared request body: its encoding and model.
#[derive(Debug, Clone)]
pub struct BodySpec {
    /// Content type the body is documented under.
    pub content_type: String,
    /// Declared model.
    pub model: ModelRef,
}

/// What a handler returns for one status code.
#[derive(Debug, Clone)]
pub enum ResponseKind {
    /// A JSON body conforming to a model.
    Model(ModelRef),
    /// A response without a documented body.
    Empty,
    /// A binary file download.
    File,
}

impl ResponseKind {
    /// Returns the model, if this response declares one.
    #[must_use]
    pub fn model(&self) -> Option<&ModelRef> {
        match self {
            Self::Model(model) => Some(model),
            _ => None,
        }
    }
}

/// Validation metadata for one bound handler.
#[derive(Debug, Clone)]
pub struct RouteContract {
    /// Binding name; also the operation id source.
    pub name: String,
    /// Query string model.
    pub query: Option<ModelRef>,
    /// Declared bodies. More than one is a conflict.
    pub bodies: Vec<BodySpec>,
    /// Header model.
    pub headers: Option<ModelRef>,
    /// Cookie model.
    pub cookies: Option<ModelRef>,
    /// Responses keyed by status code.
    pub responses: BTreeMap<u16, ResponseKind>,
    /// Whether handler responses are checked against their models.
    pub validate_response: bool,
    /// Tags, in declaration order.
    pub tags: Vec<String>,
    /// Deprecated flag.
    pub deprecated: bool,
    /// Documentation text; the first line is the summary.
    pub doc: Option<String>,
}

impl RouteContract {
    /// Creates an empty contract for a handler.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: None,
            bodies: Vec::new(),
            headers: None,
            cookies: None,
            responses: BTreeMap::new(),
            validate_response: true,
            tags: Vec::new(),
            deprecated: false,
            doc: None,
        }
    }

    /// Returns the single declared body.
    ///
    /// Fails with [`ContractError::BodyContentConflict`] when more than one
    /// body encoding is declared.
    pub fn body(&self) -> Result<Option<&BodySpec>, ContractError> {
        match self.bodies.as_slice() {
            [] => Ok(None),
            [body] => Ok(Some(body)),
            bodies => Err(ContractError::body_conflict(
                &self.name,
                bodies.iter().map(|b| b.content_type.clone()).collect(),
            )),
        }
    }

    /// Returns the model for a request location.
    ///
    /// For [`Location::Body`] this is the first declared body's model.
    #[must_use]
    pub fn model_for(&self, location: Location) -> Option<&ModelRef> {
        match location {
            Location::Query => self.query.as_ref(),
            Location::Body => self.bodies.first().map(|b| &b.model),
            Location::Headers => self.headers.as_ref(),
            Location::Cookies => self.cookies.as_ref(),
        }
    }

    /// Returns the response model for a status code, if one is declared.
    #[must_use]
    pub fn response_model(&self, status: u16) -> Option<&ModelRef> {
        self.responses.get(&status).and_then(ResponseKind::model)
    }

    /// Returns true if any request model is declared.
    #[must_use]
    pub fn has_request_models(&self) -> bool {
        Location::ALL.iter().any(|loc| self.model_for(*loc).is_some())
    }

    /// Returns true if any model is declared, request or response.
    #[must_use]
    pub fn has_models(&self) -> bool {
        self.has_request_models() || self.responses.values().any(|r| r.model().is_some())
    }

    /// Iterates over every declared model.
    pub fn models(&self) -> impl Iterator<Item = &ModelRef> {
        self.query
            .iter()
            .chain(self.bodies.iter().map(|b| &b.model))
            .chain(self.headers.iter())
            .chain(self.cookies.iter())
            .chain(self.responses.values().filter_map(ResponseKind::model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct Item {
        _id: u32,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Upload {
        _name: String,
    }

    fn body(content_type: &str, model: ModelRef) -> BodySpec {
        BodySpec {
            content_type: content_type.to_string(),
            model,
        }
    }

    #[test]
    fn test_empty_contract() {
        let contract = RouteContract::new("ping");
        assert!(contract.body().unwrap().is_none());
        assert!(!contract.has_models());
        assert!(contract.validate_response);
        assert_eq!(contract.models().count(), 0);
    }

    #[test]
    fn test_single_body() {
        let mut contract = RouteContract::new("create_item");
        contract.bodies.push(body(JSON_CONTENT_TYPE, ModelRef::of::<Item>()));
        let spec = contract.body().unwrap().unwrap();
        assert_eq!(spec.content_type, JSON_CONTENT_TYPE);
        assert_eq!(contract.model_for(Location::Body).unwrap().name(), "Item");
        assert!(contract.has_request_models());
    }

    #[test]
    fn test_body_conflict() {
        let mut contract = RouteContract::new("upload");
        contract.bodies.push(body(JSON_CONTENT_TYPE, ModelRef::of::<Item>()));
        contract.bodies.push(body(MULTIPART_CONTENT_TYPE, ModelRef::of::<Upload>()));
        let err = contract.body().unwrap_err();
        assert!(matches!(err, ContractError::BodyContentConflict { .. }));
    }

    #[test]
    fn test_response_models() {
        let mut contract = RouteContract::new("get_item");
        contract.responses.insert(200, ResponseKind::Model(ModelRef::of::<Item>()));
        contract.responses.insert(404, ResponseKind::Empty);
        contract.responses.insert(201, ResponseKind::File);

        assert_eq!(contract.response_model(200).unwrap().name(), "Item");
        assert!(contract.response_model(404).is_none());
        assert!(contract.response_model(201).is_none());
        assert!(contract.response_model(500).is_none());
        assert!(contract.has_models());
        assert!(!contract.has_request_models());
        assert_eq!(contract.models().count(), 1);
    }
}
