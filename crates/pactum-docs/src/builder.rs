//! Document assembly from the host route table.
//!
//! [`SpecBuilder`] walks the route table once, derives path parameters from
//! each template, model-backed parameters and bodies from the route's
//! contract, and finishes with the flattened component schemas of the
//! registry.

use std::sync::Arc;

use http::{Method, StatusCode};
use indexmap::{IndexMap, IndexSet};
use pactum_config::{ContractConfig, InclusionMode};
use pactum_core::{
    EngineId, ModelRef, ParameterLocation, ParameterSpec, ResponseKind, RouteContract, RouteEntry,
    RouteTable,
};
use pactum_route::{operation_id, parse_doc, parse_path};
use pactum_schema::SchemaRegistry;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::error::DocsResult;
use crate::openapi::{
    Components, Info, MediaType, OpenApi, Operation, PathItem, RequestBody, Response, Tag,
};

/// Prefix of static asset routes, which are never documented.
pub const STATIC_PREFIX: &str = "/static";

/// Methods that can carry an operation in the document.
const DOCUMENTED_METHODS: [Method; 6] = [
    Method::GET,
    Method::PUT,
    Method::POST,
    Method::DELETE,
    Method::PATCH,
    Method::TRACE,
];

/// Binary content type used for file responses.
const OCTET_STREAM: &str = "application/octet-stream";

/// Looks up the contract bound to an endpoint name.
pub type ContractLookup<'a> = dyn Fn(&str) -> Option<Arc<RouteContract>> + 'a;

/// Builds the interface document for one engine instance.
///
/// # Example
///
/// ```rust
/// use http::Method;
/// use pactum_config::ContractConfig;
/// use pactum_core::{EngineId, RouteEntry, StaticRouteTable};
/// use pactum_docs::SpecBuilder;
/// use pactum_schema::SchemaRegistry;
///
/// let engine = EngineId::new();
/// let config = ContractConfig::default();
/// let registry = SchemaRegistry::new();
/// let table = StaticRouteTable::new()
///     .route(RouteEntry::new("/users/<int:id>", vec![Method::GET], "get_user"));
///
/// let doc = SpecBuilder::new(engine, &config, &registry)
///     .build(&table, &|_| None)
///     .unwrap();
///
/// let op = doc.operation("/users/{id}", "get").unwrap();
/// assert_eq!(op.operation_id, "getUser");
/// assert_eq!(op.summary, "get_user <GET>");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SpecBuilder<'a> {
    engine: EngineId,
    config: &'a ContractConfig,
    registry: &'a SchemaRegistry,
}

impl<'a> SpecBuilder<'a> {
    /// Creates a builder for the given engine.
    #[must_use]
    pub fn new(engine: EngineId, config: &'a ContractConfig, registry: &'a SchemaRegistry) -> Self {
        Self {
            engine,
            config,
            registry,
        }
    }

    /// Builds the document.
    ///
    /// # Errors
    ///
    /// Fails when a documented route has a malformed template or a bound
    /// handler declares more than one request body content type.
    pub fn build(&self, table: &dyn RouteTable, lookup: &ContractLookup<'_>) -> DocsResult<OpenApi> {
        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        let mut tags: IndexSet<String> = IndexSet::new();

        for entry in table.routes() {
            if self.is_internal(&entry.template) {
                debug!(template = %entry.template, "skipping internal route");
                continue;
            }
            if !self.includes(entry.owner) {
                debug!(template = %entry.template, endpoint = %entry.endpoint, "skipping route owned elsewhere");
                continue;
            }

            let contract = if entry.owner == Some(self.engine) {
                lookup(&entry.endpoint)
            } else {
                None
            };

            let parsed = parse_path(&entry.template, &|name| table.custom_converter(name))?;

            for method in &entry.methods {
                if *method == Method::HEAD || *method == Method::OPTIONS {
                    continue;
                }
                if !DOCUMENTED_METHODS.contains(method) {
                    warn!(method = %method, path = %parsed.path, "skipping unsupported method");
                    continue;
                }

                let mut operation = self.base_operation(&entry, contract.as_deref(), method);
                operation.parameters.extend(parsed.parameters.iter().cloned());
                if let Some(contract) = contract.as_deref() {
                    self.apply_contract(&mut operation, contract)?;
                    tags.extend(contract.tags.iter().cloned());
                }

                paths
                    .entry(parsed.path.clone())
                    .or_default()
                    .insert(method.as_str().to_ascii_lowercase(), operation);
            }
        }

        let schemas = self
            .registry
            .flatten_definitions()
            .into_iter()
            .map(|(name, model)| (name, model.definition))
            .collect();

        let document = OpenApi {
            openapi: self.config.openapi_version.clone(),
            info: Info {
                title: self.config.title.clone(),
                version: self.config.version.clone(),
                description: self.config.description.clone(),
            },
            tags: tags
                .into_iter()
                .map(|name| Tag {
                    description: self.config.tag_description(&name).map(str::to_string),
                    name,
                })
                .collect(),
            paths,
            components: Components { schemas },
        };

        info!(
            engine = %self.engine,
            paths = document.paths.len(),
            schemas = document.components.schemas.len(),
            "built interface document"
        );
        Ok(document)
    }

    fn is_internal(&self, template: &str) -> bool {
        let docs_prefix = format!("/{}", self.config.path.trim_matches('/'));
        template.starts_with(&docs_prefix) || template.starts_with(STATIC_PREFIX)
    }

    fn includes(&self, owner: Option<EngineId>) -> bool {
        match self.config.mode {
            InclusionMode::Normal => owner.map_or(true, |owner| owner == self.engine),
            InclusionMode::Greedy => true,
            InclusionMode::Strict => owner == Some(self.engine),
        }
    }

    fn base_operation(
        &self,
        entry: &RouteEntry,
        contract: Option<&RouteContract>,
        method: &Method,
    ) -> Operation {
        let doc = contract
            .and_then(|c| c.doc.as_deref())
            .or(entry.doc.as_deref());
        let doc = parse_doc(doc);

        Operation {
            operation_id: operation_id(&entry.endpoint),
            summary: doc
                .summary
                .unwrap_or_else(|| format!("{} <{}>", entry.endpoint, method)),
            description: doc.description.unwrap_or_default(),
            tags: Vec::new(),
            deprecated: false,
            parameters: Vec::new(),
            request_body: None,
            responses: IndexMap::new(),
        }
    }

    fn apply_contract(&self, operation: &mut Operation, contract: &RouteContract) -> DocsResult<()> {
        for model in contract.models() {
            self.ensure_registered(model);
        }

        operation.tags = contract.tags.clone();
        operation.deprecated = contract.deprecated;

        let located = [
            (contract.query.as_ref(), ParameterLocation::Query),
            (contract.headers.as_ref(), ParameterLocation::Header),
            (contract.cookies.as_ref(), ParameterLocation::Cookie),
        ];
        for (model, location) in located {
            if let Some(model) = model {
                operation.parameters.extend(self.model_parameters(model, location));
            }
        }

        if let Some(body) = contract.body()? {
            operation.request_body = Some(RequestBody {
                content: IndexMap::from([(
                    body.content_type.clone(),
                    MediaType::reference(body.model.name()),
                )]),
            });
        }

        for (status, kind) in &contract.responses {
            let description = canonical_reason(*status);
            let response = match kind {
                ResponseKind::Model(model) => Response::described(description)
                    .with_content(pactum_core::JSON_CONTENT_TYPE, MediaType::reference(model.name())),
                ResponseKind::Empty => Response::described(description),
                ResponseKind::File => Response::described(description).with_content(
                    OCTET_STREAM,
                    MediaType {
                        schema: json!({"type": "string", "format": "binary"}),
                    },
                ),
            };
            operation.responses.insert(status.to_string(), response);
        }

        if contract.has_models() {
            operation
                .responses
                .entry(self.config.validation_error_code.to_string())
                .or_insert_with(|| Response::described("Validation Error"));
        }

        Ok(())
    }

    fn ensure_registered(&self, model: &ModelRef) {
        if !self.registry.contains(model.name()) {
            self.registry.register_model(model);
        }
    }

    fn model_parameters(&self, model: &ModelRef, location: ParameterLocation) -> Vec<ParameterSpec> {
        let Some(schema) = self.registry.resolve(model.name()) else {
            return Vec::new();
        };
        let Some(properties) = schema.properties() else {
            return Vec::new();
        };

        properties
            .iter()
            .map(|(name, property)| ParameterSpec {
                name: name.clone(),
                location,
                required: schema.is_required(name),
                schema: property.clone(),
                description: property
                    .get("description")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string),
            })
            .collect()
    }
}

fn canonical_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Response")
}
