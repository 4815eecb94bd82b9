//! The contract engine.

use std::collections::HashMap;
use std::sync::Arc;

use http::StatusCode;
use pactum_config::{ConfigError, ContractConfig};
use pactum_core::{EngineId, RouteContract, RouteTable};
use pactum_docs::{DocsResult, DocumentCache, OpenApi, ReDoc, SpecBuilder, SwaggerUi};
use pactum_middleware::{
    AfterHook, BeforeHook, ContractValidation, Handler, Hooks, Middleware, Pipeline,
    PipelineBuilder, Response, ResponseExt,
};
use pactum_schema::SchemaRegistry;
use parking_lot::RwLock;
use tracing::{debug, error, warn};

use crate::binding::{BoundHandler, Validation};

/// Viewer page serving Swagger UI.
pub const SWAGGER_PAGE: &str = "swagger";

/// Viewer page serving ReDoc.
pub const REDOC_PAGE: &str = "redoc";

/// A contract engine instance.
///
/// Each instance has its own [`EngineId`], schema registry, binding table and
/// document cache, so several engines can document disjoint parts of one
/// route table. Cloning is cheap and shares all of it.
///
/// # Example
///
/// ```rust
/// use http::{Method, StatusCode};
/// use pactum::prelude::*;
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct Query {
///     a: i32,
/// }
///
/// let contract = Contract::default();
/// let bound = contract.bind(
///     "get_value",
///     SyncFnHandler::new(|_request| Response::text(StatusCode::OK, "ok")),
///     Validation::new().query::<Query>(),
/// );
///
/// let table = StaticRouteTable::new().route(bound.route("/value", vec![Method::GET]));
/// let doc = contract.document(&table).unwrap();
/// assert!(doc.operation("/value", "get").is_some());
/// ```
#[derive(Clone)]
pub struct Contract {
    inner: Arc<Inner>,
}

struct Inner {
    id: EngineId,
    config: ContractConfig,
    registry: SchemaRegistry,
    bindings: RwLock<HashMap<String, Arc<RouteContract>>>,
    pipeline: Pipeline,
    hooks: Hooks,
    cache: DocumentCache,
}

impl Default for Contract {
    fn default() -> Self {
        Self::from_parts(ContractConfig::default(), Pipeline::new(), Hooks::default())
    }
}

impl Contract {
    /// Creates an engine with the given configuration and no extra stages.
    pub fn new(config: ContractConfig) -> Result<Self, ConfigError> {
        Self::builder().config(config).build()
    }

    /// Creates an engine builder.
    #[must_use]
    pub fn builder() -> ContractBuilder {
        ContractBuilder::default()
    }

    fn from_parts(config: ContractConfig, pipeline: Pipeline, hooks: Hooks) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: EngineId::new(),
                config,
                registry: SchemaRegistry::new(),
                bindings: RwLock::new(HashMap::new()),
                pipeline,
                hooks,
                cache: DocumentCache::new(),
            }),
        }
    }

    /// This engine's ownership marker.
    #[must_use]
    pub fn id(&self) -> EngineId {
        self.inner.id
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &ContractConfig {
        &self.inner.config
    }

    /// Schemas of every model bound so far.
    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.inner.registry
    }

    /// Binds a handler under `name`.
    ///
    /// Records the contract, registers every declared model and returns the
    /// handler wrapped in the engine's stages plus contract validation.
    /// Binding a name twice replaces the earlier contract.
    pub fn bind<H: Handler>(&self, name: impl Into<String>, handler: H, validation: Validation) -> BoundHandler {
        let name = name.into();
        let (contract, before, after) = validation.into_parts(&name);

        for model in contract.models() {
            if let Err(err) = model.compile() {
                warn!(handler = %name, error = %err, "model schema does not compile");
            }
            self.inner.registry.register_model(model);
        }

        let contract = Arc::new(contract);
        if self
            .inner
            .bindings
            .write()
            .insert(name.clone(), Arc::clone(&contract))
            .is_some()
        {
            warn!(handler = %name, "handler bound twice, replacing earlier contract");
        }
        if self.inner.cache.is_built() {
            debug!(handler = %name, "binding after the document was built is not documented");
        }

        let hooks = Hooks {
            before: before.unwrap_or_else(|| self.inner.hooks.before.clone()),
            after: after.unwrap_or_else(|| self.inner.hooks.after.clone()),
        };
        let validation = ContractValidation::new(Arc::clone(&contract), hooks, self.error_status())
            .with_max_body_size(self.inner.config.max_body_size);
        let pipeline = self.inner.pipeline.with_innermost(Arc::new(validation));

        debug!(handler = %name, engine = %self.inner.id, stages = ?pipeline.stage_names(), "bound handler");
        BoundHandler::new(self.inner.id, contract, pipeline, Arc::new(handler))
    }

    /// Contract recorded for a handler name.
    #[must_use]
    pub fn contract_for(&self, name: &str) -> Option<Arc<RouteContract>> {
        self.inner.bindings.read().get(name).cloned()
    }

    /// Returns the interface document, building it on first access.
    pub fn document(&self, table: &dyn RouteTable) -> DocsResult<Arc<OpenApi>> {
        self.inner.cache.get_or_build(|| {
            SpecBuilder::new(self.inner.id, &self.inner.config, &self.inner.registry)
                .build(table, &|name| self.contract_for(name))
        })
    }

    /// Serves the document or a viewer page for `path`.
    ///
    /// Returns `None` when `path` is not one of the documentation URLs.
    pub fn serve_docs(&self, table: &dyn RouteTable, path: &str) -> Option<Response> {
        let config = &self.inner.config;

        if path == config.spec_url() {
            let response = match self.document(table) {
                Ok(document) => Response::json(StatusCode::OK, &*document),
                Err(err) => {
                    error!(error = %err, "failed to build interface document");
                    Response::json_message(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
                }
            };
            return Some(response);
        }

        let page = if path == config.page_url(SWAGGER_PAGE) {
            SwaggerUi::new(config.spec_url(), &config.title).html_bytes()
        } else if path == config.page_url(REDOC_PAGE) {
            ReDoc::new(config.spec_url(), &config.title).html_bytes()
        } else {
            return None;
        };
        Some(Response::html(StatusCode::OK, page))
    }

    fn error_status(&self) -> StatusCode {
        StatusCode::from_u16(self.inner.config.validation_error_code)
            .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY)
    }
}

impl std::fmt::Debug for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contract")
            .field("id", &self.inner.id)
            .field("mode", &self.inner.config.mode)
            .field("bindings", &self.inner.bindings.read().len())
            .field("stages", &self.inner.pipeline.stage_names())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Contract`].
///
/// Stages run in the order they are added, the first being outermost, and
/// always wrap contract validation.
///
/// ```rust
/// use pactum::Contract;
/// use pactum_middleware::FnMiddleware;
///
/// let contract = Contract::builder()
///     .stage(FnMiddleware::new("audit", |ctx, request, next| {
///         Box::pin(async move { next.run(ctx, request).await })
///     }))
///     .build()
///     .unwrap();
/// # let _ = contract;
/// ```
#[derive(Default)]
pub struct ContractBuilder {
    config: Option<ContractConfig>,
    stages: PipelineBuilder,
    before: Option<BeforeHook>,
    after: Option<AfterHook>,
}

impl ContractBuilder {
    /// Sets the configuration. Defaults apply otherwise.
    pub fn config(mut self, config: ContractConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Appends an interceptor stage.
    pub fn stage<M: Middleware>(mut self, middleware: M) -> Self {
        self.stages = self.stages.stage(middleware);
        self
    }

    /// Sets the default before hook for every binding.
    pub fn before(mut self, hook: BeforeHook) -> Self {
        self.before = Some(hook);
        self
    }

    /// Sets the default after hook for every binding.
    pub fn after(mut self, hook: AfterHook) -> Self {
        self.after = Some(hook);
        self
    }

    /// Validates the configuration and builds the engine.
    pub fn build(self) -> Result<Contract, ConfigError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let defaults = Hooks::default();
        let hooks = Hooks {
            before: self.before.unwrap_or(defaults.before),
            after: self.after.unwrap_or(defaults.after),
        };
        Ok(Contract::from_parts(config, self.stages.build(), hooks))
    }
}

impl std::fmt::Debug for ContractBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
