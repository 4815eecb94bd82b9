//! Handler binding.
//!
//! [`Validation`] collects what a handler declares about its requests and
//! responses. [`Contract::bind`](crate::Contract::bind) turns it into a
//! [`RouteContract`] and wraps the handler in a [`BoundHandler`].

use std::sync::Arc;

use http::Method;
use pactum_core::{
    BodySpec, EngineId, Location, Model, ModelRef, RequestValidationError, ResponseKind,
    ResponseValidationError, RouteContract, RouteEntry, JSON_CONTENT_TYPE, MULTIPART_CONTENT_TYPE,
};
use pactum_middleware::{
    AfterHook, BeforeHook, BoxFuture, BoxedHandler, Handler, MiddlewareContext, Pipeline, Request,
    RequestHead, Response,
};

/// Validation declared for one handler.
///
/// Header models are matched against lower-case header names, so their
/// fields should be lower-case too.
///
/// # Example
///
/// ```rust
/// use pactum::Validation;
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct Search {
///     q: String,
/// }
///
/// #[derive(Deserialize, JsonSchema)]
/// struct Hits {
///     total: u64,
/// }
///
/// let validation = Validation::new()
///     .query::<Search>()
///     .response::<Hits>(200)
///     .response_without_model(404)
///     .tags(["search"])
///     .doc("Full text search.");
/// # let _ = validation;
/// ```
#[derive(Clone)]
pub struct Validation {
    contract: RouteContract,
    before: Option<BeforeHook>,
    after: Option<AfterHook>,
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}

impl Validation {
    /// Declares nothing; responses are still validated once a model is added.
    #[must_use]
    pub fn new() -> Self {
        Self {
            contract: RouteContract::new(String::new()),
            before: None,
            after: None,
        }
    }

    /// Validates the query string against `T`.
    pub fn query<T: Model>(self) -> Self {
        self.model(Location::Query, ModelRef::of::<T>())
    }

    /// Validates a JSON body against `T`.
    pub fn body<T: Model>(self) -> Self {
        self.body_with(JSON_CONTENT_TYPE, ModelRef::of::<T>())
    }

    /// Validates a `multipart/form-data` body against `T`.
    pub fn form<T: Model>(self) -> Self {
        self.body_with(MULTIPART_CONTENT_TYPE, ModelRef::of::<T>())
    }

    /// Validates a body with an explicit content type.
    ///
    /// Declaring more than one body is recorded as-is and rejected when a
    /// request arrives or the document is built.
    pub fn body_with(mut self, content_type: impl Into<String>, model: ModelRef) -> Self {
        self.contract.bodies.push(BodySpec {
            content_type: content_type.into(),
            model,
        });
        self
    }

    /// Validates request headers against `T`.
    pub fn headers<T: Model>(self) -> Self {
        self.model(Location::Headers, ModelRef::of::<T>())
    }

    /// Validates request cookies against `T`.
    pub fn cookies<T: Model>(self) -> Self {
        self.model(Location::Cookies, ModelRef::of::<T>())
    }

    /// Declares a model for a location, typically a [`ModelRef::dynamic`] one.
    ///
    /// A body declared this way is JSON.
    pub fn model(mut self, location: Location, model: ModelRef) -> Self {
        match location {
            Location::Query => self.contract.query = Some(model),
            Location::Body => return self.body_with(JSON_CONTENT_TYPE, model),
            Location::Headers => self.contract.headers = Some(model),
            Location::Cookies => self.contract.cookies = Some(model),
        }
        self
    }

    /// Declares the response model for a status code.
    pub fn response<T: Model>(self, status: u16) -> Self {
        self.response_model(status, ModelRef::of::<T>())
    }

    /// Declares a response model given as a [`ModelRef`].
    pub fn response_model(mut self, status: u16, model: ModelRef) -> Self {
        self.contract
            .responses
            .insert(status, ResponseKind::Model(model));
        self
    }

    /// Declares a status code returned without a body model.
    pub fn response_without_model(mut self, status: u16) -> Self {
        self.contract.responses.insert(status, ResponseKind::Empty);
        self
    }

    /// Declares a status code that returns a file.
    pub fn file_response(mut self, status: u16) -> Self {
        self.contract.responses.insert(status, ResponseKind::File);
        self
    }

    /// Turns off response validation for this handler.
    pub fn skip_response_validation(mut self) -> Self {
        self.contract.validate_response = false;
        self
    }

    /// Adds document tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contract.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Marks the operation deprecated.
    pub fn deprecated(mut self) -> Self {
        self.contract.deprecated = true;
        self
    }

    /// Sets the handler documentation. The first line becomes the summary.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.contract.doc = Some(doc.into());
        self
    }

    /// Overrides the engine's before hook for this handler.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestHead, Option<&mut Response>, Option<&RequestValidationError>)
            + Send
            + Sync
            + 'static,
    {
        self.before = Some(Arc::new(hook));
        self
    }

    /// Overrides the engine's after hook for this handler.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RequestHead, &mut Response, Option<&ResponseValidationError>) + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(hook));
        self
    }

    pub(crate) fn into_parts(
        self,
        name: &str,
    ) -> (RouteContract, Option<BeforeHook>, Option<AfterHook>) {
        let mut contract = self.contract;
        contract.name = name.to_string();
        (contract, self.before, self.after)
    }
}

impl std::fmt::Debug for Validation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validation")
            .field("contract", &self.contract)
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .finish()
    }
}

/// A handler wrapped in its contract's validation pipeline.
///
/// Cheap to clone. Implements [`Handler`], so it can be handed to anything
/// that dispatches requests to handlers.
#[derive(Clone)]
pub struct BoundHandler {
    owner: EngineId,
    contract: Arc<RouteContract>,
    pipeline: Pipeline,
    handler: BoxedHandler,
}

impl BoundHandler {
    pub(crate) fn new(
        owner: EngineId,
        contract: Arc<RouteContract>,
        pipeline: Pipeline,
        handler: BoxedHandler,
    ) -> Self {
        Self {
            owner,
            contract,
            pipeline,
            handler,
        }
    }

    /// Handler name the binding was recorded under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.contract.name
    }

    /// Engine that owns this binding.
    #[must_use]
    pub fn owner(&self) -> EngineId {
        self.owner
    }

    /// Recorded validation metadata.
    #[must_use]
    pub fn contract(&self) -> &Arc<RouteContract> {
        &self.contract
    }

    /// Stage names, outermost first. The last is always `contract_validation`.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.pipeline.stage_names()
    }

    /// Route table entry for serving this handler at `template`.
    ///
    /// The entry is marked as owned by the binding engine and carries the
    /// handler documentation.
    pub fn route(&self, template: impl Into<String>, methods: Vec<Method>) -> RouteEntry {
        let entry = RouteEntry::new(template, methods, self.name()).owned_by(self.owner);
        match &self.contract.doc {
            Some(doc) => entry.with_doc(doc.clone()),
            None => entry,
        }
    }

    /// Runs a request through the stages, validation and the handler.
    pub async fn handle(&self, request: Request) -> Response {
        let mut ctx = MiddlewareContext::new();
        let handler = Arc::clone(&self.handler);
        self.pipeline
            .process(&mut ctx, request, move |_ctx, request| handler.call(request))
            .await
    }
}

impl Handler for BoundHandler {
    fn call(&self, request: Request) -> BoxFuture<'static, Response> {
        let bound = self.clone();
        Box::pin(async move { bound.handle(request).await })
    }
}

impl std::fmt::Debug for BoundHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundHandler")
            .field("name", &self.contract.name)
            .field("owner", &self.owner)
            .field("stages", &self.pipeline.stage_names())
            .finish_non_exhaustive()
    }
}
