//! Ordered interceptor pipeline.
//!
//! Stages run in insertion order: the first stage added is outermost, so its
//! pre-processing runs first and its post-processing runs last. The terminal
//! handler passed to [`Pipeline::process`] runs after every stage.
//!
//! ```text
//! stage(a).stage(b)  =>  a.pre -> b.pre -> handler -> b.post -> a.post
//! ```

use std::sync::Arc;

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{Request, Response};

/// A type-erased stage that can be stored in a vector.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// An immutable, ordered list of interceptor stages.
///
/// # Example
///
/// ```
/// use pactum_middleware::{FnMiddleware, Pipeline};
///
/// let pipeline = Pipeline::builder()
///     .stage(FnMiddleware::new("audit", |ctx, request, next| {
///         Box::pin(async move { next.run(ctx, request).await })
///     }))
///     .build();
/// assert_eq!(pipeline.stage_names(), vec!["audit"]);
/// ```
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<BoxedMiddleware>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new pipeline builder.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Returns a copy of this pipeline with `middleware` appended as the
    /// innermost stage.
    #[must_use]
    pub fn with_innermost(&self, middleware: BoxedMiddleware) -> Self {
        let mut stages = self.stages.clone();
        stages.push(middleware);
        Self { stages }
    }

    /// Runs a request through every stage and then the handler.
    pub async fn process<H>(&self, ctx: &mut MiddlewareContext, request: Request, handler: H) -> Response
    where
        H: FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, Response> + Send,
    {
        let next = self.build_chain(handler);
        next.run(ctx, request).await
    }

    fn build_chain<'a, H>(&'a self, handler: H) -> Next<'a>
    where
        H: FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, Response> + Send + 'a,
    {
        let mut next = Next::handler(handler);
        for middleware in self.stages.iter().rev() {
            next = Next::new(middleware.as_ref(), next);
        }
        next
    }

    /// Returns the stage names, outermost first.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|m| m.name()).collect()
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Builder for constructing a [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    stages: Vec<BoxedMiddleware>,
}

impl PipelineBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage. Earlier stages wrap later ones.
    #[must_use]
    pub fn stage<M: Middleware>(mut self, middleware: M) -> Self {
        self.stages.push(Arc::new(middleware));
        self
    }

    /// Appends an already shared stage.
    #[must_use]
    pub fn shared_stage(mut self, middleware: BoxedMiddleware) -> Self {
        self.stages.push(middleware);
        self
    }

    /// Builds the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResponseExt;
    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::Full;
    use std::sync::Mutex;

    struct Trace {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for Trace {
        fn name(&self) -> &'static str {
            self.name
        }

        fn process<'a>(
            &'a self,
            ctx: &'a mut MiddlewareContext,
            request: Request,
            next: Next<'a>,
        ) -> BoxFuture<'a, Response> {
            Box::pin(async move {
                self.log.lock().unwrap().push(format!("{}:pre", self.name));
                let response = next.run(ctx, request).await;
                self.log.lock().unwrap().push(format!("{}:post", self.name));
                response
            })
        }
    }

    fn request() -> Request {
        http::Request::builder()
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_insertion_order_is_outermost_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::builder()
            .stage(Trace { name: "a", log: Arc::clone(&log) })
            .stage(Trace { name: "b", log: Arc::clone(&log) })
            .build();

        let handler_log = Arc::clone(&log);
        let mut ctx = MiddlewareContext::new();
        let response = pipeline
            .process(&mut ctx, request(), move |_ctx, _req| {
                handler_log.lock().unwrap().push("handler".to_string());
                Box::pin(async { Response::text(StatusCode::OK, "ok") })
            })
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:pre", "b:pre", "handler", "b:post", "a:post"]
        );
    }

    #[tokio::test]
    async fn test_empty_pipeline_runs_handler() {
        let pipeline = Pipeline::new();
        let mut ctx = MiddlewareContext::new();
        let response = pipeline
            .process(&mut ctx, request(), |_ctx, _req| {
                Box::pin(async { Response::text(StatusCode::ACCEPTED, "queued") })
            })
            .await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(pipeline.stage_count(), 0);
    }

    #[test]
    fn test_with_innermost_keeps_original() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let outer = Pipeline::builder()
            .stage(Trace { name: "outer", log: Arc::clone(&log) })
            .build();
        let extended = outer.with_innermost(Arc::new(Trace { name: "inner", log }));

        assert_eq!(outer.stage_names(), vec!["outer"]);
        assert_eq!(extended.stage_names(), vec!["outer", "inner"]);
    }
}
