//! Handlers invoked at the end of the pipeline.
//!
//! A handler may be synchronous or asynchronous; both are exposed through
//! the same [`Handler`] trait so the pipeline never needs to know which.

use std::future::Future;
use std::sync::Arc;

use crate::middleware::BoxFuture;
use crate::types::{Request, Response};

/// A request handler.
pub trait Handler: Send + Sync + 'static {
    /// Handles a request.
    fn call(&self, request: Request) -> BoxFuture<'static, Response>;
}

/// A type-erased handler.
pub type BoxedHandler = Arc<dyn Handler>;

/// Wraps an async function as a [`Handler`].
///
/// ```
/// use http::StatusCode;
/// use pactum_middleware::{FnHandler, Handler, Request, Response, ResponseExt};
///
/// let handler = FnHandler::new(|_request: Request| async {
///     Response::text(StatusCode::OK, "pong")
/// });
/// # let _ = handler;
/// ```
pub struct FnHandler<F> {
    func: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    /// Creates a handler from an async function.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, request: Request) -> BoxFuture<'static, Response> {
        Box::pin((self.func)(request))
    }
}

/// Wraps a blocking function as a [`Handler`].
///
/// The function runs inline when the handler is called.
pub struct SyncFnHandler<F> {
    func: F,
}

impl<F> SyncFnHandler<F>
where
    F: Fn(Request) -> Response + Send + Sync + 'static,
{
    /// Creates a handler from a synchronous function.
    pub const fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Handler for SyncFnHandler<F>
where
    F: Fn(Request) -> Response + Send + Sync + 'static,
{
    fn call(&self, request: Request) -> BoxFuture<'static, Response> {
        let response = (self.func)(request);
        Box::pin(async move { response })
    }
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn call(&self, request: Request) -> BoxFuture<'static, Response> {
        (**self).call(request)
    }
}
