//! # Pactum Middleware
//!
//! Request validation pipeline for the Pactum contract engine.
//!
//! A bound handler runs behind an ordered list of interceptor stages. The
//! stages supplied by the engine run first, in insertion order, and the
//! [`ContractValidation`] stage is always innermost:
//!
//! ```text
//! Request -> stage 1 -> ... -> stage n -> ContractValidation -> Handler
//!                                                                  |
//! Response <- stage 1 <- ... <- stage n <- ContractValidation <----'
//! ```
//!
//! `ContractValidation` parses the request, validates every location with a
//! declared model, runs the before hook, calls the handler, validates the
//! response and runs the after hook.
//!
//! ## Example
//!
//! ```
//! use pactum_middleware::{FnMiddleware, Pipeline};
//!
//! let pipeline = Pipeline::builder()
//!     .stage(FnMiddleware::new("passthrough", |ctx, request, next| {
//!         Box::pin(async move { next.run(ctx, request).await })
//!     }))
//!     .build();
//! assert_eq!(pipeline.stage_count(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/pactum-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod handler;
pub mod hooks;
pub mod middleware;
pub mod pipeline;
pub mod stages;
pub mod types;
pub mod validated;

pub use context::{MiddlewareContext, ValidationPhase};
pub use handler::{BoxedHandler, FnHandler, Handler, SyncFnHandler};
pub use hooks::{default_after, default_before, AfterHook, BeforeHook, Hooks, RequestHead};
pub use middleware::{BoxFuture, FnMiddleware, Middleware, Next};
pub use pipeline::{BoxedMiddleware, Pipeline, PipelineBuilder};
pub use stages::ContractValidation;
pub use types::{collect_body, Request, Response, ResponseExt};
pub use validated::ValidatedRequest;
