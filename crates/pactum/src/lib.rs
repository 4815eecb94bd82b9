//! # Pactum
//!
//! **A runtime API-contract engine.**
//!
//! Pactum sits between a host HTTP framework and its handlers. Handlers are
//! bound with the data models they expect. Pactum then:
//!
//! - validates the query string, body, headers and cookies of every request,
//!   reporting all failing locations at once
//! - validates handler responses against the model declared for their status
//! - builds an OpenAPI document from the host's route table on first request,
//!   and serves it with Swagger UI and ReDoc viewers
//!
//! ## Quick Start
//!
//! ```rust
//! use bytes::Bytes;
//! use http::{Method, StatusCode};
//! use http_body_util::Full;
//! use pactum::prelude::*;
//! use schemars::JsonSchema;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Greeting {
//!     name: String,
//! }
//!
//! #[derive(Serialize, Deserialize, JsonSchema)]
//! struct Reply {
//!     message: String,
//! }
//!
//! # tokio_test::block_on(async {
//! let contract = Contract::default();
//! let greet = contract.bind(
//!     "greet",
//!     FnHandler::new(|request: Request| async move {
//!         let validated = ValidatedRequest::from_request(&request).cloned().unwrap_or_default();
//!         let name = validated.query::<Greeting>().map_or("stranger", |g| g.name.as_str());
//!         Response::json(StatusCode::OK, &Reply { message: format!("hello {name}") })
//!     }),
//!     Validation::new().query::<Greeting>().response::<Reply>(200),
//! );
//!
//! let request = http::Request::builder()
//!     .uri("/greet?name=ada")
//!     .body(Full::new(Bytes::new()))
//!     .unwrap();
//! assert_eq!(greet.handle(request).await.status(), StatusCode::OK);
//!
//! let table = StaticRouteTable::new().route(greet.route("/greet", vec![Method::GET]));
//! let docs = contract.serve_docs(&table, "/apidoc/openapi.json");
//! assert!(docs.is_some());
//! # });
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Request -> stages... -> ContractValidation -> Handler
//!                               |  parse, validate, before hook
//!                               |  validate response, after hook
//! Response <- stages... <-------'
//! ```

#![doc(html_root_url = "https://docs.rs/pactum/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binding;
mod engine;

pub use binding::{BoundHandler, Validation};
pub use engine::{Contract, ContractBuilder, REDOC_PAGE, SWAGGER_PAGE};

// Re-export component crates
pub use pactum_config as config;
pub use pactum_core as core;
pub use pactum_docs as docs;
pub use pactum_extract as extract;
pub use pactum_middleware as middleware;
pub use pactum_route as route;
pub use pactum_schema as schema;

/// Prelude module for convenient imports.
///
/// ```rust
/// use pactum::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{BoundHandler, Contract, ContractBuilder, Validation};

    pub use pactum_config::{ConfigLoader, ContractConfig, InclusionMode};

    pub use pactum_core::{
        ConverterType, EngineId, Location, Model, ModelRef, RequestValidationError,
        ResponseValidationError, RouteEntry, RouteTable, StaticRouteTable,
    };

    pub use pactum_docs::OpenApi;

    pub use pactum_middleware::{
        FnHandler, FnMiddleware, Handler, Middleware, MiddlewareContext, Next, Request,
        RequestHead, Response, ResponseExt, SyncFnHandler, ValidatedRequest,
    };
}
