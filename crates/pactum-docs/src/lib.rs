//! # Pactum Docs
//!
//! Interface document generation for the Pactum contract engine.
//!
//! This crate provides:
//! - **OpenAPI types** for the document the engine emits
//! - **[`SpecBuilder`]** which walks the host route table and the schema registry
//! - **[`DocumentCache`]** which builds the document once per process
//! - **Swagger UI** and **ReDoc** viewer pages
//!
//! ## Quick Start
//!
//! ```rust
//! use http::Method;
//! use pactum_config::ContractConfig;
//! use pactum_core::{EngineId, RouteEntry, StaticRouteTable};
//! use pactum_docs::{DocumentCache, SpecBuilder, SwaggerUi};
//! use pactum_schema::SchemaRegistry;
//!
//! let engine = EngineId::new();
//! let config = ContractConfig::default();
//! let registry = SchemaRegistry::new();
//! let table = StaticRouteTable::new()
//!     .route(RouteEntry::new("/ping", vec![Method::GET], "ping").owned_by(engine));
//!
//! let cache = DocumentCache::new();
//! let doc = cache
//!     .get_or_build(|| SpecBuilder::new(engine, &config, &registry).build(&table, &|_| None))
//!     .unwrap();
//! assert!(doc.paths.contains_key("/ping"));
//!
//! let page = SwaggerUi::new(config.spec_url(), &config.title);
//! assert!(page.html().contains("/apidoc/openapi.json"));
//! ```

#![doc(html_root_url = "https://docs.rs/pactum-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod builder;
mod cache;
mod error;
mod openapi;
mod redoc;
mod swagger;

pub use builder::{ContractLookup, SpecBuilder, STATIC_PREFIX};
pub use cache::DocumentCache;
pub use error::{DocsError, DocsResult};
pub use openapi::{
    Components, Info, MediaType, OpenApi, Operation, Parameter, PathItem, RequestBody, Response,
    Tag,
};
pub use redoc::{ExpandResponses, ReDoc};
pub use swagger::{DocExpansion, SwaggerUi};
