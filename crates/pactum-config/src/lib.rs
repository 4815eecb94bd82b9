//! Typed configuration for the Pactum contract engine.
//!
//! # Overview
//!
//! [`ContractConfig`] holds every recognized option: the route inclusion mode,
//! the status code of validation error responses, where the document and its
//! viewer pages are served, document metadata, and tag descriptions.
//!
//! [`ConfigLoader`] layers defaults, a TOML or JSON file, and `PACTUM__*`
//! environment variables.
//!
//! # Configuration File Format
//!
//! ```toml
//! mode = "normal"              # normal | greedy | strict
//! validation_error_code = 422
//! path = "apidoc"
//! filename = "openapi.json"
//! openapi_version = "3.0.3"
//! title = "Orders API"
//! version = "1.4"
//! description = "Order intake and fulfilment"
//!
//! [[tags]]
//! name = "orders"
//! description = "Order lifecycle"
//! ```

#![doc(html_root_url = "https://docs.rs/pactum-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{ContractConfig, InclusionMode, TagConfig};
