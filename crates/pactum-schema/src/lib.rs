//! # Pactum Schema
//!
//! The schema registry: named structural schemas for the models an engine has
//! seen, ready to be emitted as document component schemas.
//!
//! - [`SchemaRegistry`] - Register, resolve and flatten named schemas
//! - [`SchemaModel`] - A canonical registered schema
//! - [`filter`] - Keyword allow-list and reference rewriting

#![doc(html_root_url = "https://docs.rs/pactum-schema/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod filter;
mod registry;

pub use filter::{ALLOWED_KEYWORDS, COMPONENTS_PREFIX};
pub use registry::{SchemaModel, SchemaRegistry};
