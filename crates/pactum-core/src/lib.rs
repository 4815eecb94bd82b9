//! # Pactum Core
//!
//! Shared types for the Pactum API-contract engine.
//!
//! This crate provides the data model every other Pactum crate speaks:
//!
//! - [`ModelRef`] - A declared data model: its name, JSON schema and validator
//! - [`RouteContract`] - Validation metadata recorded for one bound handler
//! - [`RouteEntry`] / [`RouteTable`] - The host's route table, as consumed by the engine
//! - [`EngineId`] - Ownership marker distinguishing engine instances
//! - [`RequestValidationError`] / [`ResponseValidationError`] - Request-time failures
//! - [`ContractError`] - Binding and build-time errors

#![doc(html_root_url = "https://docs.rs/pactum-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contract;
mod error;
mod model;
mod route;
mod validation;

pub use contract::{
    BodySpec, ResponseKind, RouteContract, JSON_CONTENT_TYPE, MULTIPART_CONTENT_TYPE,
};
pub use error::{ContractError, ContractResult};
pub use model::{Model, ModelRef, ValidatedValue};
pub use route::{
    ConverterType, EngineId, ParameterLocation, ParameterSpec, RouteEntry, RouteTable,
    StaticRouteTable,
};
pub use validation::{
    FieldError, Location, RequestValidationError, ResponseValidationError, ValidationErrorItem,
};
