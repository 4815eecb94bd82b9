//! Interceptor stages.
//!
//! - [`contract`] - Request and response validation for one binding

pub mod contract;

pub use contract::{ContractValidation, BODY_CONFLICT_MESSAGE, RESPONSE_VALIDATION_MESSAGE};
