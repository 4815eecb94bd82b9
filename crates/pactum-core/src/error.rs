//! Error types for Pactum.
//!
//! [`ContractError`] covers failures that happen while binding handlers or
//! assembling the interface document. Request-time validation failures are not
//! errors in this sense; see [`crate::RequestValidationError`].

use thiserror::Error;

/// Result type alias using [`ContractError`].
pub type ContractResult<T> = Result<T, ContractError>;

/// Errors raised while binding contracts or building the document.
///
/// # Example
///
/// ```
/// use pactum_core::ContractError;
///
/// let err = ContractError::route_grammar("/users/<id>/<id>", "variable name 'id' used twice");
/// assert!(err.to_string().contains("used twice"));
/// ```
#[derive(Error, Debug)]
pub enum ContractError {
    /// A path template could not be parsed.
    #[error("invalid route template {template:?}: {reason}")]
    RouteGrammar {
        /// The offending template.
        template: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A handler declares more than one request-body encoding.
    #[error("handler {handler:?} declares multiple request body content types: {content_types:?}")]
    BodyContentConflict {
        /// Handler name.
        handler: String,
        /// The competing content types.
        content_types: Vec<String>,
    },

    /// A model's JSON schema could not be compiled into a validator.
    #[error("invalid schema for model {model:?}: {reason}")]
    InvalidSchema {
        /// Model name.
        model: String,
        /// Compiler message.
        reason: String,
    },

    /// Serialization of a schema or document failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ContractError {
    /// Creates a route grammar error.
    pub fn route_grammar(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RouteGrammar {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Creates a body content conflict error.
    pub fn body_conflict(handler: impl Into<String>, content_types: Vec<String>) -> Self {
        Self::BodyContentConflict {
            handler: handler.into(),
            content_types,
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error is a template parsing failure.
    #[must_use]
    pub fn is_route_grammar(&self) -> bool {
        matches!(self, Self::RouteGrammar { .. })
    }
}
