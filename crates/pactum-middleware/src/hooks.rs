//! Before and after hooks.
//!
//! The before hook runs once validation finishes and always precedes the
//! handler. On a rejected request it receives the draft error response and
//! may rewrite it in place. The after hook runs after response validation
//! with the final response.

use std::sync::Arc;

use http::{HeaderMap, Method, Uri};
use pactum_core::{RequestValidationError, ResponseValidationError};
use tracing::error;

use crate::types::{Request, Response};

/// The parts of a request visible to hooks.
#[derive(Debug, Clone)]
pub struct RequestHead {
    /// Request method.
    pub method: Method,
    /// Request URI.
    pub uri: Uri,
    /// Request headers.
    pub headers: HeaderMap,
}

impl RequestHead {
    /// Captures the head of a request.
    #[must_use]
    pub fn of(request: &Request) -> Self {
        Self {
            method: request.method().clone(),
            uri: request.uri().clone(),
            headers: request.headers().clone(),
        }
    }
}

/// Called after request validation, before the handler.
///
/// Arguments: the request head, the draft error response (only when
/// validation failed), and the aggregated validation error.
pub type BeforeHook = Arc<
    dyn Fn(&RequestHead, Option<&mut Response>, Option<&RequestValidationError>) + Send + Sync,
>;

/// Called after response validation with the final response.
pub type AfterHook =
    Arc<dyn Fn(&RequestHead, &mut Response, Option<&ResponseValidationError>) + Send + Sync>;

/// The hooks used when a binding does not override them.
#[must_use]
pub fn default_before() -> BeforeHook {
    Arc::new(|head, _response, err| {
        if let Some(err) = err {
            let errors = err.to_error_map();
            error!(
                method = %head.method,
                path = %head.uri.path(),
                errors = %errors,
                "request validation failed"
            );
        }
    })
}

/// Logs response validation failures.
#[must_use]
pub fn default_after() -> AfterHook {
    Arc::new(|head, _response, err| {
        if let Some(err) = err {
            error!(
                method = %head.method,
                path = %head.uri.path(),
                status = err.status,
                model = %err.model,
                "response validation failed"
            );
        }
    })
}

/// The pair of hooks applied to one binding.
#[derive(Clone)]
pub struct Hooks {
    /// Runs before the handler.
    pub before: BeforeHook,
    /// Runs after response validation.
    pub after: AfterHook,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            before: default_before(),
            after: default_after(),
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}
