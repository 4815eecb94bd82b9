//! Middleware context types.
//!
//! The [`MiddlewareContext`] carries per-request state through the interceptor
//! stages. It is created for one request and never shared between requests.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use uuid::Uuid;

/// Where a request is in the validation state machine.
///
/// ```text
/// Start -> RequestParsed -> RequestValidated -> HandlerInvoked -> ResponseValidated -> Done
///                        \-> RequestRejected -> Done          \-> ResponseRejected -> Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPhase {
    /// Nothing has run yet.
    #[default]
    Start,
    /// The four request locations have been parsed.
    RequestParsed,
    /// Every declared request model accepted its input.
    RequestValidated,
    /// At least one declared request model rejected its input.
    RequestRejected,
    /// The handler has returned.
    HandlerInvoked,
    /// The response passed (or skipped) response validation.
    ResponseValidated,
    /// The response failed validation and was replaced.
    ResponseRejected,
    /// A response has been produced.
    Done,
}

impl ValidationPhase {
    /// Returns true if `next` is a legal successor of this phase.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Start, Self::RequestParsed | Self::Done)
                | (Self::RequestParsed, Self::RequestValidated | Self::RequestRejected)
                | (Self::RequestValidated, Self::HandlerInvoked)
                | (Self::RequestRejected, Self::Done)
                | (Self::HandlerInvoked, Self::ResponseValidated | Self::ResponseRejected)
                | (Self::ResponseValidated | Self::ResponseRejected, Self::Done)
        )
    }
}

impl fmt::Display for ValidationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::RequestParsed => "request_parsed",
            Self::RequestValidated => "request_validated",
            Self::RequestRejected => "request_rejected",
            Self::HandlerInvoked => "handler_invoked",
            Self::ResponseValidated => "response_validated",
            Self::ResponseRejected => "response_rejected",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Context that flows through the interceptor stages of one request.
///
/// # Example
///
/// ```
/// use pactum_middleware::{MiddlewareContext, ValidationPhase};
///
/// let mut ctx = MiddlewareContext::new();
/// ctx.set_endpoint("list_users");
/// assert_eq!(ctx.endpoint(), Some("list_users"));
/// assert_eq!(ctx.phase(), ValidationPhase::Start);
/// ```
pub struct MiddlewareContext {
    request_id: Uuid,
    endpoint: Option<String>,
    phase: ValidationPhase,
    started_at: Instant,
    extensions: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl MiddlewareContext {
    /// Creates a context with a fresh UUID v7 request id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_id(Uuid::now_v7())
    }

    /// Creates a context with a specific request id.
    #[must_use]
    pub fn with_request_id(request_id: Uuid) -> Self {
        Self {
            request_id,
            endpoint: None,
            phase: ValidationPhase::Start,
            started_at: Instant::now(),
            extensions: HashMap::new(),
        }
    }

    /// Returns the request id.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Sets the request id.
    pub fn set_request_id(&mut self, request_id: Uuid) {
        self.request_id = request_id;
    }

    /// Returns the bound handler name, once known.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Records the bound handler name.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = Some(endpoint.into());
    }

    /// Returns the current validation phase.
    #[must_use]
    pub fn phase(&self) -> ValidationPhase {
        self.phase
    }

    /// Moves the validation state machine forward.
    ///
    /// An illegal transition is logged and applied anyway; the phase is
    /// diagnostic state, not a gate.
    pub fn advance(&mut self, next: ValidationPhase) {
        if !self.phase.can_advance_to(next) {
            tracing::warn!(
                request_id = %self.request_id,
                from = %self.phase,
                to = %next,
                "unexpected validation phase transition"
            );
        }
        tracing::trace!(request_id = %self.request_id, phase = %next, "validation phase");
        self.phase = next;
    }

    /// Returns when the request started processing.
    #[must_use]
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Returns the elapsed time since the request started.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Stores a typed extension value.
    ///
    /// ```
    /// use pactum_middleware::MiddlewareContext;
    ///
    /// struct Tenant(&'static str);
    ///
    /// let mut ctx = MiddlewareContext::new();
    /// ctx.set_extension(Tenant("acme"));
    /// assert_eq!(ctx.get_extension::<Tenant>().unwrap().0, "acme");
    /// ```
    pub fn set_extension<T: Send + Sync + 'static>(&mut self, value: T) {
        self.extensions.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Retrieves a typed extension value.
    #[must_use]
    pub fn get_extension<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Removes and returns a typed extension value.
    pub fn remove_extension<T: Send + Sync + 'static>(&mut self) -> Option<T> {
        self.extensions
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|b| *b)
    }

    /// Checks if an extension of the given type exists.
    #[must_use]
    pub fn has_extension<T: Send + Sync + 'static>(&self) -> bool {
        self.extensions.contains_key(&TypeId::of::<T>())
    }
}

impl Default for MiddlewareContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MiddlewareContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareContext")
            .field("request_id", &self.request_id)
            .field("endpoint", &self.endpoint)
            .field("phase", &self.phase)
            .field("extensions", &self.extensions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(MiddlewareContext::new().request_id(), MiddlewareContext::new().request_id());
    }

    #[test]
    fn test_happy_path_transitions() {
        use ValidationPhase::*;
        let path = [
            Start,
            RequestParsed,
            RequestValidated,
            HandlerInvoked,
            ResponseValidated,
            Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_rejected_request_skips_handler() {
        assert!(ValidationPhase::RequestRejected.can_advance_to(ValidationPhase::Done));
        assert!(!ValidationPhase::RequestRejected.can_advance_to(ValidationPhase::HandlerInvoked));
        assert!(!ValidationPhase::Start.can_advance_to(ValidationPhase::HandlerInvoked));
    }

    #[test]
    fn test_advance_records_phase() {
        let mut ctx = MiddlewareContext::new();
        ctx.advance(ValidationPhase::RequestParsed);
        ctx.advance(ValidationPhase::RequestRejected);
        ctx.advance(ValidationPhase::Done);
        assert_eq!(ctx.phase(), ValidationPhase::Done);
    }

    #[test]
    fn test_extensions() {
        #[derive(Debug, PartialEq)]
        struct Marker(u8);

        let mut ctx = MiddlewareContext::new();
        assert!(!ctx.has_extension::<Marker>());
        ctx.set_extension(Marker(7));
        assert_eq!(ctx.get_extension::<Marker>(), Some(&Marker(7)));
        assert_eq!(ctx.remove_extension::<Marker>(), Some(Marker(7)));
        assert!(!ctx.has_extension::<Marker>());
    }
}
