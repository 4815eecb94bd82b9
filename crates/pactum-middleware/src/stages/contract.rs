//! Contract validation stage.
//!
//! Always the innermost stage of a bound handler's pipeline. It drives the
//! per-request state machine:
//!
//! 1. Parse query, body, headers and cookies.
//! 2. Validate every location that declares a model, collecting all failures.
//! 3. On failure, build the error response, run the before hook, and return
//!    without calling the handler.
//! 4. Otherwise run the before hook, attach [`ValidatedRequest`] and call the
//!    handler.
//! 5. Validate the response against the model declared for its status,
//!    replacing it with a 500 on mismatch.
//! 6. Run the after hook and return.

use std::sync::Arc;

use http::StatusCode;
use http_body_util::Full;
use pactum_core::{
    FieldError, Location, RequestValidationError, ResponseValidationError, RouteContract,
    ValidationErrorItem,
};
use pactum_extract::{ExtractionContext, ParsedRequest, DEFAULT_MAX_BODY_SIZE};
use serde_json::Value;
use tracing::{debug, error};

use crate::context::{MiddlewareContext, ValidationPhase};
use crate::hooks::{Hooks, RequestHead};
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{collect_body, Request, Response, ResponseExt};
use crate::validated::ValidatedRequest;

/// Body of the response substituted for one that failed validation.
pub const RESPONSE_VALIDATION_MESSAGE: &str = "response validation error";

/// Body of the response returned when a binding declares several bodies.
pub const BODY_CONFLICT_MESSAGE: &str = "request body declares multiple content types";

/// Validates requests and responses against one [`RouteContract`].
#[derive(Debug, Clone)]
pub struct ContractValidation {
    contract: Arc<RouteContract>,
    hooks: Hooks,
    error_status: StatusCode,
    max_body_size: usize,
}

impl ContractValidation {
    /// Creates the stage for a contract.
    ///
    /// `error_status` is the status of request validation error responses.
    #[must_use]
    pub fn new(contract: Arc<RouteContract>, hooks: Hooks, error_status: StatusCode) -> Self {
        Self {
            contract,
            hooks,
            error_status,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Sets the largest request body, in bytes, that is decoded for validation.
    #[must_use]
    pub fn with_max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    /// Returns the contract this stage enforces.
    #[must_use]
    pub fn contract(&self) -> &RouteContract {
        &self.contract
    }

    /// Validates every location that declares a model.
    ///
    /// All four locations are attempted; failures are aggregated.
    pub fn validate_request(
        &self,
        parsed: &ParsedRequest,
    ) -> Result<ValidatedRequest, RequestValidationError> {
        let mut validated = ValidatedRequest::default();
        let mut errors = RequestValidationError::new();

        for location in Location::ALL {
            let Some(model) = self.contract.model_for(location) else {
                continue;
            };
            let input = parsed.get(location);
            match model.validate(input) {
                Ok(value) => validated.set(location, value),
                Err(field_errors) => errors.push(ValidationErrorItem {
                    location,
                    model: model.name().to_string(),
                    errors: field_errors,
                    input: input.clone(),
                }),
            }
        }

        errors.into_result().map(|()| validated)
    }

    /// Checks a handler response against the model declared for its status.
    ///
    /// Returns the response to send and the failure, if any. A failing
    /// response is replaced by a fixed 500 payload.
    pub async fn validate_response(
        &self,
        response: Response,
    ) -> (Response, Option<ResponseValidationError>) {
        if !self.contract.validate_response {
            return (response, None);
        }
        let status = response.status().as_u16();
        let Some(model) = self.contract.response_model(status) else {
            return (response, None);
        };

        let (parts, body) = response.into_parts();
        let bytes = collect_body(body).await;

        let checked = match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => model.validate(&value).map(|_| ()),
            Err(err) => Err(vec![FieldError::new("", err.to_string(), "json")]),
        };

        match checked {
            Ok(()) => (Response::from_parts(parts, Full::new(bytes)), None),
            Err(errors) => {
                let failure = ResponseValidationError {
                    status,
                    model: model.name().to_string(),
                    errors,
                };
                let replacement = Response::json_message(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RESPONSE_VALIDATION_MESSAGE,
                );
                (replacement, Some(failure))
            }
        }
    }
}

impl Middleware for ContractValidation {
    fn name(&self) -> &'static str {
        "contract_validation"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut MiddlewareContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            ctx.set_endpoint(&self.contract.name);

            let body_spec = match self.contract.body() {
                Ok(spec) => spec,
                Err(err) => {
                    error!(request_id = %ctx.request_id(), error = %err, "rejecting request");
                    ctx.advance(ValidationPhase::Done);
                    return Response::json_message(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        BODY_CONFLICT_MESSAGE,
                    );
                }
            };

            let head = RequestHead::of(&request);
            let (parts, body) = request.into_parts();
            let bytes = collect_body(body).await;
            let extraction = ExtractionContext::from_parts(&parts, bytes.clone())
                .with_max_body_size(self.max_body_size);
            // Without a body model the body is handed to the handler undecoded.
            let parsed = if body_spec.is_some() {
                ParsedRequest::parse(&extraction).await
            } else {
                ParsedRequest::parse_without_body(&extraction)
            };
            ctx.advance(ValidationPhase::RequestParsed);

            let validated = match self.validate_request(&parsed) {
                Ok(validated) => validated,
                Err(errors) => {
                    ctx.advance(ValidationPhase::RequestRejected);
                    debug!(
                        request_id = %ctx.request_id(),
                        endpoint = %self.contract.name,
                        locations = %errors,
                        "request rejected"
                    );
                    let mut response = Response::json(self.error_status, &errors.to_error_map());
                    (self.hooks.before)(&head, Some(&mut response), Some(&errors));
                    ctx.advance(ValidationPhase::Done);
                    return response;
                }
            };
            ctx.advance(ValidationPhase::RequestValidated);
            (self.hooks.before)(&head, None, None);

            let mut request = Request::from_parts(parts, Full::new(bytes));
            request.extensions_mut().insert(validated);
            let response = next.run(ctx, request).await;
            ctx.advance(ValidationPhase::HandlerInvoked);

            let (mut response, failure) = self.validate_response(response).await;
            ctx.advance(if failure.is_some() {
                ValidationPhase::ResponseRejected
            } else {
                ValidationPhase::ResponseValidated
            });

            (self.hooks.after)(&head, &mut response, failure.as_ref());
            ctx.advance(ValidationPhase::Done);
            response
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use pactum_core::{BodySpec, ModelRef, ResponseKind, JSON_CONTENT_TYPE, MULTIPART_CONTENT_TYPE};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn int_model(name: &str, field: &str) -> ModelRef {
        ModelRef::dynamic(
            name,
            json!({
                "type": "object",
                "properties": { field: { "type": "integer" } },
                "required": [field]
            }),
        )
    }

    fn stage(contract: RouteContract) -> ContractValidation {
        ContractValidation::new(
            Arc::new(contract),
            Hooks::default(),
            StatusCode::UNPROCESSABLE_ENTITY,
        )
    }

    fn post_json(body: &'static [u8]) -> Request {
        http::Request::builder()
            .method(http::Method::POST)
            .uri("/")
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from_static(body)))
            .unwrap()
    }

    fn get(uri: &str) -> Request {
        http::Request::builder()
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn run(stage: &ContractValidation, request: Request, body: Value, calls: &AtomicUsize) -> (MiddlewareContext, Response) {
        let mut ctx = MiddlewareContext::new();
        let next = Next::handler(move |_ctx, _req| {
            calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move { Response::json(StatusCode::OK, &body) })
        });
        let response = stage.process(&mut ctx, request, next).await;
        (ctx, response)
    }

    async fn json_body(response: Response) -> Value {
        serde_json::from_slice(&collect_body(response.into_body()).await).unwrap()
    }

    #[tokio::test]
    async fn test_valid_query_reaches_handler() {
        let mut contract = RouteContract::new("list");
        contract.query = Some(int_model("ListQuery", "a"));
        let calls = AtomicUsize::new(0);

        let (ctx, response) = run(&stage(contract), get("/?a=5"), json!({}), &calls).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.phase(), ValidationPhase::Done);
        assert_eq!(ctx.endpoint(), Some("list"));
    }

    #[tokio::test]
    async fn test_invalid_query_is_rejected() {
        let mut contract = RouteContract::new("list");
        contract.query = Some(int_model("ListQuery", "a"));
        let calls = AtomicUsize::new(0);

        let (_, response) = run(&stage(contract), get("/?a=foo"), json!({}), &calls).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let body = json_body(response).await;
        assert_eq!(body.as_object().unwrap().len(), 1);
        assert_eq!(body["query"]["model"], "ListQuery");
        assert_eq!(body["query"]["input"], json!({"a": "foo"}));
    }

    #[tokio::test]
    async fn test_body_conflict_is_fatal() {
        let mut contract = RouteContract::new("upload");
        for content_type in [JSON_CONTENT_TYPE, MULTIPART_CONTENT_TYPE] {
            contract.bodies.push(BodySpec {
                content_type: content_type.to_string(),
                model: int_model("Upload", "size"),
            });
        }
        let calls = AtomicUsize::new(0);

        let (ctx, response) = run(&stage(contract), get("/"), json!({}), &calls).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.phase(), ValidationPhase::Done);
        assert_eq!(json_body(response).await, json!({"message": BODY_CONFLICT_MESSAGE}));
    }

    #[tokio::test]
    async fn test_bad_response_is_replaced() {
        let mut contract = RouteContract::new("get_item");
        contract
            .responses
            .insert(200, ResponseKind::Model(int_model("Item", "id")));
        let calls = AtomicUsize::new(0);

        let (_, response) = run(&stage(contract), get("/"), json!({"id": "x"}), &calls).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({"message": RESPONSE_VALIDATION_MESSAGE})
        );
    }

    #[tokio::test]
    async fn test_response_validation_can_be_skipped() {
        let mut contract = RouteContract::new("get_item");
        contract
            .responses
            .insert(200, ResponseKind::Model(int_model("Item", "id")));
        contract.validate_response = false;
        let calls = AtomicUsize::new(0);

        let (_, response) = run(&stage(contract), get("/"), json!({"id": "x"}), &calls).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"id": "x"}));
    }

    #[tokio::test]
    async fn test_undeclared_status_is_not_checked() {
        let mut contract = RouteContract::new("get_item");
        contract
            .responses
            .insert(201, ResponseKind::Model(int_model("Item", "id")));
        let calls = AtomicUsize::new(0);

        let (_, response) = run(&stage(contract), get("/"), json!("anything"), &calls).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_oversized_body_reads_as_empty() {
        let mut contract = RouteContract::new("create");
        contract.bodies.push(BodySpec {
            content_type: JSON_CONTENT_TYPE.to_string(),
            model: int_model("Create", "size"),
        });
        let stage = stage(contract).with_max_body_size(8);
        let calls = AtomicUsize::new(0);

        let (_, response) = run(&stage, post_json(br#"{"size": 12345}"#), json!({}), &calls).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(json_body(response).await["body"]["input"], json!({}));
    }

    #[tokio::test]
    async fn test_body_not_decoded_without_model() {
        let mut contract = RouteContract::new("ping");
        contract.query = Some(int_model("PingQuery", "a"));
        let stage = stage(contract).with_max_body_size(4);

        let mut ctx = MiddlewareContext::new();
        let request = post_json(br#"{"size": 12345}"#);
        let request = {
            let (mut parts, body) = request.into_parts();
            parts.uri = http::Uri::from_static("/?a=1");
            Request::from_parts(parts, body)
        };
        let next = Next::handler(|_ctx, req| {
            Box::pin(async move {
                let validated = ValidatedRequest::from_request(&req).cloned().unwrap();
                assert!(validated.get(Location::Query).is_some());
                assert!(validated.get(Location::Body).is_none());
                let bytes = collect_body(req.into_body()).await;
                assert_eq!(&bytes[..], br#"{"size": 12345}"#);
                Response::json(StatusCode::OK, &json!({}))
            })
        });

        let response = stage.process(&mut ctx, request, next).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
