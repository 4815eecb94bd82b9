//! Common types used throughout the validation pipeline.

use bytes::Bytes;
use http::{header, StatusCode};
use http_body_util::{BodyExt, Full};
use serde::Serialize;

/// The HTTP request type used in the pipeline.
///
/// This is a standard `http::Request` with a `Full<Bytes>` body.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type used in the pipeline.
///
/// This is a standard `http::Response` with a `Full<Bytes>` body.
pub type Response = http::Response<Full<Bytes>>;

/// Extension trait for building responses.
pub trait ResponseExt {
    /// Creates a plain text response.
    fn text(status: StatusCode, message: &str) -> Response;

    /// Creates a JSON response from any serializable value.
    ///
    /// Falls back to a plain 500 response if the value cannot be serialized.
    fn json<T: Serialize>(status: StatusCode, value: &T) -> Response;

    /// Creates a JSON `{"message": ...}` response.
    fn json_message(status: StatusCode, message: &str) -> Response;

    /// Creates an HTML page response.
    fn html(status: StatusCode, page: Bytes) -> Response;
}

impl ResponseExt for Response {
    fn text(status: StatusCode, message: &str) -> Response {
        build(status, "text/plain; charset=utf-8", Bytes::from(message.to_string()))
    }

    fn json<T: Serialize>(status: StatusCode, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => build(status, "application/json", Bytes::from(body)),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response body");
                internal_error()
            }
        }
    }

    fn json_message(status: StatusCode, message: &str) -> Response {
        Self::json(status, &serde_json::json!({ "message": message }))
    }

    fn html(status: StatusCode, page: Bytes) -> Response {
        build(status, "text/html; charset=utf-8", page)
    }
}

fn build(status: StatusCode, content_type: &'static str, body: Bytes) -> Response {
    http::Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(Full::new(body))
        .unwrap_or_else(|_| internal_error())
}

fn internal_error() -> Response {
    let mut response = http::Response::new(Full::new(Bytes::from_static(b"Internal Server Error")));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

/// Reads a `Full<Bytes>` body into contiguous bytes.
pub async fn collect_body(body: Full<Bytes>) -> Bytes {
    body.collect()
        .await
        .map_or_else(|never| match never {}, http_body_util::Collected::to_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response() {
        let response = Response::text(StatusCode::BAD_REQUEST, "Invalid input");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_json_message_response() {
        let response = Response::json_message(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body = collect_body(response.into_body()).await;
        assert_eq!(&body[..], br#"{"message":"boom"}"#);
    }

    #[test]
    fn test_html_response() {
        let response = Response::html(StatusCode::OK, Bytes::from_static(b"<html></html>"));
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );
    }
}
