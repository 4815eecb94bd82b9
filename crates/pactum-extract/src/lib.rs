//! # Pactum Extract
//!
//! Request parsing for the Pactum contract engine.
//!
//! Every request is reduced to four JSON values, one per validation location,
//! before models are checked against them:
//!
//! | Location | Source | Shape |
//! |----------|--------|-------|
//! | query | query string | flattened multi-dict, see [`flatten_pairs`] |
//! | body | request body | decoded by `Content-Type`, see [`parse_body`] |
//! | headers | headers | lower-case name to last value |
//! | cookies | `Cookie` headers | name to value |
//!
//! Parsing is lenient. An undecodable location becomes an empty object and a
//! `warn!` is logged, leaving model validation to report what is missing.
//!
//! ## Example
//!
//! ```rust
//! use bytes::Bytes;
//! use http::{HeaderMap, Method, Uri};
//! use pactum_extract::{ExtractionContext, ParsedRequest};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let ctx = ExtractionContext::new(
//!     Method::GET,
//!     Uri::from_static("/search?q=rust&page=2"),
//!     HeaderMap::new(),
//!     Bytes::new(),
//! );
//! let parsed = ParsedRequest::parse(&ctx).await;
//! assert_eq!(parsed.query, json!({"q": "rust", "page": 2}));
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/pactum-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod context;
mod cookie;
mod error;
mod headers;
mod multipart;
mod parsed;
mod query;

pub use body::{parse_body, BodyEncoding};
pub use context::{ExtractionContext, DEFAULT_MAX_BODY_SIZE};
pub use cookie::Cookies;
pub use error::ExtractionError;
pub use headers::headers_value;
pub use multipart::multipart_pairs;
pub use parsed::ParsedRequest;
pub use query::{decode_pairs, flatten_pairs, parse_query};
