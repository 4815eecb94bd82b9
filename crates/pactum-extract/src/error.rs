//! Extraction error types.
//!
//! Parsing never rejects a request on its own: the engine degrades an
//! undecodable input to an empty object and lets model validation report what
//! is missing. These errors exist so the degraded paths can be logged.

use std::io;

use thiserror::Error;

/// Why a request part could not be decoded.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The body, raw or decompressed, is larger than the configured limit.
    #[error("request body exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// Limit in bytes.
        limit: usize,
    },

    /// Gzip decompression failed.
    #[error("failed to decompress request body: {0}")]
    Decompress(#[source] io::Error),

    /// The body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// The multipart body is malformed.
    #[error("invalid multipart body: {0}")]
    Multipart(#[from] multer::Error),

    /// A form body is not UTF-8.
    #[error("form body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A URL-encoded query string or form is malformed.
    #[error("invalid url-encoded data: {0}")]
    UrlEncoded(#[from] serde_urlencoded::de::Error),
}
