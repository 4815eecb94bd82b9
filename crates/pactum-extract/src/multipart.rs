//! Multipart form data flattening.
//!
//! Text fields contribute their text. File parts contribute their file name,
//! so a model can require that a file was sent without the engine buffering
//! it into the validated value.

use std::io;

use bytes::Bytes;
use multer::{Constraints, SizeLimit};

use crate::ExtractionError;

/// Decodes a `multipart/form-data` body into ordered name/value pairs.
///
/// # Errors
///
/// Returns an error if the content type carries no boundary, the body is
/// not well-formed multipart data, or it is longer than `limit` bytes.
pub async fn multipart_pairs(
    content_type: &str,
    body: Bytes,
    limit: usize,
) -> Result<Vec<(String, String)>, ExtractionError> {
    let boundary = multer::parse_boundary(content_type)?;
    let stream = futures_util::stream::once(async move { Ok::<_, io::Error>(body) });
    let constraints =
        Constraints::new().size_limit(SizeLimit::new().whole_stream(limit as u64));
    let mut multipart = multer::Multipart::with_constraints(stream, boundary, constraints);

    let mut pairs = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let value = match field.file_name() {
            Some(file_name) => file_name.to_string(),
            None => field.text().await?,
        };
        pairs.push((name, value));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_TYPE: &str = "multipart/form-data; boundary=XyZ";
    const LIMIT: usize = 64 * 1024;

    fn body() -> Bytes {
        Bytes::from(
            "--XyZ\r\n\
             Content-Disposition: form-data; name=\"title\"\r\n\r\n\
             Report\r\n\
             --XyZ\r\n\
             Content-Disposition: form-data; name=\"tag\"\r\n\r\n\
             a\r\n\
             --XyZ\r\n\
             Content-Disposition: form-data; name=\"tag\"\r\n\r\n\
             b\r\n\
             --XyZ\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"report.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.4\r\n\
             --XyZ--\r\n",
        )
    }

    #[tokio::test]
    async fn test_fields_and_files() {
        let pairs = multipart_pairs(CONTENT_TYPE, body(), LIMIT).await.unwrap();
        assert_eq!(
            pairs,
            vec![
                ("title".to_string(), "Report".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
                ("file".to_string(), "report.pdf".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_boundary() {
        let err = multipart_pairs("multipart/form-data", body(), LIMIT).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Multipart(_)));
    }

    #[tokio::test]
    async fn test_stream_over_limit() {
        let err = multipart_pairs(CONTENT_TYPE, body(), 16).await.unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Multipart(multer::Error::StreamSizeExceeded { limit: 16 })
        ));
    }
}
