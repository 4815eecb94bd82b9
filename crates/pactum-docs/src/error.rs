//! Error types for the documentation crate.

use pactum_core::ContractError;
use thiserror::Error;

/// Errors that can occur while building or serving the document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// A bound route's metadata cannot be documented.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Failed to serialize the document to JSON.
    #[error("failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error() {
        let err: DocsError = serde_json::from_str::<String>("invalid")
            .unwrap_err()
            .into();
        assert!(matches!(err, DocsError::Serialization(_)));
        assert!(err.to_string().contains("serialize"));
    }

    #[test]
    fn test_contract_error_is_transparent() {
        let err: DocsError = ContractError::route_grammar("/a/<int:", "unbalanced marker").into();
        assert!(matches!(err, DocsError::Contract(_)));
        assert!(err.to_string().contains("/a/<int:"));
    }
}
