//! Lazy, process-lifetime document memoization.
//!
//! The document is built on first access and kept for the rest of the
//! process. Routes are static after startup, so there is no invalidation.

use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::error::DocsResult;
use crate::openapi::OpenApi;

/// Holds the first successfully built document.
///
/// Two cold callers racing each other may both run the build. Only one result
/// is stored and both callers receive that stored document. Failed builds are
/// not cached, so the next access retries.
///
/// # Example
///
/// ```rust
/// use pactum_docs::{DocumentCache, Info, OpenApi};
///
/// let cache = DocumentCache::new();
/// assert!(cache.get().is_none());
///
/// let doc = cache
///     .get_or_build(|| {
///         Ok(OpenApi {
///             openapi: "3.0.3".to_string(),
///             info: Info { title: "T".to_string(), version: "1".to_string(), description: None },
///             tags: vec![],
///             paths: Default::default(),
///             components: Default::default(),
///         })
///     })
///     .unwrap();
/// assert_eq!(doc.info.title, "T");
/// assert!(cache.get().is_some());
/// ```
#[derive(Debug, Default)]
pub struct DocumentCache {
    document: OnceLock<Arc<OpenApi>>,
}

impl DocumentCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached document, if built.
    #[must_use]
    pub fn get(&self) -> Option<Arc<OpenApi>> {
        self.document.get().cloned()
    }

    /// Returns the cached document, building it first if needed.
    pub fn get_or_build<F>(&self, build: F) -> DocsResult<Arc<OpenApi>>
    where
        F: FnOnce() -> DocsResult<OpenApi>,
    {
        if let Some(document) = self.document.get() {
            return Ok(Arc::clone(document));
        }

        let built = Arc::new(build()?);
        if self.document.set(Arc::clone(&built)).is_err() {
            debug!("document already built by a concurrent caller");
        }
        Ok(self.document.get().map_or(built, Arc::clone))
    }

    /// True once a document has been stored.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.document.get().is_some()
    }
}
