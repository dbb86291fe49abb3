use crate::error::CatalogResult;
use async_trait::async_trait;

/// Source of catalog names.
///
/// Abstracts the product store the index is loaded from, so loading can run
/// against a database, an HTTP backend or an in-memory mock.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Retrieve one page of active catalog names.
    ///
    /// A page shorter than `limit` marks the end of the catalog.
    async fn list_names(&self, limit: usize, offset: usize) -> CatalogResult<Vec<String>>;
}
