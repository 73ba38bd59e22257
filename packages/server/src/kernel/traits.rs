// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Insert-vs-update and history policy live in domains/products/actions.

use async_trait::async_trait;

use listing_extraction::{Asin, ListingData, RewrittenListing};

use crate::domains::products::models::{
    HistoryEntry, HistoryRecord, ProductRecord, ProductSummary,
};
use crate::kernel::stores::StoreResult;

// =============================================================================
// Product Store Trait (Infrastructure - products + optimization history)
// =============================================================================

/// Persistence for products and their append-only optimization history.
///
/// ASINs arrive canonicalised (see [`Asin::parse`]); stores compare them
/// exactly.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_product(&self, asin: &Asin) -> StoreResult<Option<ProductRecord>>;

    async fn insert_product(
        &self,
        asin: &Asin,
        original: &ListingData,
        optimized: &RewrittenListing,
    ) -> StoreResult<ProductRecord>;

    /// Refresh the scraped listing only; optimized copy is left as is.
    async fn update_original(&self, product_id: i64, original: &ListingData) -> StoreResult<()>;

    async fn update_product(
        &self,
        product_id: i64,
        original: &ListingData,
        optimized: &RewrittenListing,
    ) -> StoreResult<()>;

    async fn update_optimized(
        &self,
        product_id: i64,
        optimized: &RewrittenListing,
    ) -> StoreResult<()>;

    async fn insert_history(
        &self,
        product_id: i64,
        original: &ListingData,
        optimized: &RewrittenListing,
    ) -> StoreResult<HistoryRecord>;

    async fn find_history(&self, history_id: i64) -> StoreResult<Option<HistoryEntry>>;

    /// Newest first.
    async fn list_history(&self, asin: &Asin) -> StoreResult<Vec<HistoryRecord>>;

    /// Most recently updated first.
    async fn list_products(&self) -> StoreResult<Vec<ProductSummary>>;

    /// Cheap liveness check for the health endpoint.
    async fn ping(&self) -> StoreResult<()>;

    /// Backend name (for logging).
    fn name(&self) -> &str;
}
