//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{PoisonError, RwLock};

use listing_extraction::{Asin, ListingData, RewrittenListing};

use super::{StoreError, StoreResult};
use crate::domains::products::models::{
    HistoryEntry, HistoryRecord, ProductRecord, ProductSummary,
};
use crate::kernel::traits::ProductStore;

#[derive(Default)]
struct Tables {
    products: Vec<ProductRecord>,
    history: Vec<HistoryRecord>,
    next_product_id: i64,
    next_history_id: i64,
}

impl Tables {
    fn product_mut(&mut self, product_id: i64) -> StoreResult<&mut ProductRecord> {
        self.products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or(StoreError::ProductNotFound(product_id))
    }
}

/// In-memory product store.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored products.
    pub fn product_count(&self) -> usize {
        self.read().products.len()
    }

    /// Get the number of stored history records.
    pub fn history_count(&self) -> usize {
        self.read().history.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_product(&self, asin: &Asin) -> StoreResult<Option<ProductRecord>> {
        Ok(self
            .read()
            .products
            .iter()
            .find(|p| p.asin == asin.as_str())
            .cloned())
    }

    async fn insert_product(
        &self,
        asin: &Asin,
        original: &ListingData,
        optimized: &RewrittenListing,
    ) -> StoreResult<ProductRecord> {
        let mut tables = self.write();
        if tables.products.iter().any(|p| p.asin == asin.as_str()) {
            return Err(StoreError::DuplicateAsin(asin.to_string()));
        }
        tables.next_product_id += 1;

        let now = Utc::now();
        let record = ProductRecord {
            id: tables.next_product_id,
            asin: asin.to_string(),
            original: original.clone(),
            optimized: optimized.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.products.push(record.clone());
        Ok(record)
    }

    async fn update_original(&self, product_id: i64, original: &ListingData) -> StoreResult<()> {
        let mut tables = self.write();
        let product = tables.product_mut(product_id)?;
        product.original = original.clone();
        product.updated_at = Utc::now();
        Ok(())
    }

    async fn update_product(
        &self,
        product_id: i64,
        original: &ListingData,
        optimized: &RewrittenListing,
    ) -> StoreResult<()> {
        let mut tables = self.write();
        let product = tables.product_mut(product_id)?;
        product.original = original.clone();
        product.optimized = optimized.clone();
        product.updated_at = Utc::now();
        Ok(())
    }

    async fn update_optimized(
        &self,
        product_id: i64,
        optimized: &RewrittenListing,
    ) -> StoreResult<()> {
        let mut tables = self.write();
        let product = tables.product_mut(product_id)?;
        product.optimized = optimized.clone();
        product.updated_at = Utc::now();
        Ok(())
    }

    async fn insert_history(
        &self,
        product_id: i64,
        original: &ListingData,
        optimized: &RewrittenListing,
    ) -> StoreResult<HistoryRecord> {
        let mut tables = self.write();
        tables.product_mut(product_id)?;
        tables.next_history_id += 1;

        let record = HistoryRecord {
            id: tables.next_history_id,
            product_id,
            original: original.clone(),
            optimized: optimized.clone(),
            created_at: Utc::now(),
        };
        tables.history.push(record.clone());
        Ok(record)
    }

    async fn find_history(&self, history_id: i64) -> StoreResult<Option<HistoryEntry>> {
        let tables = self.read();
        let Some(record) = tables.history.iter().find(|h| h.id == history_id) else {
            return Ok(None);
        };
        let Some(product) = tables.products.iter().find(|p| p.id == record.product_id) else {
            return Ok(None);
        };

        Ok(Some(HistoryEntry {
            record: record.clone(),
            asin: product.asin.clone(),
            product_original: product.original.clone(),
        }))
    }

    async fn list_history(&self, asin: &Asin) -> StoreResult<Vec<HistoryRecord>> {
        let tables = self.read();
        let Some(product) = tables.products.iter().find(|p| p.asin == asin.as_str()) else {
            return Ok(Vec::new());
        };

        let mut history: Vec<HistoryRecord> = tables
            .history
            .iter()
            .filter(|h| h.product_id == product.id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(history)
    }

    async fn list_products(&self) -> StoreResult<Vec<ProductSummary>> {
        let tables = self.read();
        let mut products: Vec<&ProductRecord> = tables.products.iter().collect();
        products.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

        Ok(products
            .into_iter()
            .map(|p| ProductSummary {
                asin: p.asin.clone(),
                title: p.original.title.clone(),
                last_updated: p.updated_at,
                optimization_count: tables
                    .history
                    .iter()
                    .filter(|h| h.product_id == p.id)
                    .count() as i64,
            })
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
