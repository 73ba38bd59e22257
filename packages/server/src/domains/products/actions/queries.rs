use listing_extraction::Asin;

use crate::domains::products::error::OptimizeError;
use crate::domains::products::models::{HistoryView, ProductRecord, ProductSummary};
use crate::kernel::ServerDeps;

/// Stored product for `raw_asin`.
pub async fn get_product(raw_asin: &str, deps: &ServerDeps) -> Result<ProductRecord, OptimizeError> {
    let asin = Asin::parse(raw_asin)?;
    deps.store
        .find_product(&asin)
        .await?
        .ok_or_else(|| OptimizeError::NotFound("Product not found".into()))
}

/// History for `raw_asin`, newest first. Unknown ASINs have no history.
pub async fn get_history(raw_asin: &str, deps: &ServerDeps) -> Result<Vec<HistoryView>, OptimizeError> {
    let asin = Asin::parse(raw_asin)?;
    let history = deps.store.list_history(&asin).await?;
    Ok(history.into_iter().map(HistoryView::from).collect())
}

/// Every stored product, most recently updated first.
pub async fn list_products(deps: &ServerDeps) -> Result<Vec<ProductSummary>, OptimizeError> {
    Ok(deps.store.list_products().await?)
}
