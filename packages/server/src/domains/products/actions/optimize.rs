use tracing::{debug, info, warn};

use listing_extraction::Asin;

use crate::domains::products::data::{OptimizeData, OptimizeOutcome, OPTIMIZE_FALLBACK_WARNING};
use crate::domains::products::error::OptimizeError;
use crate::kernel::ServerDeps;

/// Scrape, rewrite and persist the listing for `raw_asin`.
///
/// A failed fetch fails the request. A failed rewrite does not: the response
/// carries the original copy with `optimization_failed` set, an existing
/// product keeps its previous optimized copy, and no history is written.
pub async fn optimize_product(
    raw_asin: &str,
    deps: &ServerDeps,
) -> Result<OptimizeOutcome, OptimizeError> {
    let asin = Asin::parse(raw_asin)?;
    info!(asin = %asin, "Optimizing product listing");

    let original = deps.extractor.extract(&asin).await?;

    let (optimized, failed) = match deps.rewriter.rewrite(&original).await {
        Ok(rewritten) => (rewritten, false),
        Err(e) => {
            warn!(asin = %asin, error = %e, "Rewrite failed, falling back to original content");
            (original.as_fallback_rewrite(), true)
        }
    };

    let product_id = match deps.store.find_product(&asin).await? {
        Some(existing) if failed => {
            deps.store.update_original(existing.id, &original).await?;
            existing.id
        }
        Some(existing) => {
            deps.store
                .update_product(existing.id, &original, &optimized)
                .await?;
            existing.id
        }
        None => {
            deps.store
                .insert_product(&asin, &original, &optimized)
                .await?
                .id
        }
    };

    if !failed {
        let history = deps
            .store
            .insert_history(product_id, &original, &optimized)
            .await?;
        debug!(asin = %asin, history_id = history.id, "Optimization recorded");
    }

    let data = OptimizeData {
        asin: asin.to_string(),
        original,
        optimized,
    };

    Ok(if failed {
        OptimizeOutcome::fell_back(data, OPTIMIZE_FALLBACK_WARNING)
    } else {
        OptimizeOutcome::optimized(data)
    })
}
