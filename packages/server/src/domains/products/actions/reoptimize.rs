use tracing::{info, warn};

use crate::domains::products::data::{
    ReoptimizeData, ReoptimizeOutcome, REOPTIMIZE_FALLBACK_WARNING,
};
use crate::domains::products::error::OptimizeError;
use crate::kernel::ServerDeps;

/// Rewrite again, starting from a history record's optimized copy.
///
/// The baseline is the record's optimized listing with the product's current
/// details, the same details reported back as `original`. On success the product's optimized copy is replaced and a new
/// history record is appended. On failure nothing is written and the
/// previous optimized copy is returned as `new_optimized`.
pub async fn reoptimize_from_history(
    history_id: Option<i64>,
    deps: &ServerDeps,
) -> Result<ReoptimizeOutcome, OptimizeError> {
    let history_id = history_id
        .filter(|id| *id > 0)
        .ok_or_else(|| OptimizeError::Validation("History ID is required".into()))?;

    let entry = deps
        .store
        .find_history(history_id)
        .await?
        .ok_or_else(|| OptimizeError::NotFound("History record not found".into()))?;

    info!(history_id, asin = %entry.asin, "Re-optimizing from history");

    let product_id = entry.record.product_id;
    let previous = entry.record.optimized;
    let baseline = previous
        .clone()
        .into_baseline(entry.product_original.product_details.clone());

    match deps.rewriter.rewrite(&baseline).await {
        Ok(rewritten) => {
            deps.store.update_optimized(product_id, &rewritten).await?;
            deps.store
                .insert_history(product_id, &baseline, &rewritten)
                .await?;

            Ok(ReoptimizeOutcome::optimized(ReoptimizeData {
                asin: entry.asin,
                original: entry.product_original,
                previous_optimized: previous,
                new_optimized: rewritten,
            }))
        }
        Err(e) => {
            warn!(history_id, error = %e, "Re-optimization failed, keeping previous version");

            Ok(ReoptimizeOutcome::fell_back(
                ReoptimizeData {
                    asin: entry.asin,
                    original: entry.product_original,
                    new_optimized: previous.clone(),
                    previous_optimized: previous,
                },
                REOPTIMIZE_FALLBACK_WARNING,
            ))
        }
    }
}
