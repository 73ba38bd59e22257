use serde::Serialize;

use listing_extraction::{ListingData, RewrittenListing};

/// Warning attached when the optimize rewrite fell back to the original.
pub const OPTIMIZE_FALLBACK_WARNING: &str = "AI optimization failed. Showing original content only.";

/// Warning attached when a re-optimize rewrite failed.
pub const REOPTIMIZE_FALLBACK_WARNING: &str = "Re-optimization failed. Using previous version.";

/// Result of an optimize request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeData {
    pub asin: String,
    pub original: ListingData,
    pub optimized: RewrittenListing,
}

/// Result of a re-optimize request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReoptimizeData {
    pub asin: String,
    /// The product's current original listing
    pub original: ListingData,
    pub previous_optimized: RewrittenListing,
    pub new_optimized: RewrittenListing,
}

/// Action result plus the rewrite-fallback flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub data: T,
    pub optimization_failed: bool,
    pub warning: Option<&'static str>,
}

impl<T> Outcome<T> {
    pub fn optimized(data: T) -> Self {
        Self {
            data,
            optimization_failed: false,
            warning: None,
        }
    }

    pub fn fell_back(data: T, warning: &'static str) -> Self {
        Self {
            data,
            optimization_failed: true,
            warning: Some(warning),
        }
    }
}

pub type OptimizeOutcome = Outcome<OptimizeData>;
pub type ReoptimizeOutcome = Outcome<ReoptimizeData>;
