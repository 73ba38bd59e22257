use chrono::{DateTime, Utc};
use serde::Serialize;

use listing_extraction::{ListingData, RewrittenListing};

/// Stored product: the latest scraped listing and the current optimized copy.
///
/// One row per ASIN. `optimized` holds the most recent successful rewrite,
/// or the fallback copy if no rewrite ever succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(skip)]
    pub id: i64,
    pub asin: String,
    pub original: ListingData,
    pub optimized: RewrittenListing,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of the ASIN index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub asin: String,
    /// Original (scraped) title
    pub title: String,
    pub last_updated: DateTime<Utc>,
    pub optimization_count: i64,
}
