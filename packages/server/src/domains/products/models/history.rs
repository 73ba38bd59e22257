use chrono::{DateTime, Utc};
use serde::Serialize;

use listing_extraction::{ListingData, ProductDetails, RewrittenListing};

/// Snapshot of one successful rewrite. Never updated after insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub id: i64,
    pub product_id: i64,
    /// Listing the rewrite started from
    pub original: ListingData,
    pub optimized: RewrittenListing,
    pub created_at: DateTime<Utc>,
}

/// A history record joined with its owning product.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub record: HistoryRecord,
    pub asin: String,
    /// The product's current original listing
    pub product_original: ListingData,
}

/// Flat wire shape of a history record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub id: i64,
    pub original_title: String,
    pub original_bullet_points: Vec<String>,
    pub original_description: String,
    pub product_details: ProductDetails,
    pub optimized_title: String,
    pub optimized_bullet_points: Vec<String>,
    pub optimized_description: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<HistoryRecord> for HistoryView {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: record.id,
            original_title: record.original.title,
            original_bullet_points: record.original.bullet_points,
            original_description: record.original.description,
            product_details: record.original.product_details,
            optimized_title: record.optimized.title,
            optimized_bullet_points: record.optimized.bullet_points,
            optimized_description: record.optimized.description,
            keywords: record.optimized.keywords,
            created_at: record.created_at,
        }
    }
}
