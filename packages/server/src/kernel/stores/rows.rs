// Row types shared by the SQL stores.
//
// Structured-text columns come back as raw text and go through
// common::decode; nothing here fails on a corrupt value.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use listing_extraction::{ListingData, RewrittenListing};

use crate::common::decode;
use crate::domains::products::models::{
    HistoryEntry, HistoryRecord, ProductRecord, ProductSummary,
};

/// Encoded listing columns, ready to bind.
pub(crate) struct EncodedListing {
    pub bullet_points: String,
    pub product_details: String,
}

impl EncodedListing {
    pub fn new(listing: &ListingData) -> Self {
        Self {
            bullet_points: decode::encode(&listing.bullet_points),
            product_details: decode::encode(&listing.product_details),
        }
    }
}

/// Encoded rewrite columns, ready to bind.
pub(crate) struct EncodedRewrite {
    pub bullet_points: String,
    pub keywords: String,
}

impl EncodedRewrite {
    pub fn new(rewrite: &RewrittenListing) -> Self {
        Self {
            bullet_points: decode::encode(&rewrite.bullet_points),
            keywords: decode::encode(&rewrite.keywords),
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ProductRow {
    id: i64,
    asin: String,
    original_title: Option<String>,
    original_bullet_points: Option<String>,
    original_description: Option<String>,
    product_details: Option<String>,
    optimized_title: Option<String>,
    optimized_bullet_points: Option<String>,
    optimized_description: Option<String>,
    keywords: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    pub fn into_record(self) -> ProductRecord {
        ProductRecord {
            id: self.id,
            asin: self.asin,
            original: listing(
                self.original_title,
                self.original_bullet_points.as_deref(),
                self.original_description,
                self.product_details.as_deref(),
            ),
            optimized: rewrite(
                self.optimized_title,
                self.optimized_bullet_points.as_deref(),
                self.optimized_description,
                self.keywords.as_deref(),
            ),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct HistoryRow {
    id: i64,
    product_id: i64,
    original_title: Option<String>,
    original_bullet_points: Option<String>,
    original_description: Option<String>,
    product_details: Option<String>,
    optimized_title: Option<String>,
    optimized_bullet_points: Option<String>,
    optimized_description: Option<String>,
    keywords: Option<String>,
    created_at: DateTime<Utc>,
}

impl HistoryRow {
    pub fn into_record(self) -> HistoryRecord {
        HistoryRecord {
            id: self.id,
            product_id: self.product_id,
            original: listing(
                self.original_title,
                self.original_bullet_points.as_deref(),
                self.original_description,
                self.product_details.as_deref(),
            ),
            optimized: rewrite(
                self.optimized_title,
                self.optimized_bullet_points.as_deref(),
                self.optimized_description,
                self.keywords.as_deref(),
            ),
            created_at: self.created_at,
        }
    }
}

/// History row joined with its product. Product columns are aliased with a
/// `product_` prefix.
#[derive(Debug, FromRow)]
pub(crate) struct HistoryEntryRow {
    #[sqlx(flatten)]
    history: HistoryRow,
    asin: String,
    product_original_title: Option<String>,
    product_original_bullet_points: Option<String>,
    product_original_description: Option<String>,
    product_product_details: Option<String>,
}

impl HistoryEntryRow {
    pub fn into_entry(self) -> HistoryEntry {
        HistoryEntry {
            product_original: listing(
                self.product_original_title,
                self.product_original_bullet_points.as_deref(),
                self.product_original_description,
                self.product_product_details.as_deref(),
            ),
            asin: self.asin,
            record: self.history.into_record(),
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct SummaryRow {
    asin: String,
    original_title: Option<String>,
    updated_at: DateTime<Utc>,
    optimization_count: i64,
}

impl SummaryRow {
    pub fn into_summary(self) -> ProductSummary {
        ProductSummary {
            asin: self.asin,
            title: decode::text(self.original_title),
            last_updated: self.updated_at,
            optimization_count: self.optimization_count,
        }
    }
}

fn listing(
    title: Option<String>,
    bullet_points: Option<&str>,
    description: Option<String>,
    product_details: Option<&str>,
) -> ListingData {
    ListingData {
        title: decode::text(title),
        bullet_points: decode::sequence("original_bullet_points", bullet_points),
        product_details: decode::mapping("product_details", product_details),
        description: decode::text(description),
    }
}

fn rewrite(
    title: Option<String>,
    bullet_points: Option<&str>,
    description: Option<String>,
    keywords: Option<&str>,
) -> RewrittenListing {
    RewrittenListing {
        title: decode::text(title),
        bullet_points: decode::sequence("optimized_bullet_points", bullet_points),
        description: decode::text(description),
        keywords: decode::sequence("keywords", keywords),
    }
}
