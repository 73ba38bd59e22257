//! Listing extractor: page source + parser.

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::parser::ListingParser;
use crate::traits::page_source::PageSource;
use crate::types::listing::{Asin, ListingData};

/// Fetches a storefront page and parses it into a [`ListingData`].
///
/// Only the fetch can fail; field extraction degrades to sentinels.
#[derive(Clone)]
pub struct ListingExtractor {
    source: Arc<dyn PageSource>,
    parser: Arc<ListingParser>,
}

impl ListingExtractor {
    /// Create an extractor over `source` with the default strategies.
    pub fn new(source: Arc<dyn PageSource>) -> Result<Self> {
        Ok(Self {
            source,
            parser: Arc::new(ListingParser::new()?),
        })
    }

    /// Fetch and parse the listing for `asin`.
    pub async fn extract(&self, asin: &Asin) -> Result<ListingData> {
        let html = self.source.fetch(asin).await?;
        let listing = self.parser.parse(&html);

        info!(
            asin = %asin,
            source = self.source.name(),
            bullet_points = listing.bullet_points.len(),
            product_details = listing.product_details.len(),
            "Listing extracted"
        );

        Ok(listing)
    }
}
