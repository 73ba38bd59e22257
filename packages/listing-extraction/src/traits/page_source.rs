//! Page source trait for retrieving storefront HTML.
//!
//! The extractor treats the page as untyped text; implementations only
//! decide how it is retrieved.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::listing::Asin;

/// Retrieves the storefront detail page for a product.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the raw HTML of the detail page for `asin`.
    async fn fetch(&self, asin: &Asin) -> FetchResult<String>;

    /// Get the source name (for logging).
    fn name(&self) -> &str;
}
