//! Mock page source for testing.
//!
//! Provides canned HTML per ASIN and records every fetch.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::traits::page_source::PageSource;
use crate::types::listing::Asin;

/// Mock page source for testing.
///
/// Unknown ASINs fail with a 404 [`FetchError::Status`].
///
/// # Example
///
/// ```rust
/// use listing_extraction::{Asin, MockPageSource};
///
/// let asin = Asin::parse("B08N5WRWNW").unwrap();
/// let source = MockPageSource::new().with_page(&asin, "<span id='productTitle'>Mouse</span>");
/// ```
#[derive(Default, Clone)]
pub struct MockPageSource {
    pages: Arc<RwLock<HashMap<Asin, String>>>,
    fetch_calls: Arc<RwLock<Vec<Asin>>>,
}

impl MockPageSource {
    /// Create a new empty mock page source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the HTML returned for `asin`.
    pub fn add_page(&self, asin: &Asin, html: impl Into<String>) {
        self.pages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(asin.clone(), html.into());
    }

    /// Builder form of [`add_page`](Self::add_page).
    pub fn with_page(self, asin: &Asin, html: impl Into<String>) -> Self {
        self.add_page(asin, html);
        self
    }

    /// Number of fetches made so far.
    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// ASINs fetched, in call order.
    pub fn fetch_calls(&self) -> Vec<Asin> {
        self.fetch_calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PageSource for MockPageSource {
    async fn fetch(&self, asin: &Asin) -> FetchResult<String> {
        self.fetch_calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(asin.clone());

        self.pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(asin)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: format!("mock://dp/{}", asin),
                status: 404,
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_registered_page() {
        let asin = Asin::parse("B000000001").unwrap();
        let source = MockPageSource::new().with_page(&asin, "<html>ok</html>");

        assert_eq!(source.fetch(&asin).await.unwrap(), "<html>ok</html>");
        assert_eq!(source.fetch_calls(), vec![asin]);
    }

    #[tokio::test]
    async fn test_mock_unknown_asin_is_404() {
        let source = MockPageSource::new();
        let err = source
            .fetch(&Asin::parse("B000000002").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(source.fetch_call_count(), 1);
    }
}
