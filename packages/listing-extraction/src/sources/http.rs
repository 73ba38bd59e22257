//! HTTP-based page source.
//!
//! Fetches the storefront detail page with browser-like headers and a fixed
//! timeout. No retries: a failed fetch fails the request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::page_source::PageSource;
use crate::types::listing::Asin;

/// Default storefront.
pub const DEFAULT_STOREFRONT: &str = "https://www.amazon.in";

/// Fixed page fetch timeout.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Page source that fetches `{storefront}/dp/{ASIN}` over HTTP.
///
/// # Example
///
/// ```rust,ignore
/// use listing_extraction::sources::HttpPageSource;
///
/// let source = HttpPageSource::new()?;
/// let html = source.fetch(&Asin::parse("B08N5WRWNW")?).await?;
/// ```
pub struct HttpPageSource {
    client: reqwest::Client,
    storefront: Url,
}

impl HttpPageSource {
    /// Create a page source for the default storefront.
    pub fn new() -> FetchResult<Self> {
        Self::with_storefront(DEFAULT_STOREFRONT)
    }

    /// Create a page source for a custom storefront base URL.
    pub fn with_storefront(storefront: &str) -> FetchResult<Self> {
        let storefront = Url::parse(storefront).map_err(|_| FetchError::InvalidUrl {
            url: storefront.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );

        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::Request(Box::new(e)))?;

        Ok(Self { client, storefront })
    }

    /// Detail page URL for `asin`.
    pub fn product_url(&self, asin: &Asin) -> FetchResult<Url> {
        self.storefront
            .join(&format!("/dp/{}", asin))
            .map_err(|_| FetchError::InvalidUrl {
                url: format!("{}dp/{}", self.storefront, asin),
            })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, asin: &Asin) -> FetchResult<String> {
        let url = self.product_url(asin)?;
        debug!(url = %url, "HTTP fetch starting");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Request(Box::new(e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "HTTP error status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Request(Box::new(e))
            }
        })?;

        debug!(url = %url, content_length = html.len(), "Page fetched successfully");
        Ok(html)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_url_template() {
        let source = HttpPageSource::new().unwrap();
        let asin = Asin::parse("b08n5wrwnw").unwrap();
        assert_eq!(
            source.product_url(&asin).unwrap().as_str(),
            "https://www.amazon.in/dp/B08N5WRWNW"
        );
    }

    #[test]
    fn test_custom_storefront() {
        let source = HttpPageSource::with_storefront("https://www.amazon.com/").unwrap();
        let asin = Asin::parse("B000000001").unwrap();
        assert_eq!(
            source.product_url(&asin).unwrap().as_str(),
            "https://www.amazon.com/dp/B000000001"
        );
    }

    #[test]
    fn test_invalid_storefront() {
        assert!(matches!(
            HttpPageSource::with_storefront("not a url"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_storefront_is_fetch_error() {
        let source = HttpPageSource::with_storefront("http://127.0.0.1:9").unwrap();
        let asin = Asin::parse("B000000001").unwrap();
        assert!(source.fetch(&asin).await.is_err());
    }
}
