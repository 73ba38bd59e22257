//! Pure Gemini REST API client
//!
//! A clean, minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::{GeminiClient, GenerateRequest};
//!
//! let client = GeminiClient::from_env()?;
//!
//! let response = client
//!     .generate_content("gemini-2.5-flash", GenerateRequest::prompt("Hello!"))
//!     .await?;
//! println!("{}", response.text);
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        if api_key.trim().is_empty() {
            return Err(GeminiError::Config("GEMINI_API_KEY is empty".into()));
        }
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies, regional endpoints, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeminiError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Generate content.
    ///
    /// Returns the concatenated text of the first candidate. A prompt blocked
    /// by the provider, or a response with no candidates, is an API error.
    pub async fn generate_content(
        &self,
        model: &str,
        request: GenerateRequest,
    ) -> Result<GenerateResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api(format!("Gemini API error ({}): {}", status, error_text)));
        }

        let raw: types::GenerateResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        if let Some(reason) = raw
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(GeminiError::Api(format!("Prompt blocked: {}", reason)));
        }

        let generated = raw
            .into_response()
            .ok_or_else(|| GeminiError::Api("No candidates from Gemini".into()))?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            finish_reason = ?generated.finish_reason,
            "Gemini generate content"
        );

        Ok(generated)
    }
}
