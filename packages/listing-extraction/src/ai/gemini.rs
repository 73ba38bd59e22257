//! Gemini implementation of the AI trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use listing_extraction::ai::GeminiAI;
//!
//! let ai = GeminiAI::new(GeminiClient::from_env()?).with_model("gemini-2.5-pro");
//! let gateway = RewriteGateway::new(Arc::new(ai));
//! ```

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateRequest};
use tracing::debug;

use crate::error::{RewriteError, RewriteResult};
use crate::traits::ai::AI;

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini-based AI implementation.
#[derive(Clone)]
pub struct GeminiAI {
    client: GeminiClient,
    model: String,
}

impl GeminiAI {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> RewriteResult<Self> {
        let client = GeminiClient::from_env().map_err(RewriteError::provider)?;
        Ok(Self::new(client))
    }

    /// Set the generation model (default: gemini-2.5-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AI for GeminiAI {
    async fn complete(&self, prompt: &str) -> RewriteResult<String> {
        let response = self
            .client
            .generate_content(&self.model, GenerateRequest::prompt(prompt))
            .await
            .map_err(RewriteError::provider)?;

        debug!(
            model = %self.model,
            finish_reason = ?response.finish_reason,
            "Gemini completion received"
        );
        Ok(response.text)
    }
}
