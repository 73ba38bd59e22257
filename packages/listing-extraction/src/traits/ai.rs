//! AI trait for the text-generation capability.
//!
//! The rewrite gateway only needs "prompt in, free text out". Provider
//! specifics (model, auth, transport) stay in implementations so the gateway
//! can be driven by a canned fake in tests.

use async_trait::async_trait;

use crate::error::RewriteResult;

/// Text-generation provider.
#[async_trait]
pub trait AI: Send + Sync {
    /// Complete a prompt and return the raw response text.
    ///
    /// Implementations map their own failures to
    /// [`RewriteError::Provider`](crate::RewriteError::Provider).
    async fn complete(&self, prompt: &str) -> RewriteResult<String>;
}
