//! Rewrite gateway: baseline listing → provider → validated rewrite.
//!
//! One provider call per request. The gateway does not retry and does not
//! fall back; callers pick the fallback policy from the returned error.

mod parse;
mod prompts;

pub use parse::{find_json_block, parse_rewrite_response};
pub use prompts::{build_rewrite_prompt, BULLET_COUNT, TITLE_MAX_CHARS};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::RewriteResult;
use crate::traits::ai::AI;
use crate::types::listing::{ListingData, RewrittenListing};

/// Wraps a text-generation provider with the rewrite prompt and the
/// response validation.
#[derive(Clone)]
pub struct RewriteGateway {
    ai: Arc<dyn AI>,
}

impl RewriteGateway {
    pub fn new(ai: Arc<dyn AI>) -> Self {
        Self { ai }
    }

    /// Rewrite `listing` into optimized copy.
    ///
    /// Fails on a provider error or on any response that is not a complete
    /// rewrite.
    pub async fn rewrite(&self, listing: &ListingData) -> RewriteResult<RewrittenListing> {
        let prompt = build_rewrite_prompt(listing);
        debug!(prompt_len = prompt.len(), "Sending rewrite prompt");

        let text = self.ai.complete(&prompt).await.map_err(|e| {
            warn!(error = %e, "Rewrite provider call failed");
            e
        })?;

        let rewritten = parse_rewrite_response(&text).map_err(|e| {
            warn!(error = %e, response_len = text.len(), "Rewrite response rejected");
            e
        })?;

        info!(
            bullet_points = rewritten.bullet_points.len(),
            keywords = rewritten.keywords.len(),
            "Listing rewritten"
        );
        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RewriteError;
    use crate::testing::MockAI;

    fn listing() -> ListingData {
        ListingData {
            title: "Wireless Mouse".into(),
            bullet_points: vec!["Silent".into()],
            description: "A mouse.".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_rewrite_success() {
        let ai = Arc::new(MockAI::new().with_response(
            r#"```json
{"title": "Acme Wireless Mouse", "bulletPoints": ["Quiet"], "description": "Better.", "keywords": ["mouse"]}
```"#,
        ));
        let gateway = RewriteGateway::new(ai.clone());

        let rewritten = gateway.rewrite(&listing()).await.unwrap();
        assert_eq!(rewritten.title, "Acme Wireless Mouse");
        assert_eq!(rewritten.keywords, vec!["mouse"]);

        let prompts = ai.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Title: Wireless Mouse"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_retried() {
        let ai = Arc::new(MockAI::new().with_failure("quota exceeded"));
        let gateway = RewriteGateway::new(ai.clone());

        let err = gateway.rewrite(&listing()).await.unwrap_err();
        assert!(matches!(err, RewriteError::Provider(_)));
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn test_partial_payload_is_rejected() {
        let ai = Arc::new(MockAI::new().with_response(r#"{"title": "Only a title"}"#));
        let err = RewriteGateway::new(ai).rewrite(&listing()).await.unwrap_err();
        assert!(matches!(err, RewriteError::MissingField { .. }));
    }
}
