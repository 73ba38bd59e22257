//! Testing utilities including mock implementations.
//!
//! These let applications exercise the rewrite path without making real
//! provider calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use crate::error::{RewriteError, RewriteResult};
use crate::traits::ai::AI;

/// Error produced by [`MockAI`] for scripted failures.
#[derive(Debug, Clone, Error)]
#[error("mock provider: {0}")]
pub struct MockProviderError(pub String);

/// A mock AI implementation for testing.
///
/// Replies are scripted in order. Once the script is exhausted every call
/// fails with a provider error, which keeps unexpected extra calls visible.
#[derive(Default, Clone)]
pub struct MockAI {
    replies: Arc<RwLock<VecDeque<Result<String, String>>>>,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push_response(text);
        self
    }

    /// Queue a provider failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push_failure(message);
        self
    }

    pub fn push_response(&self, text: impl Into<String>) {
        self.replies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(text.into()));
    }

    pub fn push_failure(&self, message: impl Into<String>) {
        self.replies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(message.into()));
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, prompt: &str) -> RewriteResult<String> {
        self.prompts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let reply = self
            .replies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match reply {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(RewriteError::provider(MockProviderError(message))),
            None => Err(RewriteError::provider(MockProviderError(
                "no scripted reply".into(),
            ))),
        }
    }
}
