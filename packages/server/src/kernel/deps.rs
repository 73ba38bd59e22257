//! Server dependencies (using traits for testability)
//!
//! The central dependency container handed to every product action. All
//! external services sit behind trait objects so tests can swap in
//! `MockPageSource`, `MockAI` and `MemoryStore`.

use std::sync::Arc;

use listing_extraction::{ListingExtractor, RewriteGateway};

use crate::kernel::traits::ProductStore;

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    /// Storefront fetch + parse
    pub extractor: ListingExtractor,
    /// Provider-backed rewrite with response validation
    pub rewriter: RewriteGateway,
    pub store: Arc<dyn ProductStore>,
}

impl ServerDeps {
    pub fn new(
        extractor: ListingExtractor,
        rewriter: RewriteGateway,
        store: Arc<dyn ProductStore>,
    ) -> Self {
        Self {
            extractor,
            rewriter,
            store,
        }
    }
}
