//! Test harness wiring mock dependencies into `ServerDeps`.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use listing_extraction::{Asin, ListingExtractor, MockAI, MockPageSource, RewriteGateway};
use server_core::kernel::{MemoryStore, ProductStore, ServerDeps};
use server_core::server::build_app;

use super::fixtures::{lamp_page, mouse_page, LAMP_ASIN, MOUSE_ASIN};

/// Mock page source, scripted AI and an in-memory store.
pub struct TestHarness {
    pub pages: MockPageSource,
    pub ai: Arc<MockAI>,
    pub store: Arc<MemoryStore>,
    pub deps: ServerDeps,
}

impl TestHarness {
    /// Harness serving the mouse and lamp pages.
    pub fn new() -> Self {
        let pages = MockPageSource::new()
            .with_page(&asin(MOUSE_ASIN), mouse_page())
            .with_page(&asin(LAMP_ASIN), lamp_page());
        Self::with_pages(pages)
    }

    pub fn with_pages(pages: MockPageSource) -> Self {
        let ai = Arc::new(MockAI::new());
        let store = Arc::new(MemoryStore::new());
        let store_dyn: Arc<dyn ProductStore> = store.clone();

        let deps = ServerDeps::new(
            ListingExtractor::new(Arc::new(pages.clone())).expect("parser builds"),
            RewriteGateway::new(ai.clone()),
            store_dyn,
        );

        Self {
            pages,
            ai,
            store,
            deps,
        }
    }

    /// Router over the same dependencies.
    pub fn app(&self) -> Router {
        build_app(self.deps.clone(), Duration::from_secs(30))
    }
}

pub fn asin(raw: &str) -> Asin {
    Asin::parse(raw).expect("valid test ASIN")
}
