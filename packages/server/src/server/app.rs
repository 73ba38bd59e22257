//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    middleware,
    routing::{get, post},
    Router,
};
use gemini_client::GeminiClient;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use listing_extraction::ai::GeminiAI;
use listing_extraction::{HttpPageSource, ListingExtractor, RewriteGateway};

use crate::config::Config;
use crate::kernel::{ProductStore, ServerDeps};
use crate::server::middleware::timeout_envelope;
use crate::server::routes::{
    get_history_handler, get_product_handler, health_handler, list_asins_handler,
    optimize_handler, reoptimize_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Wire the production dependencies: HTTP page source, Gemini rewrite
/// provider and the given store.
pub fn build_server_deps(config: &Config, store: Arc<dyn ProductStore>) -> Result<ServerDeps> {
    let source = HttpPageSource::with_storefront(&config.storefront_base_url)
        .context("Invalid STOREFRONT_BASE_URL")?;
    let extractor =
        ListingExtractor::new(Arc::new(source)).context("Failed to build listing parser")?;

    let client = GeminiClient::new(config.gemini_api_key.clone())
        .with_timeout(config.gemini_timeout)
        .context("Failed to build Gemini client")?;
    let ai = GeminiAI::new(client).with_model(config.gemini_model.clone());

    Ok(ServerDeps::new(
        extractor,
        RewriteGateway::new(Arc::new(ai)),
        store,
    ))
}

/// Build the Axum application router
///
/// `request_timeout` is the outer deadline for every request. Expired
/// requests get a 408 in the usual error envelope.
pub fn build_app(deps: ServerDeps, request_timeout: Duration) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
    };

    // CORS configuration - the UI is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let products = Router::new()
        .route("/optimize", post(optimize_handler))
        .route("/reoptimize", post(reoptimize_handler))
        .route("/asins", get(list_asins_handler))
        .route("/:asin", get(get_product_handler))
        .route("/:asin/history", get(get_history_handler));

    Router::new()
        .nest("/api/products", products)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_envelope))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
