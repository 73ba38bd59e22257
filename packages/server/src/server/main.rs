// Main entry point for API server

use anyhow::{Context, Result};
use server_core::kernel::connect_store;
use server_core::server::{build_app, build_server_deps};
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,listing_extraction=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Listing Optimizer API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(model = %config.gemini_model, storefront = %config.storefront_base_url, "Configuration loaded");

    // Connect to the product store (runs migrations)
    tracing::info!("Connecting to product store...");
    let store = connect_store(&config.database_url)
        .await
        .context("Failed to connect to product store")?;

    // Build application
    let deps = build_server_deps(&config, store)?;
    let app = build_app(deps, config.request_timeout);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
