//! PostgresStore against a throwaway container.
//!
//! Run with: cargo test -p server --test postgres_store_tests -- --ignored

mod common;

use std::sync::Arc;

use anyhow::{Context, Result};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

use common::*;
use listing_extraction::{ListingExtractor, MockAI, MockPageSource, RewriteGateway};
use server_core::domains::products::actions::{optimize_product, reoptimize_from_history};
use server_core::kernel::{connect_store, ProductStore, ServerDeps};

async fn start_postgres() -> Result<(ContainerAsync<Postgres>, String)> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let postgres = Postgres::default()
        .with_tag("16")
        .start()
        .await
        .context("Failed to start Postgres container")?;

    let host = postgres.get_host().await?;
    let port = postgres.get_host_port_ipv4(5432).await?;
    let url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);
    Ok((postgres, url))
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn optimize_and_reoptimize_against_postgres() {
    let (_container, url) = start_postgres().await.unwrap();
    let store = connect_store(&url).await.unwrap();
    assert_eq!(store.name(), "postgres");
    store.ping().await.unwrap();

    let pages = MockPageSource::new().with_page(&asin(MOUSE_ASIN), mouse_page());
    let ai = Arc::new(MockAI::new());
    let deps = ServerDeps::new(
        ListingExtractor::new(Arc::new(pages)).unwrap(),
        RewriteGateway::new(ai.clone()),
        store.clone(),
    );

    ai.push_response(rewrite_reply("Acme Silent Wireless Mouse"));
    let outcome = optimize_product(MOUSE_ASIN, &deps).await.unwrap();
    assert!(!outcome.optimization_failed);

    let product = store.find_product(&asin(MOUSE_ASIN)).await.unwrap().unwrap();
    assert_eq!(product.original.product_details["Brand"], "Acme");
    assert_eq!(product.optimized.keywords.len(), 3);

    let history = store.list_history(&asin(MOUSE_ASIN)).await.unwrap();
    assert_eq!(history.len(), 1);

    let entry = store.find_history(history[0].id).await.unwrap().unwrap();
    assert_eq!(entry.asin, MOUSE_ASIN);
    assert_eq!(entry.product_original.title, "Wireless Mouse");

    ai.push_response(rewrite_reply("Acme Mouse, Second Pass"));
    let outcome = reoptimize_from_history(Some(history[0].id), &deps)
        .await
        .unwrap();
    assert_eq!(outcome.data.new_optimized.title, "Acme Mouse, Second Pass");

    let summaries = store.list_products().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].optimization_count, 2);
    assert_eq!(summaries[0].title, "Wireless Mouse");

    let history = store.list_history(&asin(MOUSE_ASIN)).await.unwrap();
    assert_eq!(history[0].optimized.title, "Acme Mouse, Second Pass");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn migrations_are_idempotent() {
    let (_container, url) = start_postgres().await.unwrap();
    connect_store(&url).await.unwrap();
    let store = connect_store(&url).await.unwrap();
    assert!(store.list_products().await.unwrap().is_empty());
}
