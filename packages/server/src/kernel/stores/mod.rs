//! Product store implementations.
//!
//! - [`PostgresStore`] - production backend, schema managed by `migrations/`
//! - [`SqliteStore`] - single-file deployments and SQL-level tests
//! - [`MemoryStore`] - tests and local runs without a database

mod memory;
mod postgres;
mod rows;
mod sqlite;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::kernel::traits::ProductStore;

/// Storage failures. Detail is logged, never returned to API callers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Only [`MemoryStore`] reports this; SQL stores surface the unique
    /// constraint as [`StoreError::Database`].
    #[error("Product already exists: {0}")]
    DuplicateAsin(String),

    #[error("Unsupported DATABASE_URL: {0}")]
    UnsupportedUrl(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Open the store named by `database_url`.
///
/// `memory` selects [`MemoryStore`], `sqlite:` URLs [`SqliteStore`] and
/// `postgres://`/`postgresql://` URLs [`PostgresStore`] (migrations are run
/// on connect).
pub async fn connect_store(database_url: &str) -> StoreResult<Arc<dyn ProductStore>> {
    let url = database_url.trim();

    let store: Arc<dyn ProductStore> = if url.eq_ignore_ascii_case("memory") {
        Arc::new(MemoryStore::new())
    } else if url.starts_with("sqlite:") {
        Arc::new(SqliteStore::new(url).await?)
    } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        let store = PostgresStore::connect(url).await?;
        store.migrate().await?;
        Arc::new(store)
    } else {
        return Err(StoreError::UnsupportedUrl(redact(url)));
    };

    info!(backend = store.name(), "Product store ready");
    Ok(store)
}

/// Scheme only; URLs can carry credentials.
fn redact(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, _)) => format!("{}://…", scheme),
        None => "<unrecognised>".to_string(),
    }
}
