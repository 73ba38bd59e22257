//! SQLite storage implementation.
//!
//! A file-based storage backend using SQLite. Good for:
//! - Local development
//! - Single-server deployments
//! - Testing with real SQL

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use listing_extraction::{Asin, ListingData, RewrittenListing};

use super::rows::{
    EncodedListing, EncodedRewrite, HistoryEntryRow, HistoryRow, ProductRow, SummaryRow,
};
use super::{StoreError, StoreResult};
use crate::domains::products::models::{
    HistoryEntry, HistoryRecord, ProductRecord, ProductSummary,
};
use crate::kernel::traits::ProductStore;

const PRODUCT_COLUMNS: &str = "id, asin, original_title, original_bullet_points, \
    original_description, product_details, optimized_title, optimized_bullet_points, \
    optimized_description, keywords, created_at, updated_at";

const HISTORY_COLUMNS: &str = "h.id, h.product_id, h.original_title, h.original_bullet_points, \
    h.original_description, h.product_details, h.optimized_title, h.optimized_bullet_points, \
    h.optimized_description, h.keywords, h.created_at";

/// SQLite-based product store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite:./listings.db` - File-based database, created if missing
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to `:memory:` is a separate database, so the pool
        // must hold exactly one connection for the lifetime of the store.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory SQLite store (for testing).
    pub async fn in_memory() -> StoreResult<Self> {
        Self::new("sqlite::memory:").await
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                asin TEXT NOT NULL UNIQUE,
                original_title TEXT NOT NULL,
                original_bullet_points TEXT,
                original_description TEXT,
                product_details TEXT,
                optimized_title TEXT,
                optimized_bullet_points TEXT,
                optimized_description TEXT,
                keywords TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS optimization_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
                original_title TEXT,
                original_bullet_points TEXT,
                original_description TEXT,
                product_details TEXT,
                optimized_title TEXT,
                optimized_bullet_points TEXT,
                optimized_description TEXT,
                keywords TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_history_product_created
                ON optimization_history(product_id, created_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn expect_one(product_id: i64, rows_affected: u64) -> StoreResult<()> {
        if rows_affected == 0 {
            return Err(StoreError::ProductNotFound(product_id));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn find_product(&self, asin: &Asin) -> StoreResult<Option<ProductRecord>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE asin = ?",
            PRODUCT_COLUMNS
        ))
        .bind(asin.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_record))
    }

    async fn insert_product(
        &self,
        asin: &Asin,
        original: &ListingData,
        optimized: &RewrittenListing,
    ) -> StoreResult<ProductRecord> {
        let orig = EncodedListing::new(original);
        let opt = EncodedRewrite::new(optimized);
        let now = Utc::now();

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (
                asin, original_title, original_bullet_points, original_description,
                product_details, optimized_title, optimized_bullet_points,
                optimized_description, keywords, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(asin.as_str())
        .bind(&original.title)
        .bind(&orig.bullet_points)
        .bind(&original.description)
        .bind(&orig.product_details)
        .bind(&optimized.title)
        .bind(&opt.bullet_points)
        .bind(&optimized.description)
        .bind(&opt.keywords)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn update_original(&self, product_id: i64, original: &ListingData) -> StoreResult<()> {
        let orig = EncodedListing::new(original);

        let result = sqlx::query(
            r#"
            UPDATE products SET
                original_title = ?,
                original_bullet_points = ?,
                original_description = ?,
                product_details = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&original.title)
        .bind(&orig.bullet_points)
        .bind(&original.description)
        .bind(&orig.product_details)
        .bind(Utc::now())
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Self::expect_one(product_id, result.rows_affected())
    }

    async fn update_product(
        &self,
        product_id: i64,
        original: &ListingData,
        optimized: &RewrittenListing,
    ) -> StoreResult<()> {
        let orig = EncodedListing::new(original);
        let opt = EncodedRewrite::new(optimized);

        let result = sqlx::query(
            r#"
            UPDATE products SET
                original_title = ?,
                original_bullet_points = ?,
                original_description = ?,
                product_details = ?,
                optimized_title = ?,
                optimized_bullet_points = ?,
                optimized_description = ?,
                keywords = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&original.title)
        .bind(&orig.bullet_points)
        .bind(&original.description)
        .bind(&orig.product_details)
        .bind(&optimized.title)
        .bind(&opt.bullet_points)
        .bind(&optimized.description)
        .bind(&opt.keywords)
        .bind(Utc::now())
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Self::expect_one(product_id, result.rows_affected())
    }

    async fn update_optimized(
        &self,
        product_id: i64,
        optimized: &RewrittenListing,
    ) -> StoreResult<()> {
        let opt = EncodedRewrite::new(optimized);

        let result = sqlx::query(
            r#"
            UPDATE products SET
                optimized_title = ?,
                optimized_bullet_points = ?,
                optimized_description = ?,
                keywords = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&optimized.title)
        .bind(&opt.bullet_points)
        .bind(&optimized.description)
        .bind(&opt.keywords)
        .bind(Utc::now())
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Self::expect_one(product_id, result.rows_affected())
    }

    async fn insert_history(
        &self,
        product_id: i64,
        original: &ListingData,
        optimized: &RewrittenListing,
    ) -> StoreResult<HistoryRecord> {
        let orig = EncodedListing::new(original);
        let opt = EncodedRewrite::new(optimized);

        let row = sqlx::query_as::<_, HistoryRow>(
            r#"
            INSERT INTO optimization_history (
                product_id, original_title, original_bullet_points, original_description,
                product_details, optimized_title, optimized_bullet_points,
                optimized_description, keywords, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, product_id, original_title, original_bullet_points,
                original_description, product_details, optimized_title,
                optimized_bullet_points, optimized_description, keywords, created_at
            "#,
        )
        .bind(product_id)
        .bind(&original.title)
        .bind(&orig.bullet_points)
        .bind(&original.description)
        .bind(&orig.product_details)
        .bind(&optimized.title)
        .bind(&opt.bullet_points)
        .bind(&optimized.description)
        .bind(&opt.keywords)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn find_history(&self, history_id: i64) -> StoreResult<Option<HistoryEntry>> {
        let row = sqlx::query_as::<_, HistoryEntryRow>(&format!(
            r#"
            SELECT {},
                p.asin,
                p.original_title AS product_original_title,
                p.original_bullet_points AS product_original_bullet_points,
                p.original_description AS product_original_description,
                p.product_details AS product_product_details
            FROM optimization_history h
            JOIN products p ON h.product_id = p.id
            WHERE h.id = ?
            "#,
            HISTORY_COLUMNS
        ))
        .bind(history_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(HistoryEntryRow::into_entry))
    }

    async fn list_history(&self, asin: &Asin) -> StoreResult<Vec<HistoryRecord>> {
        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            r#"
            SELECT {}
            FROM optimization_history h
            JOIN products p ON h.product_id = p.id
            WHERE p.asin = ?
            ORDER BY h.created_at DESC, h.id DESC
            "#,
            HISTORY_COLUMNS
        ))
        .bind(asin.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(HistoryRow::into_record).collect())
    }

    async fn list_products(&self) -> StoreResult<Vec<ProductSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT p.asin, p.original_title, p.updated_at, COUNT(h.id) AS optimization_count
            FROM products p
            LEFT JOIN optimization_history h ON p.id = h.product_id
            GROUP BY p.id, p.asin, p.original_title, p.updated_at
            ORDER BY p.updated_at DESC, p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SummaryRow::into_summary).collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
