//! PostgreSQL storage implementation.
//!
//! Production backend. Schema lives in `packages/server/migrations` and is
//! applied with `sqlx::migrate!`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPool, PgPoolOptions};

use listing_extraction::{Asin, ListingData, RewrittenListing};

use super::rows::{
    EncodedListing, EncodedRewrite, HistoryEntryRow, HistoryRow, ProductRow, SummaryRow,
};
use super::{StoreError, StoreResult};
use crate::domains::products::models::{
    HistoryEntry, HistoryRecord, ProductRecord, ProductSummary,
};
use crate::kernel::traits::ProductStore;

/// PostgreSQL-based product store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect with the default pool size.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply pending migrations.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
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
impl ProductStore for PostgresStore {
    async fn find_product(&self, asin: &Asin) -> StoreResult<Option<ProductRecord>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, asin, original_title, original_bullet_points, original_description,
                product_details, optimized_title, optimized_bullet_points,
                optimized_description, keywords, created_at, updated_at
            FROM products
            WHERE asin = $1
            "#,
        )
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

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (
                asin, original_title, original_bullet_points, original_description,
                product_details, optimized_title, optimized_bullet_points,
                optimized_description, keywords, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING id, asin, original_title, original_bullet_points, original_description,
                product_details, optimized_title, optimized_bullet_points,
                optimized_description, keywords, created_at, updated_at
            "#,
        )
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
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    async fn update_original(&self, product_id: i64, original: &ListingData) -> StoreResult<()> {
        let orig = EncodedListing::new(original);

        let result = sqlx::query(
            r#"
            UPDATE products SET
                original_title = $1,
                original_bullet_points = $2,
                original_description = $3,
                product_details = $4,
                updated_at = $5
            WHERE id = $6
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
                original_title = $1,
                original_bullet_points = $2,
                original_description = $3,
                product_details = $4,
                optimized_title = $5,
                optimized_bullet_points = $6,
                optimized_description = $7,
                keywords = $8,
                updated_at = $9
            WHERE id = $10
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
                optimized_title = $1,
                optimized_bullet_points = $2,
                optimized_description = $3,
                keywords = $4,
                updated_at = $5
            WHERE id = $6
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
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
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
        let row = sqlx::query_as::<_, HistoryEntryRow>(
            r#"
            SELECT h.id, h.product_id, h.original_title, h.original_bullet_points,
                h.original_description, h.product_details, h.optimized_title,
                h.optimized_bullet_points, h.optimized_description, h.keywords, h.created_at,
                p.asin,
                p.original_title AS product_original_title,
                p.original_bullet_points AS product_original_bullet_points,
                p.original_description AS product_original_description,
                p.product_details AS product_product_details
            FROM optimization_history h
            JOIN products p ON h.product_id = p.id
            WHERE h.id = $1
            "#,
        )
        .bind(history_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(HistoryEntryRow::into_entry))
    }

    async fn list_history(&self, asin: &Asin) -> StoreResult<Vec<HistoryRecord>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT h.id, h.product_id, h.original_title, h.original_bullet_points,
                h.original_description, h.product_details, h.optimized_title,
                h.optimized_bullet_points, h.optimized_description, h.keywords, h.created_at
            FROM optimization_history h
            JOIN products p ON h.product_id = p.id
            WHERE p.asin = $1
            ORDER BY h.created_at DESC, h.id DESC
            "#,
        )
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
        "postgres"
    }
}
