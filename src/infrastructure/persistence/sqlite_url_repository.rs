//! SQLite implementation of the URL repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{RepositorySummary, UrlRepository};
use crate::error::AppError;
use serde_json::json;

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    short_url: String,
    expiry_date: NaiveDate,
    clicks: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(r: UrlRow) -> Self {
        UrlRecord::new(r.id, r.original_url, r.short_url, r.expiry_date, r.clicks)
    }
}

/// SQLite repository for URL records.
///
/// Uniqueness is enforced by the table's unique indexes; click increments are a
/// single `UPDATE` so concurrent redirects never lose a count.
pub struct SqliteUrlRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_url, expiry_date, clicks
            FROM urls
            WHERE short_url = ?1
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_url, expiry_date, clicks
            FROM urls
            WHERE original_url = ?1
            "#,
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (original_url, short_url, expiry_date, clicks)
            VALUES (?1, ?2, ?3, 0)
            RETURNING id, original_url, short_url, expiry_date, clicks
            "#,
        )
        .bind(&new_record.original_url)
        .bind(&new_record.short_url)
        .bind(new_record.expiry_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn increment_clicks(&self, short_url: &str) -> Result<i64, AppError> {
        let clicks = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE urls
            SET clicks = clicks + 1
            WHERE short_url = ?1
            RETURNING clicks
            "#,
        )
        .bind(short_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        clicks.ok_or_else(|| {
            AppError::not_found("URL not found", json!({ "short_url": short_url }))
        })
    }

    async fn summary(&self, today: NaiveDate) -> Result<RepositorySummary, AppError> {
        let (records, clicks, expired) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(clicks), 0),
                COALESCE(SUM(CASE WHEN expiry_date < ?1 THEN 1 ELSE 0 END), 0)
            FROM urls
            "#,
        )
        .bind(today)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(RepositorySummary {
            records,
            clicks,
            expired,
        })
    }
}
