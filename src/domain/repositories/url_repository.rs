//! Repository trait for URL record storage.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

/// Aggregate counts over the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepositorySummary {
    pub records: i64,
    pub clicks: i64,
    pub expired: i64,
}

/// Repository interface for URL records.
///
/// Every operation touches a single record and is atomic with respect to the
/// others. Both `original_url` and `short_url` are unique across the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a record by its full short URL (base domain + token).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its destination URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_original_url(&self, original_url: &str)
    -> Result<Option<UrlRecord>, AppError>;

    /// Inserts a new record with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] naming the violated unique field if either
    /// the original or the short URL is already stored.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Adds one click to the record and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this short URL.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, short_url: &str) -> Result<i64, AppError>;

    /// Counts records, total clicks and records expired as of `today`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn summary(&self, today: NaiveDate) -> Result<RepositorySummary, AppError>;
}
