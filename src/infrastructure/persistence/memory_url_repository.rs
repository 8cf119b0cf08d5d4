//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::{RepositorySummary, UrlRepository};
use crate::error::{AppError, UniqueField};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    by_short_url: HashMap<String, UrlRecord>,
    /// original_url -> short_url
    by_original_url: HashMap<String, String>,
}

/// Process-local repository holding every record behind one mutex.
///
/// Each trait call takes the lock once, so inserts and increments are atomic
/// with respect to each other just like the SQL implementation. Data is lost
/// when the value is dropped.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    store: Mutex<Store>,
}

impl InMemoryUrlRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::internal("Storage lock poisoned", json!({})))
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.lock()?.by_short_url.get(short_url).cloned())
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let store = self.lock()?;
        Ok(store
            .by_original_url
            .get(original_url)
            .and_then(|short_url| store.by_short_url.get(short_url))
            .cloned())
    }

    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut store = self.lock()?;

        if store.by_original_url.contains_key(&new_record.original_url) {
            return Err(AppError::conflict(
                UniqueField::OriginalUrl,
                json!({ "original_url": new_record.original_url }),
            ));
        }
        if store.by_short_url.contains_key(&new_record.short_url) {
            return Err(AppError::conflict(
                UniqueField::ShortUrl,
                json!({ "short_url": new_record.short_url }),
            ));
        }

        store.next_id += 1;
        let record = UrlRecord::new(
            store.next_id,
            new_record.original_url,
            new_record.short_url,
            new_record.expiry_date,
            0,
        );

        store
            .by_original_url
            .insert(record.original_url.clone(), record.short_url.clone());
        store
            .by_short_url
            .insert(record.short_url.clone(), record.clone());

        Ok(record)
    }

    async fn increment_clicks(&self, short_url: &str) -> Result<i64, AppError> {
        let mut store = self.lock()?;
        let record = store.by_short_url.get_mut(short_url).ok_or_else(|| {
            AppError::not_found("URL not found", json!({ "short_url": short_url }))
        })?;

        record.clicks += 1;
        Ok(record.clicks)
    }

    async fn summary(&self, today: NaiveDate) -> Result<RepositorySummary, AppError> {
        let store = self.lock()?;
        let mut summary = RepositorySummary::default();

        for record in store.by_short_url.values() {
            summary.records += 1;
            summary.clicks += record.clicks;
            if record.is_expired_on(today) {
                summary.expired += 1;
            }
        }

        Ok(summary)
    }
}
