//! Short link resolution service.

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::token_of;

/// Service for turning short URLs back into their destinations.
///
/// Both paths reject malformed aliases, unknown aliases and expired records.
/// Only [`ResolverService::resolve`] counts a click.
pub struct ResolverService {
    repository: Arc<dyn UrlRepository>,
    clock: Arc<dyn Clock>,
    base_domain: String,
}

impl ResolverService {
    /// Creates a new resolver service.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        clock: Arc<dyn Clock>,
        base_domain: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            clock,
            base_domain: base_domain.into(),
        }
    }

    /// Resolves `short_url` for a redirect and counts the click.
    ///
    /// A failed click increment is logged and does not fail the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the short URL has the wrong shape.
    /// Returns [`AppError::NotFound`] if no record has this short URL.
    /// Returns [`AppError::Expired`] if the record is past its expiry date.
    /// Returns [`AppError::Internal`] on storage errors during lookup.
    pub async fn resolve(&self, short_url: &str) -> Result<String, AppError> {
        let record = self.live_record(short_url).await?;

        match self.repository.increment_clicks(&record.short_url).await {
            Ok(clicks) => debug!(short_url = %record.short_url, clicks, "Click recorded"),
            Err(e) => warn!(short_url = %record.short_url, error = %e, "Failed to record click"),
        }

        Ok(record.original_url)
    }

    /// Returns the record behind `short_url` without counting a click.
    ///
    /// # Errors
    ///
    /// Same as [`ResolverService::resolve`].
    pub async fn inspect(&self, short_url: &str) -> Result<UrlRecord, AppError> {
        self.live_record(short_url).await
    }

    async fn live_record(&self, short_url: &str) -> Result<UrlRecord, AppError> {
        let short_url = short_url.trim();

        if token_of(&self.base_domain, short_url).is_none() {
            return Err(AppError::bad_request(
                "Invalid short URL",
                json!({
                    "short_url": short_url,
                    "expected_prefix": self.base_domain,
                }),
            ));
        }

        let record = self
            .repository
            .find_by_short_url(short_url)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "short_url": short_url }))
            })?;

        let today = self.clock.today();
        if record.is_expired_on(today) {
            warn!(short_url, expiry_date = %record.expiry_date, "Expired short URL requested");
            return Err(AppError::expired(
                "Short URL has expired",
                json!({
                    "short_url": short_url,
                    "expiry_date": record.expiry_date,
                }),
            ));
        }

        Ok(record)
    }
}
