//! Short link creation service.

use chrono::Days;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ShortLinkSettings;
use crate::domain::clock::Clock;
use crate::domain::entities::{NewUrlRecord, ShortenedUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, UniqueField};
use crate::utils::code_generator::{build_short_url, generate_token};

use super::url_validator::UrlValidator;

/// Service for creating short links.
///
/// Validates the destination, applies the expiry policy, rejects URLs that were
/// already shortened, and generates a unique alias with collision retry.
pub struct ShortenerService {
    validator: UrlValidator,
    repository: Arc<dyn UrlRepository>,
    clock: Arc<dyn Clock>,
    settings: ShortLinkSettings,
}

impl ShortenerService {
    /// Creates a new shortener service.
    pub fn new(
        validator: UrlValidator,
        repository: Arc<dyn UrlRepository>,
        clock: Arc<dyn Clock>,
        settings: ShortLinkSettings,
    ) -> Self {
        Self {
            validator,
            repository,
            clock,
            settings,
        }
    }

    /// Shortens `original_url`, keeping the alias alive for `expiry_days`
    /// (policy default when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the URL is malformed, unresolvable or
    /// points at the short-link domain.
    ///
    /// Returns [`AppError::Validation`] if `expiry_days` lies outside the policy
    /// bounds.
    ///
    /// Returns [`AppError::DuplicateUrl`] carrying the existing alias if the URL
    /// was already shortened.
    ///
    /// Returns [`AppError::Internal`] on storage errors or when no free alias
    /// was found within the attempt limit.
    pub async fn shorten(
        &self,
        original_url: &str,
        expiry_days: Option<i64>,
    ) -> Result<ShortenedUrl, AppError> {
        let original_url = self.validator.validate(original_url).await?;

        let days = self.settings.expiry.resolve(expiry_days).map_err(|days| {
            AppError::bad_request(
                format!(
                    "expiry_days must be between {} and {}",
                    self.settings.expiry.min_days, self.settings.expiry.max_days
                ),
                json!({ "field": "expiry_days", "value": days }),
            )
        })?;

        if let Some(existing) = self.repository.find_by_original_url(&original_url).await? {
            warn!(short_url = %existing.short_url, "URL already shortened");
            return Err(AppError::duplicate(existing.short_url));
        }

        let today = self.clock.today();
        let expiry_date = today
            .checked_add_days(Days::new(days.unsigned_abs()))
            .ok_or_else(|| {
                AppError::internal("Expiry date out of range", json!({ "days": days }))
            })?;

        for attempt in 1..=self.settings.code_max_attempts {
            let short_url = build_short_url(&self.settings.base_domain, &generate_token());

            let new_record = NewUrlRecord {
                original_url: original_url.clone(),
                short_url,
                expiry_date,
            };

            match self.repository.insert(new_record).await {
                Ok(record) => {
                    info!(
                        short_url = %record.short_url,
                        %expiry_date,
                        "Short link created"
                    );
                    return Ok(ShortenedUrl {
                        short_url: record.short_url,
                        expiry_date: record.expiry_date,
                    });
                }
                Err(AppError::Conflict {
                    field: UniqueField::ShortUrl,
                    ..
                }) => {
                    warn!(attempt, "Short code collision, retrying");
                }
                Err(AppError::Conflict {
                    field: UniqueField::OriginalUrl,
                    ..
                }) => {
                    return Err(self.concurrent_duplicate(&original_url).await);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short URL",
            json!({ "reason": "Too many collisions", "attempts": self.settings.code_max_attempts }),
        ))
    }

    /// Reports the record that won a concurrent insert for the same URL.
    async fn concurrent_duplicate(&self, original_url: &str) -> AppError {
        debug!(original_url, "Lost insert race for original URL");

        match self.repository.find_by_original_url(original_url).await {
            Ok(Some(existing)) => AppError::duplicate(existing.short_url),
            Ok(None) => AppError::internal(
                "Conflicting record disappeared",
                json!({ "original_url": original_url }),
            ),
            Err(e) => e,
        }
    }
}
