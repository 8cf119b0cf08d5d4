//! URL record entity representing a short link.

use chrono::NaiveDate;
use serde::Serialize;

/// A shortened URL with its expiry date and click counter.
///
/// `expiry_date` is fixed at creation. `clicks` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_url: String,
    pub expiry_date: NaiveDate,
    pub clicks: i64,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_url: String,
        expiry_date: NaiveDate,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            original_url,
            short_url,
            expiry_date,
            clicks,
        }
    }

    /// Returns true once `today` is past the expiry date.
    ///
    /// The expiry date itself is still a valid day.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        today > self.expiry_date
    }
}

/// Input data for creating a new URL record. Clicks always start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub original_url: String,
    pub short_url: String,
    pub expiry_date: NaiveDate,
}

/// Outcome of a successful shortening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenedUrl {
    pub short_url: String,
    pub expiry_date: NaiveDate,
}
