//! DTOs for the expand and redirect endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

/// `?short_url=` query parameter shared by expand and redirect.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortUrlQuery {
    #[validate(length(min = 1, message = "short_url must not be empty"))]
    pub short_url: String,
}

/// Full record details returned by `GET /expand`.
#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub original_url: String,
    pub short_url: String,
    pub expiry_date: NaiveDate,
    pub clicks: i64,
}

impl From<UrlRecord> for ExpandResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            original_url: record.original_url,
            short_url: record.short_url,
            expiry_date: record.expiry_date,
            clicks: record.clicks,
        }
    }
}
