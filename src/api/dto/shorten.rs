//! DTOs for link shortening endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortenedUrl;

/// Request to shorten a single URL.
///
/// Only the presence and size of `original_url` are checked here. Syntax,
/// self-reference and DNS checks happen in the validator so that they report
/// the `invalid_url` error kind.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2083, message = "URL must be 1 to 2083 characters long"))]
    pub original_url: String,

    /// Days until the alias expires. Falls back to the configured default.
    pub expiry_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub expiry_date: NaiveDate,
}

impl From<ShortenedUrl> for ShortenResponse {
    fn from(shortened: ShortenedUrl) -> Self {
        Self {
            short_url: shortened.short_url,
            expiry_date: shortened.expiry_date,
        }
    }
}
