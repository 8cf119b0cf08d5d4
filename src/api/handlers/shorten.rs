//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for one destination.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/page",
///   "expiry_days": 30
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_url": "myurlshortener.live/Ab3dE6gH9",
///   "expiry_date": "2026-11-18"
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_url` if the URL is malformed, self-referential or unresolvable
/// - 400 `validation_error` if `expiry_days` is out of range or the body is invalid
/// - 409 `duplicate_url` with `details.short_url` if the URL was already shortened
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let shortened = state
        .shortener
        .shorten(&payload.original_url, payload.expiry_days)
        .await?;

    Ok(Json(shortened.into()))
}
