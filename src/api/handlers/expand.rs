//! Handler for short URL expansion.

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::expand::{ExpandResponse, ShortUrlQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the record behind a short URL without counting a click.
///
/// # Endpoint
///
/// `GET /expand?short_url=myurlshortener.live/Ab3dE6gH9`
///
/// # Errors
///
/// Returns 400 Bad Request if the short URL has the wrong shape.
/// Returns 404 Not Found if it is unknown.
/// Returns 410 Gone if it has expired.
pub async fn expand_handler(
    State(state): State<AppState>,
    Query(query): Query<ShortUrlQuery>,
) -> Result<Json<ExpandResponse>, AppError> {
    query.validate()?;

    let record = state.resolver.inspect(&query.short_url).await?;

    Ok(Json(record.into()))
}
