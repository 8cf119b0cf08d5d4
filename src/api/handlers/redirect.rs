//! Handler for short URL redirect.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use validator::Validate;

use crate::api::dto::expand::ShortUrlQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short URL to its original URL.
///
/// # Endpoint
///
/// `GET /redirect?short_url=myurlshortener.live/Ab3dE6gH9`
///
/// The click is counted before the 307 Temporary Redirect is sent.
///
/// # Errors
///
/// Returns 400 Bad Request if the short URL has the wrong shape.
/// Returns 404 Not Found if it is unknown.
/// Returns 410 Gone if it has expired.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Query(query): Query<ShortUrlQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let original_url = state.resolver.resolve(&query.short_url).await?;

    Ok(Redirect::temporary(&original_url))
}
