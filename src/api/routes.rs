//! API route configuration.

use crate::api::handlers::{expand_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short link routes.
///
/// # Endpoints
///
/// - `POST /shorten`                 - Create a short URL
/// - `GET  /expand?short_url=...`    - Show the record behind a short URL
/// - `GET  /redirect?short_url=...`  - Redirect to the original URL and count the click
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/expand", get(expand_handler))
        .route("/redirect", get(redirect_handler))
}
