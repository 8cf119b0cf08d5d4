//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::repositories::RepositorySummary;
use crate::state::AppState;

/// Returns service health status with storage statistics.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable
/// - **503 Service Unavailable**: Storage query failed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 12 records" }
///   },
///   "storage": { "records": 12, "clicks": 40, "expired": 1 }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (db_check, storage) = check_database(&state).await;

    let healthy = db_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database: db_check },
        storage,
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks storage by computing the record summary.
async fn check_database(state: &AppState) -> (CheckStatus, Option<RepositorySummary>) {
    match state.repository.summary(state.clock.today()).await {
        Ok(summary) => (
            CheckStatus {
                status: "ok".to_string(),
                message: Some(format!("Connected, {} records", summary.records)),
            },
            Some(summary),
        ),
        Err(e) => (
            CheckStatus {
                status: "error".to_string(),
                message: Some(format!("Database error: {}", e)),
            },
            None,
        ),
    }
}
