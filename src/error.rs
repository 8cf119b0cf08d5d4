//! Application error type and its HTTP representation.
//!
//! Every expected outcome of the shortening and resolution flows has its own
//! variant so callers (HTTP handlers, the admin CLI, tests) can branch on it.
//! Only [`AppError::Internal`] represents an unexpected failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Why a submitted URL was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidUrlKind {
    /// Not parseable, wrong scheme, missing host or too long.
    Malformed,
    /// Host name lookup failed or timed out.
    Unresolvable,
    /// The URL already points at this service's short-link domain.
    SelfReferential,
}

impl fmt::Display for InvalidUrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => f.write_str("malformed"),
            Self::Unresolvable => f.write_str("unresolvable"),
            Self::SelfReferential => f.write_str("self_referential"),
        }
    }
}

/// Unique index that rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueField {
    OriginalUrl,
    ShortUrl,
    Unknown,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL ({kind}): {message}")]
    InvalidUrl {
        kind: InvalidUrlKind,
        message: String,
        details: Value,
    },

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("URL already shortened: {short_url}")]
    DuplicateUrl { short_url: String },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Expired { message: String, details: Value },

    #[error("Unique constraint violation on {field:?}")]
    Conflict { field: UniqueField, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(kind: InvalidUrlKind, message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            kind,
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn duplicate(short_url: impl Into<String>) -> Self {
        Self::DuplicateUrl {
            short_url: short_url.into(),
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(field: UniqueField, details: Value) -> Self {
        Self::Conflict { field, details }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateUrl { .. } | Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Expired { .. } => StatusCode::GONE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serialisable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::InvalidUrl {
                kind,
                message,
                details,
            } => {
                let mut details = details.clone();
                if let Value::Object(map) = &mut details {
                    map.insert("kind".to_string(), json!(kind));
                } else {
                    details = json!({ "kind": kind });
                }
                ErrorInfo {
                    code: "invalid_url",
                    message: message.clone(),
                    details,
                }
            }
            Self::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            Self::DuplicateUrl { short_url } => ErrorInfo {
                code: "duplicate_url",
                message: format!("URL already shortened. Here is the shortened URL: {short_url}"),
                details: json!({ "short_url": short_url }),
            },
            Self::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Expired { message, details } => ErrorInfo {
                code: "expired",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Conflict { field, details } => ErrorInfo {
                code: "conflict",
                message: "Unique constraint violation".to_string(),
                details: {
                    let mut details = details.clone();
                    if let Value::Object(map) = &mut details {
                        map.insert("field".to_string(), json!(field));
                    }
                    details
                },
            },
            Self::Internal { message, details } => ErrorInfo {
                code: "internal_error",
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                unique_field_from_message(db.message()),
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %e, "Storage error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        AppError::bad_request("Request validation failed", json!({ "fields": fields }))
    }
}

/// Maps a SQLite unique-violation message (`UNIQUE constraint failed: urls.short_url`)
/// to the column it names.
pub(crate) fn unique_field_from_message(message: &str) -> UniqueField {
    if message.contains("urls.short_url") {
        UniqueField::ShortUrl
    } else if message.contains("urls.original_url") {
        UniqueField::OriginalUrl
    } else {
        UniqueField::Unknown
    }
}
