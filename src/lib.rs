//! # Shortlink
//!
//! A URL shortening service with expiring aliases and click counting, built
//! with Axum and SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - URL record entity, repository and resolver traits, clock
//! - **Application Layer** ([`application`]) - Validation, shortening and resolution services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite and in-memory storage, DNS lookups
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - URL validation: syntax, self-reference and DNS resolvability
//! - Duplicate detection: one alias per destination
//! - Per-link expiry in days with configurable bounds
//! - Click counting on redirect
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://shortlink.db"
//! export BASE_DOMAIN="myurlshortener.live/"
//!
//! # Migrations are applied on startup
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ResolverService, ShortenerService, UrlValidator};
    pub use crate::config::ShortLinkSettings;
    pub use crate::domain::clock::{Clock, SystemClock};
    pub use crate::domain::entities::{NewUrlRecord, ShortenedUrl, UrlRecord};
    pub use crate::domain::host_resolver::{HostResolver, ResolveError};
    pub use crate::domain::repositories::{RepositorySummary, UrlRepository};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
