//! Application layer services implementing business logic.
//!
//! Services coordinate validation, the expiry policy and repository calls, and
//! give HTTP handlers and the admin CLI one API to call.
//!
//! # Available Services
//!
//! - [`services::url_validator::UrlValidator`] - Syntax, self-reference and DNS checks
//! - [`services::shortener_service::ShortenerService`] - Short link creation
//! - [`services::resolver_service::ResolverService`] - Expansion and redirects

pub mod services;
