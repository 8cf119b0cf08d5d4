//! Core domain entities.
//!
//! - [`UrlRecord`] - A persisted short link with its expiry date and click counter
//! - [`NewUrlRecord`] - Insert input for a new short link
//! - [`ShortenedUrl`] - Result of a successful shortening

pub mod url_record;

pub use url_record::{NewUrlRecord, ShortenedUrl, UrlRecord};
