//! Utility functions used across the application.
//!
//! - [`code_generator`] - Short code token generation and shape checks
//! - [`url_normalizer`] - URL parsing and canonicalisation

pub mod code_generator;
pub mod url_normalizer;
