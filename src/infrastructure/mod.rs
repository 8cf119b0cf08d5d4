//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the domain ports.
//!
//! # Modules
//!
//! - [`dns`] - Host name resolution through the operating system resolver
//! - [`persistence`] - SQLite and in-memory repository implementations

pub mod dns;
pub mod persistence;
