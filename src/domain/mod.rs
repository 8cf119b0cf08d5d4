//! Domain layer containing business entities and ports.
//!
//! Defines the URL record, the storage and name-resolution contracts the
//! services depend on, and the clock used for expiry decisions. Nothing here
//! depends on infrastructure or presentation code.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`host_resolver`] - Host name lookup contract used by URL validation
//! - [`clock`] - Source of "today" for expiry computation

pub mod clock;
pub mod entities;
pub mod host_resolver;
pub mod repositories;
