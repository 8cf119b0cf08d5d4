//! Host name lookup contract used by URL validation.

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;

/// Errors reported by a [`HostResolver`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("lookup failed: {0}")]
    LookupFailed(String),

    #[error("resolver returned no addresses")]
    NoAddresses,

    #[error("lookup timed out after {0:?}")]
    TimedOut(Duration),
}

/// Resolves a host name to its addresses.
///
/// # Implementations
///
/// - [`crate::infrastructure::dns::SystemResolver`] - Tokio / OS resolver
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Returns at least one address for `host`, or an error.
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError>;
}
