//! Host resolver backed by the operating system via Tokio.

use async_trait::async_trait;
use std::net::IpAddr;
use tracing::debug;

use crate::domain::host_resolver::{HostResolver, ResolveError};

/// Resolves hosts with `tokio::net::lookup_host`.
///
/// IP literals are returned as-is without a lookup. Callers bound the lookup
/// time themselves (see [`crate::application::services::UrlValidator`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError> {
        let host = host.trim_start_matches('[').trim_end_matches(']');

        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        let addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| ResolveError::LookupFailed(e.to_string()))?;

        let mut ips: Vec<IpAddr> = Vec::new();
        for addr in addrs {
            if !ips.contains(&addr.ip()) {
                ips.push(addr.ip());
            }
        }

        if ips.is_empty() {
            return Err(ResolveError::NoAddresses);
        }

        debug!(host, count = ips.len(), "Resolved host");
        Ok(ips)
    }
}
