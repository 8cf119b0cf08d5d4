//! Validation of URLs submitted for shortening.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ShortLinkSettings;
use crate::domain::host_resolver::{HostResolver, ResolveError};
use crate::error::{AppError, InvalidUrlKind};
use crate::utils::url_normalizer::normalize_url;

/// Decides whether a URL may be shortened.
///
/// Checks run cheapest first: syntax, then self-reference against the service's
/// own short-link host, then a time-bounded host name lookup. Nothing is
/// persisted here.
pub struct UrlValidator {
    resolver: Arc<dyn HostResolver>,
    base_host: String,
    dns_timeout: Duration,
}

impl UrlValidator {
    /// Creates a validator for the given short-link policy.
    pub fn new(resolver: Arc<dyn HostResolver>, settings: &ShortLinkSettings) -> Self {
        Self {
            resolver,
            base_host: settings.base_host().unwrap_or_default(),
            dns_timeout: settings.dns_timeout,
        }
    }

    /// Validates `candidate` and returns its canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] with kind:
    /// - `Malformed` if the URL cannot be parsed, is not HTTP(S), or is too long
    /// - `SelfReferential` if the host is the short-link domain or one of its subdomains
    /// - `Unresolvable` if the host lookup fails, finds nothing, or times out
    pub async fn validate(&self, candidate: &str) -> Result<String, AppError> {
        let normalized = normalize_url(candidate).map_err(|e| {
            AppError::invalid_url(
                InvalidUrlKind::Malformed,
                "Invalid URL format",
                json!({ "reason": e.to_string() }),
            )
        })?;

        if self.is_self_referential(&normalized.host) {
            warn!(host = %normalized.host, "Rejected self-referential URL");
            return Err(AppError::invalid_url(
                InvalidUrlKind::SelfReferential,
                "Cannot shorten a URL from the same domain",
                json!({ "host": normalized.host }),
            ));
        }

        self.check_resolvable(&normalized.host).await?;

        debug!(url = %normalized.url, "URL accepted");
        Ok(normalized.url)
    }

    fn is_self_referential(&self, host: &str) -> bool {
        if self.base_host.is_empty() {
            return false;
        }

        let host = host.trim_end_matches('.');
        host == self.base_host
            || host
                .strip_suffix(self.base_host.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    async fn check_resolvable(&self, host: &str) -> Result<(), AppError> {
        let outcome = tokio::time::timeout(self.dns_timeout, self.resolver.resolve(host))
            .await
            .unwrap_or_else(|_| Err(ResolveError::TimedOut(self.dns_timeout)));

        match outcome {
            Ok(addrs) if !addrs.is_empty() => Ok(()),
            Ok(_) => Err(unresolvable(host, &ResolveError::NoAddresses)),
            Err(e) => Err(unresolvable(host, &e)),
        }
    }
}

fn unresolvable(host: &str, e: &ResolveError) -> AppError {
    warn!(host, error = %e, "DNS lookup failed");
    AppError::invalid_url(
        InvalidUrlKind::Unresolvable,
        "Invalid URL: DNS lookup failed",
        json!({ "host": host, "reason": e.to_string() }),
    )
}
