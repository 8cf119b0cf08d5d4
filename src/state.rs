//! Shared application state.

use std::sync::Arc;

use crate::application::services::{ResolverService, ShortenerService, UrlValidator};
use crate::config::ShortLinkSettings;
use crate::domain::clock::Clock;
use crate::domain::host_resolver::HostResolver;
use crate::domain::repositories::UrlRepository;

/// State injected into every handler.
///
/// Services and the repository are shared behind `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    pub resolver: Arc<ResolverService>,
    pub repository: Arc<dyn UrlRepository>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wires the services around one repository, host resolver and clock.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        host_resolver: Arc<dyn HostResolver>,
        clock: Arc<dyn Clock>,
        settings: ShortLinkSettings,
    ) -> Self {
        let validator = UrlValidator::new(host_resolver, &settings);
        let resolver = Arc::new(ResolverService::new(
            repository.clone(),
            clock.clone(),
            settings.base_domain.clone(),
        ));
        let shortener = Arc::new(ShortenerService::new(
            validator,
            repository.clone(),
            clock.clone(),
            settings,
        ));

        Self {
            shortener,
            resolver,
            repository,
            clock,
        }
    }
}
