//! Application state shared by every screen.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::storage::{FileStore, StateStore};
use crate::stores::{BasketStore, EventsCache, ThemeStore};

/// Shared resources: configuration, the catalog client, the events cache
/// and the persistence backend.
///
/// Cheaply cloneable via `Arc`. Basket and theme stores are owned values
/// built on demand from the shared backend.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ClientConfig,
    catalog: CatalogClient,
    events: EventsCache,
    storage: Arc<dyn StateStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.inner.catalog)
            .field("data_dir", &self.inner.config.data_dir)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create state persisting to `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let storage = Arc::new(FileStore::new(&config.data_dir));
        Self::with_storage(config, storage)
    }

    /// Create state with an explicit persistence backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_storage(config: ClientConfig, storage: Arc<dyn StateStore>) -> Result<Self> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let events = EventsCache::new(catalog.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                events,
                storage,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    #[must_use]
    pub fn events(&self) -> &EventsCache {
        &self.inner.events
    }

    /// Load the persisted basket.
    #[must_use]
    pub fn basket_store(&self) -> BasketStore {
        BasketStore::load(Arc::clone(&self.inner.storage))
    }

    /// Load the persisted theme, falling back to the configured system scheme.
    #[must_use]
    pub fn theme_store(&self) -> ThemeStore {
        ThemeStore::load(
            Arc::clone(&self.inner.storage),
            self.inner.config.system_color_scheme,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use ticketbox_core::{ColorScheme, EventKey, LoadStatus, TicketTypeInfo, TicketTypeKey};

    use super::*;
    use crate::config::CatalogConfig;
    use crate::storage::MemoryStore;

    fn config() -> ClientConfig {
        ClientConfig {
            catalog: CatalogConfig::default(),
            data_dir: PathBuf::from("unused"),
            system_color_scheme: Some(ColorScheme::Dark),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_stores_share_backend() {
        let state = AppState::with_storage(config(), Arc::new(MemoryStore::new())).unwrap();

        let mut basket = state.basket_store();
        basket.add_item(
            TicketTypeKey::new("t1"),
            TicketTypeInfo::default(),
            EventKey::new("ev"),
            "Event",
        );
        assert_eq!(state.basket_store().count(), 1);

        assert_eq!(state.theme_store().color_scheme(), ColorScheme::Dark);
        assert_eq!(state.events().status(), LoadStatus::Idle);
    }
}
