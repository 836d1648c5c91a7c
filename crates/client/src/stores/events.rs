//! Shared cache of the remote event list.
//!
//! One [`EventsCache`] is shared by every screen that shows events. Clones
//! share state. The state lock is only taken for short synchronous updates,
//! never across the network call, so a second `fetch` issued while the
//! first is in flight sees `Loading` and backs off.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument, warn};
use ticketbox_core::{Event, LoadStatus};

use crate::catalog::CatalogClient;

/// Point-in-time view of the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsSnapshot {
    pub status: LoadStatus,
    pub events: Vec<Event>,
    /// Message of the last failure; cleared when a new request starts.
    pub error: Option<String>,
}

/// Event list with load status, backed by a [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct EventsCache {
    client: CatalogClient,
    state: Arc<Mutex<CacheState>>,
}

#[derive(Debug, Default)]
struct CacheState {
    snapshot: EventsSnapshot,
    /// Bumped each time a load starts.
    generation: u64,
}

impl EventsCache {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load events unless a load is already running.
    ///
    /// Returns `false` when skipped. Failures are recorded in the cache,
    /// not returned. Dropping the future before it finishes puts the cache
    /// back in the state it had before the load started.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> bool {
        let Some(load) = self.begin(true) else {
            debug!("Events already loading, skipping fetch");
            return false;
        };
        self.complete(load).await;
        true
    }

    /// Load events even if a load is already running.
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        if let Some(load) = self.begin(false) {
            self.complete(load).await;
        }
    }

    fn begin(&self, guarded: bool) -> Option<PendingLoad<'_>> {
        let mut state = self.lock();
        if guarded && state.snapshot.status.is_loading() {
            return None;
        }
        state.generation += 1;
        let load = PendingLoad {
            cache: self,
            generation: state.generation,
            previous_status: state.snapshot.status,
            previous_error: state.snapshot.error.take(),
            finished: false,
        };
        state.snapshot.status = LoadStatus::Loading;
        Some(load)
    }

    async fn complete(&self, mut load: PendingLoad<'_>) {
        let result = self.client.list_events().await;
        load.finished = true;

        let mut state = self.lock();
        let snapshot = &mut state.snapshot;
        match result {
            Ok(events) => {
                debug!(count = events.len(), "Events cached");
                snapshot.events = events;
                snapshot.status = LoadStatus::Loaded;
            }
            Err(e) => {
                // Previously loaded events stay visible.
                warn!(error = %e, "Failed to load events");
                snapshot.error = Some(e.to_string());
                snapshot.status = LoadStatus::Error;
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> EventsSnapshot {
        self.lock().snapshot.clone()
    }

    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.lock().snapshot.status
    }

    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.lock().snapshot.events.clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().snapshot.error.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().snapshot.status.is_loading()
    }
}

/// A started load. Rolls the status back if dropped unfinished.
struct PendingLoad<'a> {
    cache: &'a EventsCache,
    generation: u64,
    previous_status: LoadStatus,
    previous_error: Option<String>,
    finished: bool,
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut state = self.cache.lock();
        // A newer load owns the status now.
        if state.generation != self.generation || !state.snapshot.status.is_loading() {
            return;
        }
        debug!("Events load cancelled");
        state.snapshot.status = if self.previous_status.is_loading() {
            LoadStatus::Idle
        } else {
            self.previous_status
        };
        state.snapshot.error = self.previous_error.take();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    fn cache() -> EventsCache {
        EventsCache::new(CatalogClient::new(&CatalogConfig::default()).unwrap())
    }

    #[test]
    fn test_starts_idle() {
        let cache = cache();
        assert_eq!(cache.status(), LoadStatus::Idle);
        assert!(cache.events().is_empty());
        assert!(cache.error().is_none());
        assert!(!cache.is_loading());
    }

    #[test]
    fn test_guard_blocks_while_loading() {
        let cache = cache();
        let first = cache.begin(true);
        assert!(first.is_some());
        assert!(cache.is_loading());
        assert!(cache.begin(true).is_none());
        // Unguarded start always proceeds.
        assert!(cache.begin(false).is_some());
    }

    #[test]
    fn test_begin_clears_error() {
        let cache = cache();
        {
            let mut state = cache.lock();
            state.snapshot.status = LoadStatus::Error;
            state.snapshot.error = Some("boom".to_string());
        }
        let _load = cache.begin(true).unwrap();
        assert!(cache.error().is_none());
        assert_eq!(cache.status(), LoadStatus::Loading);
    }

    #[test]
    fn test_dropped_load_restores_previous_state() {
        let cache = cache();
        drop(cache.begin(true));
        assert_eq!(cache.status(), LoadStatus::Idle);

        {
            let mut state = cache.lock();
            state.snapshot.status = LoadStatus::Error;
            state.snapshot.error = Some("boom".to_string());
        }
        drop(cache.begin(true));
        assert_eq!(cache.status(), LoadStatus::Error);
        assert_eq!(cache.error().as_deref(), Some("boom"));
    }

    #[test]
    fn test_dropped_stale_load_leaves_newer_load_alone() {
        let cache = cache();
        let stale = cache.begin(true).unwrap();
        let _current = cache.begin(false).unwrap();

        drop(stale);
        assert!(cache.is_loading());
    }

    #[test]
    fn test_clones_share_state() {
        let cache = cache();
        let other = cache.clone();
        let _load = cache.begin(true);
        assert!(other.is_loading());
    }
}
