use super::domain::Directory;
use super::provider::CatalogProvider;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::warn;

pub const DEFAULT_CATALOG_TTL_SECONDS: i64 = 300;

#[derive(Debug)]
struct RegistryState {
    snapshot: Arc<Vec<Directory>>,
    fetched_at: Option<DateTime<Utc>>,
}

/// Time-bounded cache of the directory catalog.
///
/// The snapshot is swapped wholesale, never mutated in place, so a
/// reader observes either the pre- or post-refresh list. A failed
/// refresh keeps the previous snapshot but still stamps `fetched_at`,
/// enforcing a cool-down before the next attempt. Callers never see
/// an error: the worst outcome of a broken provider is stale (or, on
/// a cold start, empty) data.
pub struct DirectoryRegistry<P> {
    provider: P,
    ttl: Duration,
    state: Mutex<RegistryState>,
}

impl<P: CatalogProvider> DirectoryRegistry<P> {
    pub fn new(provider: P) -> Self {
        Self::with_ttl(provider, Duration::seconds(DEFAULT_CATALOG_TTL_SECONDS))
    }

    pub fn with_ttl(provider: P, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            state: Mutex::new(RegistryState {
                snapshot: Arc::new(Vec::new()),
                fetched_at: None,
            }),
        }
    }

    pub fn directories(&self) -> Arc<Vec<Directory>> {
        self.directories_at(Utc::now())
    }

    /// Snapshot of the catalog as of `now`, refreshing when the cache
    /// is stale or empty. The window is claimed before the provider
    /// call, so concurrent callers keep serving the previous snapshot
    /// instead of blocking on a refresh they did not trigger.
    pub fn directories_at(&self, now: DateTime<Utc>) -> Arc<Vec<Directory>> {
        {
            let mut state = self.lock_state();
            if let Some(fetched_at) = state.fetched_at {
                if now - fetched_at < self.ttl && !state.snapshot.is_empty() {
                    return Arc::clone(&state.snapshot);
                }
            }
            state.fetched_at = Some(now);
        }

        let refreshed = self.provider.fetch_directory_catalog();

        let mut state = self.lock_state();
        match refreshed {
            Ok(directories) => {
                // A genuinely empty upstream result overwrites the cache.
                state.snapshot = Arc::new(directories);
                state.fetched_at = Some(now);
            }
            Err(error) => {
                warn!(%error, "catalog refresh failed, serving previous snapshot");
            }
        }
        Arc::clone(&state.snapshot)
    }

    fn lock_state(&self) -> MutexGuard<'_, RegistryState> {
        // The registry must never panic; recover the state from a
        // poisoned lock (the snapshot swap keeps it consistent).
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
