//! App-id resolution for library games.
//!
//! Games imported from the catalog's own store carry their app id; every
//! other game is matched by title against the full catalog app list. The
//! list is cached on disk with a TTL (18 hours by default):
//!
//! ```text
//! resolve(game)
//!   ├── stored id (catalog-sourced game) ─────────────────► AppId
//!   └── title ─► index() ─┬─ memory copy fresh ───────────► lookup
//!                         ├─ disk copy fresh ─────────────► lookup
//!                         ├─ download ok ─► save to disk ─► lookup
//!                         └─ download failed ─┬─ stale copy ► lookup
//!                                             └─ none ─────► None
//! ```
//!
//! Concurrent callers may both decide to refresh; the last successful
//! download wins and a failed one never discards a copy already held.

mod cache;
mod error;
mod index;
mod source;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

pub use cache::AppListCache;
pub use error::{ResolverError, ResolverResult};
pub use index::{normalize_name, AppIdIndex, AppListEntry};
pub use source::{parse_app_list, AppListSource, WebAppListSource, DEFAULT_APP_LIST_URL};

use crate::depot::AppId;
use crate::game::Game;

/// Default app-list time-to-live.
pub const DEFAULT_INDEX_TTL: Duration = Duration::from_secs(18 * 60 * 60);

/// Library source whose stored ids are catalog app ids.
pub const CATALOG_SOURCE: &str = "steam";

/// In-memory index with the download time of the list it came from.
struct LoadedIndex {
    index: Arc<AppIdIndex>,
    fetched_at_secs: u64,
}

impl LoadedIndex {
    fn from_cache(cache: &AppListCache) -> Self {
        Self {
            index: Arc::new(AppIdIndex::from_entries(&cache.entries)),
            fetched_at_secs: cache.fetched_at_secs,
        }
    }

    fn age_secs(&self) -> u64 {
        cache::now_secs().saturating_sub(self.fetched_at_secs)
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.age_secs() < ttl.as_secs()
    }
}

/// Maps library games to catalog app ids.
pub struct AppIdResolver {
    source: Arc<dyn AppListSource>,
    cache_path: Option<PathBuf>,
    ttl: Duration,
    loaded: RwLock<Option<Arc<LoadedIndex>>>,
}

impl AppIdResolver {
    /// Create a resolver without a disk cache.
    pub fn new(source: Arc<dyn AppListSource>) -> Self {
        Self {
            source,
            cache_path: None,
            ttl: DEFAULT_INDEX_TTL,
            loaded: RwLock::new(None),
        }
    }

    /// Persist the app list at `path`.
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Set the app-list time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Disk cache location, if any.
    pub fn cache_path(&self) -> Option<&PathBuf> {
        self.cache_path.as_ref()
    }

    /// Resolve a game's app id.
    ///
    /// Catalog-sourced games use their stored id; others are looked up by
    /// title. Never fails: an unresolvable game yields `None`.
    pub async fn resolve(&self, game: &Game) -> Option<AppId> {
        if game.is_from_source(CATALOG_SOURCE) {
            let stored = game
                .store_id
                .as_deref()
                .and_then(|s| s.parse::<AppId>().ok());
            if let Some(id) = stored {
                return Some(id);
            }
        }
        self.resolve_name(&game.name).await
    }

    /// Resolve a title by exact normalized match.
    pub async fn resolve_name(&self, name: &str) -> Option<AppId> {
        let index = self.index().await?;
        let found = index.resolve(name);
        if found.is_none() {
            debug!(name, "No app id matches title");
        }
        found
    }

    /// Get the current index, refreshing it if it has expired.
    pub async fn index(&self) -> Option<Arc<AppIdIndex>> {
        let mut held = self.current();
        if let Some(loaded) = held.as_ref() {
            if loaded.is_fresh(self.ttl) {
                return Some(Arc::clone(&loaded.index));
            }
        }

        if held.is_none() {
            if let Some(disk) = self.load_disk().await {
                self.store(Arc::clone(&disk));
                if disk.is_fresh(self.ttl) {
                    debug!(titles = disk.index.len(), "Using cached app list");
                    return Some(Arc::clone(&disk.index));
                }
                held = Some(disk);
            }
        }

        match self.refresh().await {
            Ok(index) => Some(index),
            Err(e) => match held {
                Some(stale) => {
                    warn!(
                        error = %e,
                        age_secs = stale.age_secs(),
                        "App list refresh failed, serving stale copy"
                    );
                    Some(Arc::clone(&stale.index))
                }
                None => {
                    warn!(error = %e, "App list unavailable");
                    None
                }
            },
        }
    }

    /// Download the app list now, replacing the held copy on success.
    ///
    /// The disk cache is updated best-effort; a failed write is logged.
    pub async fn refresh(&self) -> ResolverResult<Arc<AppIdIndex>> {
        let entries = self.source.fetch_app_list().await?;
        let cache = AppListCache::new(entries);
        let loaded = Arc::new(LoadedIndex::from_cache(&cache));
        self.store(Arc::clone(&loaded));

        info!(titles = loaded.index.len(), "Refreshed app list");

        if let Some(path) = self.cache_path.clone() {
            let shown = path.display().to_string();
            match tokio::task::spawn_blocking(move || cache.save(&path)).await {
                Ok(Ok(())) => info!(path = %shown, "Saved app list cache"),
                Ok(Err(e)) => warn!(path = %shown, error = %e, "Failed to save app list cache"),
                Err(e) => warn!(path = %shown, error = %e, "App list cache task failed"),
            }
        }

        Ok(Arc::clone(&loaded.index))
    }

    /// Read the disk cache without touching the held copy.
    ///
    /// Returns `Ok(None)` if no cache path is configured or no file exists.
    pub async fn load_cache(&self) -> ResolverResult<Option<AppListCache>> {
        let Some(path) = self.cache_path.clone() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        tokio::task::spawn_blocking(move || AppListCache::load(&path))
            .await
            .map_err(|e| ResolverError::Task(e.to_string()))?
            .map(Some)
            .map_err(ResolverError::from)
    }

    async fn load_disk(&self) -> Option<Arc<LoadedIndex>> {
        match self.load_cache().await {
            Ok(cache) => cache.map(|c| Arc::new(LoadedIndex::from_cache(&c))),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable app list cache");
                None
            }
        }
    }

    fn current(&self) -> Option<Arc<LoadedIndex>> {
        self.loaded.read().clone()
    }

    fn store(&self, loaded: Arc<LoadedIndex>) {
        *self.loaded.write() = Some(loaded);
    }
}
