//! Lazily recreated catalog client.
//!
//! The underlying HTTP client holds pooled connections. Catalog lookups are
//! rare (once per game, on demand), so instead of keeping a client alive
//! forever the wrapper drops it after [`DEFAULT_IDLE_TIMEOUT`] without use
//! and builds a fresh one from the factory on the next request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tracing::debug;

use super::client::CatalogClient;
use super::error::CatalogResult;
use crate::depot::{AppId, DepotTree};

/// Idle period after which the inner client is disposed.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Factory for fresh catalog clients.
pub type CatalogFactory = Box<dyn Fn() -> CatalogResult<Arc<dyn CatalogClient>> + Send + Sync>;

struct ClientSlot {
    client: Arc<dyn CatalogClient>,
    last_used: Instant,
}

/// Catalog client that recreates its inner client after an idle period.
pub struct IdleRecycledCatalog {
    factory: CatalogFactory,
    idle_timeout: Duration,
    slot: Mutex<Option<ClientSlot>>,
}

impl IdleRecycledCatalog {
    /// Create a wrapper with the default idle timeout.
    pub fn new(factory: CatalogFactory) -> Self {
        Self::with_idle_timeout(factory, DEFAULT_IDLE_TIMEOUT)
    }

    /// Create a wrapper with a custom idle timeout.
    pub fn with_idle_timeout(factory: CatalogFactory, idle_timeout: Duration) -> Self {
        Self {
            factory,
            idle_timeout,
            slot: Mutex::new(None),
        }
    }

    /// Configured idle timeout.
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// True if an inner client currently exists.
    pub fn is_live(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Drop the inner client if it has been idle too long.
    ///
    /// Returns true if a client was disposed.
    pub fn dispose_if_idle(&self) -> bool {
        let mut slot = self.slot.lock();
        let idle = slot
            .as_ref()
            .is_some_and(|s| s.last_used.elapsed() > self.idle_timeout);
        if idle {
            *slot = None;
            debug!(
                idle_secs = self.idle_timeout.as_secs(),
                "Disposed idle catalog client"
            );
        }
        idle
    }

    /// Get the live client, creating one if none exists or the old one idled out.
    pub fn acquire(&self) -> CatalogResult<Arc<dyn CatalogClient>> {
        self.dispose_if_idle();

        let mut slot = self.slot.lock();
        let now = Instant::now();
        match slot.as_mut() {
            Some(existing) => {
                existing.last_used = now;
                Ok(Arc::clone(&existing.client))
            }
            None => {
                let client = (self.factory)()?;
                debug!("Created catalog client");
                *slot = Some(ClientSlot {
                    client: Arc::clone(&client),
                    last_used: now,
                });
                Ok(client)
            }
        }
    }
}

impl CatalogClient for IdleRecycledCatalog {
    fn fetch_depot_tree(&self, app_id: AppId) -> BoxFuture<'_, CatalogResult<DepotTree>> {
        Box::pin(async move {
            let client = self.acquire()?;
            client.fetch_depot_tree(app_id).await
        })
    }
}
