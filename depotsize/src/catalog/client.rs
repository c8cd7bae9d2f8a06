//! Catalog client trait.

use futures::future::BoxFuture;

use super::error::CatalogResult;
use crate::depot::{AppId, DepotTree};

/// Source of depot trees.
///
/// Dyn-compatible so clients can be shared as `Arc<dyn CatalogClient>` and
/// swapped out by [`IdleRecycledCatalog`](super::IdleRecycledCatalog).
pub trait CatalogClient: Send + Sync {
    /// Fetch the depot tree for one app.
    fn fetch_depot_tree(&self, app_id: AppId) -> BoxFuture<'_, CatalogResult<DepotTree>>;
}
