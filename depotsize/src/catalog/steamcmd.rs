//! JSON app-info catalog client.
//!
//! Fetches `<base_url><appid>` and maps the response with
//! [`parse_app_info`]. Parsed trees are kept in a small TTL cache, so a
//! title and its DLC apps are fetched at most once per window even when
//! several strategies or CLI commands ask for them.

use std::time::Duration;

use futures::future::BoxFuture;
use moka::future::Cache;
use tracing::debug;

use super::client::CatalogClient;
use super::error::CatalogResult;
use super::parse::parse_app_info;
use crate::depot::{AppId, DepotTree};
use crate::http::AsyncHttpClient;

/// Default app-info endpoint.
pub const DEFAULT_APP_INFO_URL: &str = "https://api.steamcmd.net/v1/info/";

/// How long a parsed tree stays cached.
const TREE_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

/// Maximum number of cached trees.
const TREE_CACHE_CAPACITY: u64 = 512;

/// Catalog client for the JSON app-info endpoint.
pub struct SteamCmdCatalog<H: AsyncHttpClient> {
    http: H,
    base_url: String,
    trees: Cache<AppId, DepotTree>,
}

impl<H: AsyncHttpClient> SteamCmdCatalog<H> {
    /// Create a client against the default endpoint.
    pub fn new(http: H) -> Self {
        Self::with_base_url(http, DEFAULT_APP_INFO_URL)
    }

    /// Create a client against a custom endpoint.
    ///
    /// The app id is appended to `base_url`; a trailing slash is added if
    /// missing.
    pub fn with_base_url(http: H, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            http,
            base_url,
            trees: Cache::builder()
                .max_capacity(TREE_CACHE_CAPACITY)
                .time_to_live(TREE_CACHE_TTL)
                .build(),
        }
    }

    /// Build the request URL for an app.
    fn build_url(&self, app_id: AppId) -> String {
        format!("{}{}", self.base_url, app_id)
    }
}

impl<H: AsyncHttpClient> CatalogClient for SteamCmdCatalog<H> {
    fn fetch_depot_tree(&self, app_id: AppId) -> BoxFuture<'_, CatalogResult<DepotTree>> {
        Box::pin(async move {
            if let Some(tree) = self.trees.get(&app_id).await {
                debug!(app_id = %app_id, "Depot tree served from cache");
                return Ok(tree);
            }

            let url = self.build_url(app_id);
            let body = self.http.get(&url).await?;
            let tree = parse_app_info(app_id, &body)?;

            debug!(
                app_id = %app_id,
                units = tree.units().len(),
                extra_apps = tree.extra_apps().len(),
                "Fetched depot tree"
            );

            self.trees.insert(app_id, tree.clone()).await;
            Ok(tree)
        })
    }
}
