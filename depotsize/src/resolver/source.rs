//! Downloadable app-list source.

use futures::future::BoxFuture;
use serde::Deserialize;

use super::error::{ResolverError, ResolverResult};
use super::index::AppListEntry;
use crate::depot::AppId;
use crate::http::AsyncHttpClient;

/// Default app-list endpoint.
pub const DEFAULT_APP_LIST_URL: &str = "https://api.steampowered.com/ISteamApps/GetAppList/v2/";

/// Source of the full catalog app list.
pub trait AppListSource: Send + Sync {
    /// Download the complete list.
    fn fetch_app_list(&self) -> BoxFuture<'_, ResolverResult<Vec<AppListEntry>>>;
}

#[derive(Deserialize)]
struct AppListResponse {
    applist: AppList,
}

#[derive(Deserialize)]
struct AppList {
    apps: Vec<AppRow>,
}

#[derive(Deserialize)]
struct AppRow {
    appid: u32,
    #[serde(default)]
    name: String,
}

/// Parse the `{"applist":{"apps":[{"appid","name"}]}}` document.
pub fn parse_app_list(body: &[u8]) -> ResolverResult<Vec<AppListEntry>> {
    let response: AppListResponse =
        serde_json::from_slice(body).map_err(|e| ResolverError::Parse(e.to_string()))?;

    Ok(response
        .applist
        .apps
        .into_iter()
        .map(|row| AppListEntry {
            app_id: AppId(row.appid),
            name: row.name,
        })
        .collect())
}

/// App list downloaded over HTTP.
pub struct WebAppListSource<H: AsyncHttpClient> {
    http: H,
    url: String,
}

impl<H: AsyncHttpClient> WebAppListSource<H> {
    /// Create a source against the default endpoint.
    pub fn new(http: H) -> Self {
        Self::with_url(http, DEFAULT_APP_LIST_URL)
    }

    /// Create a source against a custom endpoint.
    pub fn with_url(http: H, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Endpoint in use.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<H: AsyncHttpClient> AppListSource for WebAppListSource<H> {
    fn fetch_app_list(&self) -> BoxFuture<'_, ResolverResult<Vec<AppListEntry>>> {
        Box::pin(async move {
            let body = self.http.get(&self.url).await?;
            parse_app_list(&body)
        })
    }
}
