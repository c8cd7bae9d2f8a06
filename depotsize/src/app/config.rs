//! Engine configuration.
//!
//! `EngineConfig` is the resolved form of the configuration file: every
//! value the bootstrap needs, already converted to its runtime type.

use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::{DEFAULT_APP_INFO_URL, DEFAULT_IDLE_TIMEOUT};
use crate::config::ConfigFile;
use crate::depot::SizeQuerySettings;
use crate::http::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::orchestrator::DEFAULT_STRATEGY_TIMEOUT;
use crate::region::RegionWordPolicy;
use crate::resolver::{DEFAULT_APP_LIST_URL, DEFAULT_INDEX_TTL};

/// Everything needed to build a [`SizeEngine`](super::SizeEngine).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Inclusion toggles.
    pub settings: SizeQuerySettings,

    /// Region allow/deny words.
    pub policy: RegionWordPolicy,

    /// Catalog app-info endpoint; the app id is appended.
    pub app_info_url: String,

    /// App-list download URL.
    pub app_list_url: String,

    /// Age after which the app list is refreshed.
    pub app_list_ttl: Duration,

    /// App-list disk cache; memory only when `None`.
    pub app_list_cache_path: Option<PathBuf>,

    /// Idle period after which the catalog client is recreated.
    pub client_idle_timeout: Duration,

    /// HTTP request timeout.
    pub request_timeout: Duration,

    /// Bound on each size strategy call.
    pub strategy_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings: SizeQuerySettings::default(),
            policy: RegionWordPolicy::default(),
            app_info_url: DEFAULT_APP_INFO_URL.to_string(),
            app_list_url: DEFAULT_APP_LIST_URL.to_string(),
            app_list_ttl: DEFAULT_INDEX_TTL,
            app_list_cache_path: None,
            client_idle_timeout: DEFAULT_IDLE_TIMEOUT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            strategy_timeout: DEFAULT_STRATEGY_TIMEOUT,
        }
    }
}

impl EngineConfig {
    /// Resolve the engine configuration from a loaded configuration file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            settings: config.query_settings(),
            policy: config.region_policy(),
            app_info_url: config.catalog.app_info_url.clone(),
            app_list_url: config.catalog.app_list_url.clone(),
            app_list_ttl: config.app_list_ttl(),
            app_list_cache_path: Some(config.app_list_cache_path()),
            client_idle_timeout: config.client_idle_timeout(),
            request_timeout: config.request_timeout(),
            strategy_timeout: config.strategy_timeout(),
        }
    }

    /// Override the inclusion toggles.
    pub fn with_settings(mut self, settings: SizeQuerySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Override the app-list cache location.
    pub fn with_app_list_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.app_list_cache_path = Some(path.into());
        self
    }
}
