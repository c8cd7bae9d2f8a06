//! Engine bootstrap implementation.

use std::sync::Arc;

use tracing::info;

use super::config::EngineConfig;
use super::error::AppError;
use crate::calculator::{DiscImageCalculator, SizeCalculator, SteamSizeCalculator};
use crate::catalog::{
    CatalogClient, CatalogFactory, CatalogResult, IdleRecycledCatalog, SteamCmdCatalog,
};
use crate::config::ConfigFile;
use crate::depot::{AggregateReport, AppId, DepotAggregator};
use crate::game::Game;
use crate::http::ReqwestClient;
use crate::orchestrator::{NotificationBoard, SizeProviderOrchestrator, SizeReport};
use crate::resolver::{AppIdResolver, AppListCache, AppListSource, WebAppListSource};

/// The assembled size pipeline.
///
/// Strategies are registered in this order: catalog depots, then disc
/// image. Each game's preferred strategy still runs first.
pub struct SizeEngine {
    config: EngineConfig,
    resolver: Arc<AppIdResolver>,
    aggregator: Arc<DepotAggregator>,
    orchestrator: SizeProviderOrchestrator,
    notifications: Arc<NotificationBoard>,
}

impl SizeEngine {
    /// Build the engine from a loaded configuration file.
    pub fn from_config(file: &ConfigFile) -> Result<Self, AppError> {
        Self::new(EngineConfig::from_config_file(file))
    }

    /// Build the engine with live HTTP collaborators.
    ///
    /// The catalog client is recreated from scratch after it has been idle
    /// for `client_idle_timeout`, which also drops its connection pool.
    pub fn new(config: EngineConfig) -> Result<Self, AppError> {
        let http = ReqwestClient::with_timeout(config.request_timeout)?;

        let request_timeout = config.request_timeout;
        let app_info_url = config.app_info_url.clone();
        let factory: CatalogFactory = Box::new(move || -> CatalogResult<Arc<dyn CatalogClient>> {
            let http = ReqwestClient::with_timeout(request_timeout)?;
            let client = SteamCmdCatalog::with_base_url(http, app_info_url.clone());
            Ok(Arc::new(client) as Arc<dyn CatalogClient>)
        });
        let catalog = Arc::new(IdleRecycledCatalog::with_idle_timeout(
            factory,
            config.client_idle_timeout,
        ));

        let source = Arc::new(WebAppListSource::with_url(http, config.app_list_url.clone()));

        info!(
            app_info_url = %config.app_info_url,
            app_list_url = %config.app_list_url,
            "Size engine configured"
        );
        Ok(Self::with_components(catalog, source, config))
    }

    /// Build the engine around caller-supplied collaborators.
    pub fn with_components(
        catalog: Arc<dyn CatalogClient>,
        source: Arc<dyn AppListSource>,
        config: EngineConfig,
    ) -> Self {
        let mut resolver = AppIdResolver::new(source).with_ttl(config.app_list_ttl);
        if let Some(path) = &config.app_list_cache_path {
            resolver = resolver.with_cache_path(path.clone());
        }
        let resolver = Arc::new(resolver);
        let aggregator = Arc::new(DepotAggregator::new(catalog, config.policy.clone()));

        let strategies: Vec<Arc<dyn SizeCalculator>> = vec![
            Arc::new(SteamSizeCalculator::new(
                Arc::clone(&resolver),
                Arc::clone(&aggregator),
                config.settings,
            )),
            Arc::new(DiscImageCalculator::new()),
        ];

        let notifications = Arc::new(NotificationBoard::new());
        let orchestrator = SizeProviderOrchestrator::new(strategies)
            .with_timeout(config.strategy_timeout)
            .with_notifier(notifications.clone());

        Self {
            config,
            resolver,
            aggregator,
            orchestrator,
            notifications,
        }
    }

    /// Install size of `game` in bytes, or `None` if unknown.
    pub async fn get_size(&self, game: &Game) -> Option<u64> {
        self.orchestrator.get_size(game).await
    }

    /// Run every strategy in order and report each outcome.
    pub async fn run(&self, game: &Game) -> SizeReport {
        self.orchestrator.run(game).await
    }

    /// Resolve `game` and return the catalog's per-app breakdown.
    pub async fn breakdown(&self, game: &Game) -> Option<(AppId, AggregateReport)> {
        let app_id = self.resolver.resolve(game).await?;
        let report = self.aggregator.report(app_id, &self.config.settings).await?;
        Some((app_id, report))
    }

    /// Download the app list now. Returns the number of indexed titles.
    pub async fn refresh_index(&self) -> Result<usize, AppError> {
        let index = self.resolver.refresh().await?;
        Ok(index.len())
    }

    /// The app list as currently stored on disk, if any.
    pub async fn cached_index(&self) -> Result<Option<AppListCache>, AppError> {
        Ok(self.resolver.load_cache().await?)
    }

    pub fn resolver(&self) -> &Arc<AppIdResolver> {
        &self.resolver
    }

    pub fn orchestrator(&self) -> &SizeProviderOrchestrator {
        &self.orchestrator
    }

    /// Strategy failures surfaced so far.
    pub fn notifications(&self) -> &Arc<NotificationBoard> {
        &self.notifications
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FakeCatalog;
    use crate::depot::{ContentUnit, DepotTree, SizeQuerySettings};
    use crate::resolver::{AppListEntry, ResolverError, ResolverResult};
    use futures::future::BoxFuture;
    use tempfile::TempDir;

    struct StaticList(Option<Vec<AppListEntry>>);

    impl AppListSource for StaticList {
        fn fetch_app_list(&self) -> BoxFuture<'_, ResolverResult<Vec<AppListEntry>>> {
            let entries = self.0.clone();
            Box::pin(async move { entries.ok_or_else(|| ResolverError::Parse("offline".into())) })
        }
    }

    fn catalog() -> Arc<dyn CatalogClient> {
        let base = DepotTree::new(
            AppId(100),
            vec![
                ContentUnit::new(101, "Content").with_max_size(3_000),
                ContentUnit::new(102, "Russian Voice").with_max_size(900),
            ],
            vec![AppId(200)],
        );
        let dlc = DepotTree::new(
            AppId(200),
            vec![ContentUnit::new(201, "Season Pass").with_max_size(500)],
            vec![],
        );
        Arc::new(FakeCatalog::new().with_tree(base).with_tree(dlc))
    }

    fn engine(settings: SizeQuerySettings) -> SizeEngine {
        let source = Arc::new(StaticList(Some(vec![AppListEntry::new(100, "Sample Game")])));
        SizeEngine::with_components(
            catalog(),
            source,
            EngineConfig::default().with_settings(settings),
        )
    }

    fn pc_game(name: &str) -> Game {
        Game::new("g", name).with_platform("PC").with_installed(true)
    }

    #[test]
    fn test_live_engine_builds() {
        let engine = SizeEngine::new(EngineConfig::default()).unwrap();
        assert_eq!(
            engine.orchestrator().strategy_names(),
            vec!["Steam", "Disc Image"]
        );
    }

    #[tokio::test]
    async fn test_get_size_through_catalog() {
        let engine = engine(SizeQuerySettings::default());
        assert_eq!(engine.get_size(&pc_game("Sample Game")).await, Some(3_000));

        let engine = self::engine(SizeQuerySettings::new(true, false));
        assert_eq!(engine.get_size(&pc_game("Sample Game")).await, Some(3_500));
    }

    #[tokio::test]
    async fn test_unknown_game_is_none() {
        let engine = engine(SizeQuerySettings::default());
        let report = engine.run(&pc_game("Not In Catalog")).await;

        assert_eq!(report.size(), None);
        assert!(engine.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_breakdown() {
        let engine = engine(SizeQuerySettings::everything());
        let (app_id, report) = engine.breakdown(&pc_game("sample game")).await.unwrap();

        assert_eq!(app_id, AppId(100));
        assert_eq!(report.apps.len(), 2);
        assert_eq!(report.total(), Some(3_500));
    }

    #[tokio::test]
    async fn test_refresh_and_cached_index() {
        let dir = TempDir::new().unwrap();
        let source = Arc::new(StaticList(Some(vec![
            AppListEntry::new(100, "Sample Game"),
            AppListEntry::new(300, "Other Game"),
        ])));
        let config = EngineConfig::default().with_app_list_cache_path(dir.path().join("apps.bin"));
        let engine = SizeEngine::with_components(catalog(), source, config);

        assert!(engine.cached_index().await.unwrap().is_none());
        assert_eq!(engine.refresh_index().await.unwrap(), 2);

        let cached = engine.cached_index().await.unwrap().unwrap();
        assert_eq!(cached.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_is_index_error() {
        let engine = SizeEngine::with_components(
            catalog(),
            Arc::new(StaticList(None)),
            EngineConfig::default(),
        );

        assert!(matches!(
            engine.refresh_index().await,
            Err(AppError::Index(_))
        ));
    }
}
