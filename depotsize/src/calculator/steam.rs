//! Catalog depot strategy.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use super::traits::{CalculatorResult, SizeCalculator};
use crate::depot::{DepotAggregator, SizeQuerySettings};
use crate::game::Game;
use crate::resolver::{AppIdResolver, CATALOG_SOURCE};

/// Sizes games from the catalog's depot manifests.
///
/// Preferred for games imported from the catalog's own store. Resolution
/// and fetch failures are answers of "unknown", not errors.
pub struct SteamSizeCalculator {
    resolver: Arc<AppIdResolver>,
    aggregator: Arc<DepotAggregator>,
    settings: SizeQuerySettings,
}

impl SteamSizeCalculator {
    /// Create the strategy with a settings snapshot.
    pub fn new(
        resolver: Arc<AppIdResolver>,
        aggregator: Arc<DepotAggregator>,
        settings: SizeQuerySettings,
    ) -> Self {
        Self {
            resolver,
            aggregator,
            settings,
        }
    }

    /// Settings snapshot in use.
    pub fn settings(&self) -> SizeQuerySettings {
        self.settings
    }
}

impl SizeCalculator for SteamSizeCalculator {
    fn name(&self) -> &str {
        "Steam"
    }

    fn is_preferred(&self, game: &Game) -> bool {
        game.is_from_source(CATALOG_SOURCE)
    }

    fn compute<'a>(&'a self, game: &'a Game) -> BoxFuture<'a, CalculatorResult> {
        Box::pin(async move {
            let Some(app_id) = self.resolver.resolve(game).await else {
                debug!(game = %game.name, "Could not resolve app id");
                return Ok(None);
            };

            Ok(self.aggregator.aggregate(app_id, &self.settings).await)
        })
    }
}
