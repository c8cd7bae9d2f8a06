//! Install-size aggregation across a title and its owned extra apps.
//!
//! Failure semantics:
//!
//! - Root tree fetch fails, or root tree has no units: no answer (`None`)
//! - Extra-app fetch fails: logged, that app contributes nothing
//! - Nothing included across all apps: no answer (`None`), never zero

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::filter::included_units;
use super::model::{AppId, DepotTree};
use super::SizeQuerySettings;
use crate::catalog::CatalogClient;
use crate::region::RegionWordPolicy;

/// One unit counted toward the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludedUnit {
    pub id: u32,
    pub name: String,
    pub size: u64,
}

/// Included units and subtotal for one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContribution {
    pub app_id: AppId,
    pub units: Vec<IncludedUnit>,
}

impl AppContribution {
    fn from_tree(
        tree: &DepotTree,
        settings: &SizeQuerySettings,
        policy: &RegionWordPolicy,
    ) -> Self {
        let units = included_units(tree, settings, policy)
            .into_iter()
            .map(|unit| IncludedUnit {
                id: unit.id(),
                name: unit.name().to_string(),
                size: unit.resolved_size(),
            })
            .collect();

        Self {
            app_id: tree.app_id(),
            units,
        }
    }

    /// Sum of included unit sizes, saturating at `u64::MAX`.
    pub fn subtotal(&self) -> u64 {
        self.units
            .iter()
            .fold(0u64, |acc, u| acc.saturating_add(u.size))
    }
}

/// Per-app breakdown of one aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    /// Root app first, then extra apps in catalog order.
    pub apps: Vec<AppContribution>,
    /// Extra apps whose trees could not be fetched.
    pub failed_extra_apps: Vec<AppId>,
}

impl AggregateReport {
    /// Number of included units across every app.
    pub fn included_unit_count(&self) -> usize {
        self.apps.iter().map(|a| a.units.len()).sum()
    }

    /// Total size, or `None` when no unit was included anywhere.
    pub fn total(&self) -> Option<u64> {
        if self.included_unit_count() == 0 {
            return None;
        }
        Some(
            self.apps
                .iter()
                .fold(0u64, |acc, app| acc.saturating_add(app.subtotal())),
        )
    }
}

/// Sums included content-unit sizes for a title.
pub struct DepotAggregator {
    catalog: Arc<dyn CatalogClient>,
    policy: RegionWordPolicy,
}

impl DepotAggregator {
    /// Create an aggregator over a catalog with a region policy snapshot.
    pub fn new(catalog: Arc<dyn CatalogClient>, policy: RegionWordPolicy) -> Self {
        Self { catalog, policy }
    }

    /// Region policy in use.
    pub fn policy(&self) -> &RegionWordPolicy {
        &self.policy
    }

    /// Compute the install size of `root`.
    ///
    /// Returns `None` when no authoritative answer is obtainable.
    pub async fn aggregate(&self, root: AppId, settings: &SizeQuerySettings) -> Option<u64> {
        self.report(root, settings).await?.total()
    }

    /// Compute the per-app breakdown for `root`.
    ///
    /// Returns `None` if the root tree cannot be fetched or has no units.
    pub async fn report(
        &self,
        root: AppId,
        settings: &SizeQuerySettings,
    ) -> Option<AggregateReport> {
        let root_tree = match self.catalog.fetch_depot_tree(root).await {
            Ok(tree) => tree,
            Err(e) => {
                warn!(app_id = %root, error = %e, "Failed to fetch root depot tree");
                return None;
            }
        };

        if root_tree.is_empty() {
            debug!(app_id = %root, "Root depot tree has no content units");
            return None;
        }

        let mut apps = vec![AppContribution::from_tree(
            &root_tree,
            settings,
            &self.policy,
        )];
        let mut failed_extra_apps = Vec::new();

        if settings.include_dlc {
            let extras = root_tree.extra_apps();
            let fetches = extras
                .iter()
                .map(|&extra| self.catalog.fetch_depot_tree(extra));
            let results = join_all(fetches).await;

            for (&extra, result) in extras.iter().zip(results) {
                match result {
                    Ok(tree) => {
                        apps.push(AppContribution::from_tree(&tree, settings, &self.policy))
                    }
                    Err(e) => {
                        warn!(
                            app_id = %root,
                            extra_app_id = %extra,
                            error = %e,
                            "Failed to fetch extra app depot tree, counting it as zero"
                        );
                        failed_extra_apps.push(extra);
                    }
                }
            }
        }

        let report = AggregateReport {
            apps,
            failed_extra_apps,
        };

        debug!(
            app_id = %root,
            apps = report.apps.len(),
            units = report.included_unit_count(),
            total = ?report.total(),
            "Aggregated depot sizes"
        );

        Some(report)
    }
}
