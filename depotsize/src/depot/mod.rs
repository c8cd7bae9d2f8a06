//! Depot tree model, filtering and aggregation.
//!
//! A [`DepotTree`] is the read-only view of one catalog title's content
//! units. [`filter`] decides which units count for a given query and
//! [`DepotAggregator`] sums them across the title and its owned extra apps.
//!
//! ```text
//! DepotTree (root) ──┬── platform pass ─► region pass ─► optional pass ─► Σ size
//!                    └── extra apps (IncludeDlc) ─► DepotTree ─► ... ─► Σ size
//! ```

mod aggregate;
pub mod filter;
mod model;

pub use aggregate::{AggregateReport, AppContribution, DepotAggregator, IncludedUnit};
pub use model::{AppId, ContentUnit, DepotTree, Platform};

/// Per-call inclusion settings.
///
/// An immutable snapshot of the user's configuration, taken once per
/// calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeQuerySettings {
    /// Count owned downloadable content apps.
    pub include_dlc: bool,
    /// Count units flagged optional.
    pub include_optional: bool,
}

impl SizeQuerySettings {
    /// Create settings with both toggles given explicitly.
    pub fn new(include_dlc: bool, include_optional: bool) -> Self {
        Self {
            include_dlc,
            include_optional,
        }
    }

    /// Settings that count everything the catalog lists.
    pub fn everything() -> Self {
        Self::new(true, true)
    }
}
