//! Content-unit filter passes.
//!
//! Three passes run in order over one app's units:
//!
//! 1. **Platform** - keep units with no platform tags or the target tag
//! 2. **Region** - drop units whose name carries a deny word
//! 3. **Optional** - drop optional units unless that would empty the app
//!
//! Each pass is a free function so it can be tested on its own.

use super::model::{ContentUnit, DepotTree, Platform};
use super::SizeQuerySettings;
use crate::region::RegionWordPolicy;

/// The only platform this engine sizes for.
pub const TARGET_PLATFORM: Platform = Platform::Windows;

/// Keep units that install on `platform`.
pub fn platform_pass<'a>(
    units: impl IntoIterator<Item = &'a ContentUnit>,
    platform: &Platform,
) -> Vec<&'a ContentUnit> {
    units
        .into_iter()
        .filter(|unit| unit.applies_to(platform))
        .collect()
}

/// Keep units the region policy accepts.
pub fn region_pass<'a>(
    units: impl IntoIterator<Item = &'a ContentUnit>,
    policy: &RegionWordPolicy,
) -> Vec<&'a ContentUnit> {
    units
        .into_iter()
        .filter(|unit| policy.keeps(unit.name()))
        .collect()
}

/// True if removing optional units would leave nothing.
///
/// An empty input is never "emptied" by the filter.
pub fn would_empty_optional_filter(units: &[&ContentUnit]) -> bool {
    !units.is_empty() && units.iter().all(|unit| unit.is_optional())
}

/// Apply the optional-unit rule.
///
/// With `include_optional` everything is kept. Otherwise optional units are
/// removed, unless every remaining unit is optional; then the flag is
/// ignored and all are kept.
pub fn optional_pass<'a>(units: Vec<&'a ContentUnit>, include_optional: bool) -> Vec<&'a ContentUnit> {
    if include_optional || would_empty_optional_filter(&units) {
        return units;
    }
    units.into_iter().filter(|unit| !unit.is_optional()).collect()
}

/// Compute the included-unit set for one app's tree.
pub fn included_units<'a>(
    tree: &'a DepotTree,
    settings: &SizeQuerySettings,
    policy: &RegionWordPolicy,
) -> Vec<&'a ContentUnit> {
    let on_platform = platform_pass(tree.units(), &TARGET_PLATFORM);
    let in_region = region_pass(on_platform, policy);
    optional_pass(in_region, settings.include_optional)
}
