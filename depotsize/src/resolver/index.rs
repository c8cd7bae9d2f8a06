//! Name to app-id index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::depot::AppId;

/// One row of the catalog's app list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppListEntry {
    pub app_id: AppId,
    pub name: String,
}

impl AppListEntry {
    pub fn new(app_id: u32, name: impl Into<String>) -> Self {
        Self {
            app_id: AppId(app_id),
            name: name.into(),
        }
    }
}

/// Normalize a title for lookup: lowercase, whitespace runs collapsed, trimmed.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Exact-match index over normalized titles.
///
/// When several apps share a normalized title the lowest app id wins; the
/// catalog assigns base games their ids before soundtracks, tools and DLC
/// that reuse the name.
#[derive(Debug, Clone, Default)]
pub struct AppIdIndex {
    by_name: HashMap<String, AppId>,
}

impl AppIdIndex {
    /// Build an index from app-list rows.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a AppListEntry>) -> Self {
        let mut by_name: HashMap<String, AppId> = HashMap::new();
        for entry in entries {
            let key = normalize_name(&entry.name);
            if key.is_empty() {
                continue;
            }
            by_name
                .entry(key)
                .and_modify(|id| *id = (*id).min(entry.app_id))
                .or_insert(entry.app_id);
        }
        Self { by_name }
    }

    /// Look up a title.
    pub fn resolve(&self, name: &str) -> Option<AppId> {
        self.by_name.get(&normalize_name(name)).copied()
    }

    /// Number of distinct titles.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// True if the index has no titles.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Watch_Dogs   2 "), "watch_dogs 2");
        assert_eq!(normalize_name("HALF-LIFE\t2"), "half-life 2");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_resolve_exact_after_normalization() {
        let entries = vec![
            AppListEntry::new(243470, "Watch_Dogs"),
            AppListEntry::new(220, "Half-Life 2"),
        ];
        let index = AppIdIndex::from_entries(&entries);

        assert_eq!(index.resolve("watch_dogs"), Some(AppId(243470)));
        assert_eq!(index.resolve("  half-life   2"), Some(AppId(220)));
        assert_eq!(index.resolve("Half-Life"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_duplicate_titles_keep_lowest_id() {
        let entries = vec![
            AppListEntry::new(900, "Portal"),
            AppListEntry::new(400, "Portal"),
            AppListEntry::new(1000, "portal"),
        ];
        let index = AppIdIndex::from_entries(&entries);
        assert_eq!(index.resolve("Portal"), Some(AppId(400)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let entries = vec![AppListEntry::new(1, " ")];
        assert!(AppIdIndex::from_entries(&entries).is_empty());
    }
}
