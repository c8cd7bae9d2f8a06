//! Mapping of the app-info document to a [`DepotTree`].
//!
//! The document is loosely typed: numbers arrive as strings or integers,
//! most fields may be absent, and the `depots` object mixes depot entries
//! (numeric keys) with bookkeeping entries (`branches`, `baselanguages`).
//!
//! Expected shape, trimmed to the fields we read:
//!
//! ```text
//! { "data": { "<appid>": {
//!     "depots": {
//!       "<depotid>": {
//!         "name": "Game English",
//!         "maxsize": "1234",
//!         "optional": "1",
//!         "config": { "oslist": "windows,macos", "optionaldlc": "..." },
//!         "manifests": { "public": { "gid": "...", "size": "1200" } }
//!       },
//!       "branches": { ... }
//!     },
//!     "extended": { "listofdlc": "101,102" }
//! } } }
//! ```

use serde_json::Value;

use super::error::{CatalogError, CatalogResult};
use crate::depot::{AppId, ContentUnit, DepotTree, Platform};

/// Parse a full app-info response body for `app_id`.
pub fn parse_app_info(app_id: AppId, body: &[u8]) -> CatalogResult<DepotTree> {
    let doc: Value = serde_json::from_slice(body).map_err(|e| CatalogError::Parse {
        app_id,
        reason: e.to_string(),
    })?;

    let app = doc
        .get("data")
        .and_then(|data| data.get(app_id.to_string()))
        .filter(|node| node.is_object())
        .ok_or(CatalogError::AppNotFound(app_id))?;

    Ok(parse_app_node(app_id, app))
}

/// Build a depot tree from the per-app node of the document.
pub fn parse_app_node(app_id: AppId, app: &Value) -> DepotTree {
    let units = app
        .get("depots")
        .and_then(Value::as_object)
        .map(|depots| {
            depots
                .iter()
                .filter_map(|(key, node)| {
                    let id = key.parse::<u32>().ok()?;
                    node.is_object().then(|| parse_depot(id, node))
                })
                .collect()
        })
        .unwrap_or_default();

    let extra_apps = app
        .pointer("/extended/listofdlc")
        .and_then(Value::as_str)
        .map(parse_id_list)
        .unwrap_or_default();

    DepotTree::new(app_id, units, extra_apps)
}

fn parse_depot(id: u32, node: &Value) -> ContentUnit {
    let name = node
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Depot {}", id));

    let optional = node.get("optional").is_some_and(is_truthy)
        || node.pointer("/config/optionaldlc").is_some();

    let mut unit = ContentUnit::new(id, name).with_optional(optional);

    if let Some(size) = node.get("maxsize").and_then(as_u64) {
        unit = unit.with_max_size(size);
    }

    // Legacy documents store the public manifest as a bare gid string.
    if let Some(size) = node.pointer("/manifests/public/size").and_then(as_u64) {
        unit = unit.with_manifest_size(size);
    }

    if let Some(oslist) = node.pointer("/config/oslist").and_then(Value::as_str) {
        for tag in oslist.split(',').filter(|t| !t.trim().is_empty()) {
            unit = unit.with_platform(Platform::parse(tag));
        }
    }

    unit
}

fn parse_id_list(list: &str) -> Vec<AppId> {
    list.split(',')
        .filter_map(|id| id.parse::<AppId>().ok())
        .collect()
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64().is_some_and(|n| n != 0),
        Value::String(s) => matches!(s.trim(), "1" | "true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCH_DOGS: &str = r#"{
        "data": {
            "243470": {
                "depots": {
                    "243471": {
                        "name": "Watch_Dogs Common",
                        "maxsize": "14000000000",
                        "config": { "oslist": "windows" },
                        "manifests": { "public": { "gid": "1", "size": "13900000000" } }
                    },
                    "243472": {
                        "name": "Watch_Dogs English",
                        "manifests": { "public": { "gid": "2", "size": 900000000 } }
                    },
                    "243473": {
                        "name": "Watch_Dogs Russian",
                        "maxsize": 800000000
                    },
                    "243474": {
                        "name": "Watch_Dogs HD Textures",
                        "maxsize": "2000",
                        "optional": "1"
                    },
                    "243475": {
                        "manifests": { "public": "4521985" }
                    },
                    "branches": { "public": { "buildid": "1" } },
                    "baselanguages": "english"
                },
                "extended": { "listofdlc": "293050, 293051,,x" }
            }
        },
        "status": "success"
    }"#;

    fn unit(tree: &DepotTree, id: u32) -> &ContentUnit {
        tree.units().iter().find(|u| u.id() == id).unwrap()
    }

    #[test]
    fn test_parse_skips_non_depot_keys() {
        let tree = parse_app_info(AppId(243470), WATCH_DOGS.as_bytes()).unwrap();
        assert_eq!(tree.app_id(), AppId(243470));
        assert_eq!(tree.units().len(), 5);
    }

    #[test]
    fn test_parse_sizes_from_strings_and_numbers() {
        let tree = parse_app_info(AppId(243470), WATCH_DOGS.as_bytes()).unwrap();

        let common = unit(&tree, 243471);
        assert_eq!(common.max_size(), Some(14_000_000_000));
        assert_eq!(common.manifest_size(), Some(13_900_000_000));

        let english = unit(&tree, 243472);
        assert_eq!(english.max_size(), None);
        assert_eq!(english.manifest_size(), Some(900_000_000));
        assert_eq!(english.resolved_size(), 900_000_000);

        assert_eq!(unit(&tree, 243473).max_size(), Some(800_000_000));
    }

    #[test]
    fn test_parse_legacy_manifest_and_missing_name() {
        let tree = parse_app_info(AppId(243470), WATCH_DOGS.as_bytes()).unwrap();
        let bare = unit(&tree, 243475);
        assert_eq!(bare.name(), "Depot 243475");
        assert_eq!(bare.manifest_size(), None);
        assert_eq!(bare.resolved_size(), 0);
    }

    #[test]
    fn test_parse_platforms_and_optional() {
        let tree = parse_app_info(AppId(243470), WATCH_DOGS.as_bytes()).unwrap();
        assert_eq!(unit(&tree, 243471).platforms(), &[Platform::Windows]);
        assert!(unit(&tree, 243472).platforms().is_empty());
        assert!(unit(&tree, 243474).is_optional());
        assert!(!unit(&tree, 243471).is_optional());
    }

    #[test]
    fn test_parse_dlc_list() {
        let tree = parse_app_info(AppId(243470), WATCH_DOGS.as_bytes()).unwrap();
        assert_eq!(tree.extra_apps(), &[AppId(293050), AppId(293051)]);
    }

    #[test]
    fn test_parse_optionaldlc_config_marks_optional() {
        let node: Value = serde_json::json!({
            "depots": { "5": { "name": "Extra", "config": { "optionaldlc": "6" } } }
        });
        let tree = parse_app_node(AppId(4), &node);
        assert!(tree.units()[0].is_optional());
    }

    #[test]
    fn test_parse_missing_app_is_not_found() {
        let result = parse_app_info(AppId(1), WATCH_DOGS.as_bytes());
        assert_eq!(result, Err(CatalogError::AppNotFound(AppId(1))));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_app_info(AppId(1), b"not json");
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_parse_app_without_depots_is_empty() {
        let node: Value = serde_json::json!({ "common": { "name": "Tool" } });
        let tree = parse_app_node(AppId(7), &node);
        assert!(tree.is_empty());
        assert!(tree.extra_apps().is_empty());
    }
}
