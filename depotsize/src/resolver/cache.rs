//! Disk cache for the downloaded app list.
//!
//! The full catalog app list is large and changes slowly, so it is stored
//! on disk with its download time and reused until the TTL expires. A
//! stale copy is still served when a refresh fails.

use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::index::AppListEntry;

/// Cached app list with its download time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppListCache {
    /// Crate version that wrote the cache.
    pub version: String,

    /// When the list was downloaded (secs since UNIX_EPOCH).
    pub fetched_at_secs: u64,

    /// The app list rows.
    pub entries: Vec<AppListEntry>,
}

/// Current time in seconds since UNIX_EPOCH.
pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl AppListCache {
    /// Create a cache entry stamped with the current time.
    pub fn new(entries: Vec<AppListEntry>) -> Self {
        Self::with_fetched_at(entries, now_secs())
    }

    /// Create a cache entry with an explicit download time.
    pub fn with_fetched_at(entries: Vec<AppListEntry>, fetched_at_secs: u64) -> Self {
        Self {
            version: crate::VERSION.to_string(),
            fetched_at_secs,
            entries,
        }
    }

    /// Load cache from file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);

        bincode::deserialize_from(reader).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to deserialize app list cache: {}", e),
            )
        })
    }

    /// Save cache to file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        let file = std::fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        bincode::serialize_into(writer, self)
            .map_err(|e| io::Error::other(format!("Failed to serialize app list cache: {}", e)))?;

        std::fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get cache age in seconds.
    pub fn age_secs(&self) -> u64 {
        now_secs().saturating_sub(self.fetched_at_secs)
    }

    /// True while the cache is younger than `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age_secs() < ttl.as_secs()
    }

    /// Get human-readable cache age.
    pub fn age_human(&self) -> String {
        let secs = self.age_secs();

        if secs < 60 {
            format!("{}s ago", secs)
        } else if secs < 3600 {
            format!("{}m ago", secs / 60)
        } else if secs < 86400 {
            format!("{}h ago", secs / 3600)
        } else {
            format!("{}d ago", secs / 86400)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries() -> Vec<AppListEntry> {
        vec![
            AppListEntry::new(10, "Counter-Strike"),
            AppListEntry::new(243470, "Watch_Dogs"),
        ]
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("app_list.bin");

        let cache = AppListCache::new(entries());
        cache.save(&path).unwrap();

        let loaded = AppListCache::load(&path).unwrap();
        assert_eq!(loaded.entries, entries());
        assert_eq!(loaded.version, crate::VERSION);
        assert_eq!(loaded.fetched_at_secs, cache.fetched_at_secs);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(AppListCache::load(&temp.path().join("missing.bin")).is_err());
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app_list.bin");
        std::fs::write(&path, b"\x01").unwrap();

        let err = AppListCache::load(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_freshness() {
        let fresh = AppListCache::new(entries());
        assert!(fresh.is_fresh(Duration::from_secs(18 * 3600)));
        assert!(!fresh.is_fresh(Duration::ZERO));

        let stale = AppListCache::with_fetched_at(entries(), now_secs() - 19 * 3600);
        assert!(!stale.is_fresh(Duration::from_secs(18 * 3600)));
        assert_eq!(stale.age_human(), "19h ago");
    }

    #[test]
    fn test_age_human_ranges() {
        let now = now_secs();
        assert!(AppListCache::with_fetched_at(vec![], now).age_human().ends_with("s ago"));
        assert_eq!(
            AppListCache::with_fetched_at(vec![], now - 120).age_human(),
            "2m ago"
        );
        assert_eq!(
            AppListCache::with_fetched_at(vec![], now - 3 * 86400).age_human(),
            "3d ago"
        );
    }
}
