//! The configuration file and its sections.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;

use super::error::{ConfigError, ConfigResult};
use super::keys::ConfigKey;
use crate::catalog::{DEFAULT_APP_INFO_URL, DEFAULT_IDLE_TIMEOUT};
use crate::depot::SizeQuerySettings;
use crate::http::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::orchestrator::DEFAULT_STRATEGY_TIMEOUT;
use crate::region::{RegionWordPolicy, DEFAULT_ALLOW_WORDS, DEFAULT_DENY_WORDS};
use crate::resolver::{DEFAULT_APP_LIST_URL, DEFAULT_INDEX_TTL};

const APP_LIST_CACHE_FILE: &str = "app_list.bin";

/// Directory holding the configuration file.
pub fn config_directory() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("depotsize")
}

/// Default location of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

fn default_cache_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("depotsize")
}

/// `[size]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SizeSettings {
    pub include_dlc: bool,
    pub include_optional: bool,
}

/// `[region]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSettings {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
}

impl Default for RegionSettings {
    fn default() -> Self {
        Self {
            allow: DEFAULT_ALLOW_WORDS.iter().map(|w| w.to_string()).collect(),
            deny: DEFAULT_DENY_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub app_info_url: String,
    pub app_list_url: String,
    pub app_list_ttl_hours: u64,
    pub client_idle_secs: u64,
    pub request_timeout_secs: u64,
    pub cache_directory: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            app_info_url: DEFAULT_APP_INFO_URL.to_string(),
            app_list_url: DEFAULT_APP_LIST_URL.to_string(),
            app_list_ttl_hours: DEFAULT_INDEX_TTL.as_secs() / 3600,
            client_idle_secs: DEFAULT_IDLE_TIMEOUT.as_secs(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cache_directory: default_cache_directory(),
        }
    }
}

/// `[calculator]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorSettings {
    pub timeout_secs: u64,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_STRATEGY_TIMEOUT.as_secs(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Directory for daily log files; stderr only when unset.
    pub directory: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            level: "info".to_string(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFile {
    pub size: SizeSettings,
    pub region: RegionSettings,
    pub catalog: CatalogSettings,
    pub calculator: CalculatorSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default location, or defaults if the file is absent.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, or defaults if the file is absent.
    ///
    /// Every present key is validated; unknown keys are ignored.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::default();
        if !path.exists() {
            return Ok(config);
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories.
    ///
    /// Written to a sibling temp file and renamed into place.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            // An empty word list overrides the defaults, so it must be written.
            if !value.is_empty() || key.is_word_list() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }

        let temp = path.with_extension("ini.tmp");
        ini.write_to_file(&temp).map_err(write_err)?;
        fs::rename(&temp, path).map_err(write_err)
    }

    /// Inclusion toggles for the depot aggregator.
    pub fn query_settings(&self) -> SizeQuerySettings {
        SizeQuerySettings::new(self.size.include_dlc, self.size.include_optional)
    }

    /// Region word policy built from the `[region]` lists.
    pub fn region_policy(&self) -> RegionWordPolicy {
        RegionWordPolicy::new(&self.region.allow, &self.region.deny)
    }

    pub fn app_list_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog.app_list_ttl_hours.saturating_mul(3600))
    }

    pub fn client_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.client_idle_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.request_timeout_secs)
    }

    pub fn strategy_timeout(&self) -> Duration {
        Duration::from_secs(self.calculator.timeout_secs)
    }

    /// Disk location of the cached app list.
    pub fn app_list_cache_path(&self) -> PathBuf {
        self.catalog.cache_directory.join(APP_LIST_CACHE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();

        assert!(!config.size.include_dlc);
        assert!(!config.size.include_optional);
        assert_eq!(config.catalog.app_list_ttl_hours, 18);
        assert_eq!(config.catalog.client_idle_secs, 60);
        assert_eq!(config.calculator.timeout_secs, 7);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
        assert_eq!(config.region_policy(), RegionWordPolicy::default());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("none.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[size]\ninclude_dlc = true\n\n[calculator]\ntimeout_secs = 3\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();

        assert!(config.size.include_dlc);
        assert!(!config.size.include_optional);
        assert_eq!(config.strategy_timeout(), Duration::from_secs(3));
        assert_eq!(config.catalog.app_info_url, DEFAULT_APP_INFO_URL);
    }

    #[test]
    fn test_invalid_value_is_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[size]\ninclude_dlc = sometimes\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.size.include_optional = true;
        config.region.allow = vec!["en".to_string(), "us".to_string()];
        config.region.deny = vec!["ru".to_string()];
        config.logging.directory = Some(dir.path().join("logs"));
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("ini.tmp").exists());

        let policy = loaded.region_policy();
        assert!(policy.keeps("English US"));
        assert!(!policy.keeps("Voices RU"));
        assert!(policy.keeps("Russian"));
        assert!(policy.keeps("Japanese"));
    }

    #[test]
    fn test_snapshots() {
        let mut config = ConfigFile::default();
        config.size.include_dlc = true;

        assert_eq!(config.query_settings(), SizeQuerySettings::new(true, false));
        assert_eq!(config.app_list_ttl(), DEFAULT_INDEX_TTL);
        assert_eq!(config.client_idle_timeout(), DEFAULT_IDLE_TIMEOUT);
        assert_eq!(
            config.app_list_cache_path(),
            config.catalog.cache_directory.join("app_list.bin")
        );
    }

    #[test]
    fn test_cleared_word_list_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        let mut config = ConfigFile::default();
        ConfigKey::RegionDeny.set(&mut config, "").unwrap();
        assert!(config.region.deny.is_empty());
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert!(loaded.region.deny.is_empty());
        assert_eq!(loaded.region.allow, config.region.allow);
        assert!(loaded.region_policy().keeps("Voices RU"));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let mut config = ConfigFile::default();
        ConfigKey::CatalogAppListTtlHours
            .set(&mut config, "18446744073709551615")
            .unwrap();

        assert_eq!(config.app_list_ttl(), Duration::from_secs(u64::MAX));
    }
}
