//! Addressable configuration keys.
//!
//! Every setting is reachable as `section.key` so the CLI can get and set
//! values without knowing the file layout.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::{ConfigError, ConfigResult};
use super::file::ConfigFile;
use crate::region::normalize_word;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    SizeIncludeDlc,
    SizeIncludeOptional,
    RegionAllow,
    RegionDeny,
    CatalogAppInfoUrl,
    CatalogAppListUrl,
    CatalogAppListTtlHours,
    CatalogClientIdleSecs,
    CatalogRequestTimeoutSecs,
    CatalogCacheDirectory,
    CalculatorTimeoutSecs,
    LoggingDirectory,
    LoggingLevel,
}

impl ConfigKey {
    /// All keys, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::SizeIncludeDlc,
            ConfigKey::SizeIncludeOptional,
            ConfigKey::RegionAllow,
            ConfigKey::RegionDeny,
            ConfigKey::CatalogAppInfoUrl,
            ConfigKey::CatalogAppListUrl,
            ConfigKey::CatalogAppListTtlHours,
            ConfigKey::CatalogClientIdleSecs,
            ConfigKey::CatalogRequestTimeoutSecs,
            ConfigKey::CatalogCacheDirectory,
            ConfigKey::CalculatorTimeoutSecs,
            ConfigKey::LoggingDirectory,
            ConfigKey::LoggingLevel,
        ]
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::SizeIncludeDlc | ConfigKey::SizeIncludeOptional => "size",
            ConfigKey::RegionAllow | ConfigKey::RegionDeny => "region",
            ConfigKey::CatalogAppInfoUrl
            | ConfigKey::CatalogAppListUrl
            | ConfigKey::CatalogAppListTtlHours
            | ConfigKey::CatalogClientIdleSecs
            | ConfigKey::CatalogRequestTimeoutSecs
            | ConfigKey::CatalogCacheDirectory => "catalog",
            ConfigKey::CalculatorTimeoutSecs => "calculator",
            ConfigKey::LoggingDirectory | ConfigKey::LoggingLevel => "logging",
        }
    }

    /// Comma-separated word list, where empty is a meaningful value.
    pub fn is_word_list(&self) -> bool {
        matches!(self, ConfigKey::RegionAllow | ConfigKey::RegionDeny)
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::SizeIncludeDlc => "include_dlc",
            ConfigKey::SizeIncludeOptional => "include_optional",
            ConfigKey::RegionAllow => "allow",
            ConfigKey::RegionDeny => "deny",
            ConfigKey::CatalogAppInfoUrl => "app_info_url",
            ConfigKey::CatalogAppListUrl => "app_list_url",
            ConfigKey::CatalogAppListTtlHours => "app_list_ttl_hours",
            ConfigKey::CatalogClientIdleSecs => "client_idle_secs",
            ConfigKey::CatalogRequestTimeoutSecs => "request_timeout_secs",
            ConfigKey::CatalogCacheDirectory => "cache_directory",
            ConfigKey::CalculatorTimeoutSecs => "timeout_secs",
            ConfigKey::LoggingDirectory => "directory",
            ConfigKey::LoggingLevel => "level",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::SizeIncludeDlc => config.size.include_dlc.to_string(),
            ConfigKey::SizeIncludeOptional => config.size.include_optional.to_string(),
            ConfigKey::RegionAllow => config.region.allow.join(", "),
            ConfigKey::RegionDeny => config.region.deny.join(", "),
            ConfigKey::CatalogAppInfoUrl => config.catalog.app_info_url.clone(),
            ConfigKey::CatalogAppListUrl => config.catalog.app_list_url.clone(),
            ConfigKey::CatalogAppListTtlHours => config.catalog.app_list_ttl_hours.to_string(),
            ConfigKey::CatalogClientIdleSecs => config.catalog.client_idle_secs.to_string(),
            ConfigKey::CatalogRequestTimeoutSecs => {
                config.catalog.request_timeout_secs.to_string()
            }
            ConfigKey::CatalogCacheDirectory => {
                config.catalog.cache_directory.display().to_string()
            }
            ConfigKey::CalculatorTimeoutSecs => config.calculator.timeout_secs.to_string(),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
        }
    }

    /// Validate `value` and store it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> ConfigResult<()> {
        let value = value.trim();
        match self {
            ConfigKey::SizeIncludeDlc => config.size.include_dlc = self.parse_bool(value)?,
            ConfigKey::SizeIncludeOptional => {
                config.size.include_optional = self.parse_bool(value)?
            }
            ConfigKey::RegionAllow => config.region.allow = parse_words(value),
            ConfigKey::RegionDeny => config.region.deny = parse_words(value),
            ConfigKey::CatalogAppInfoUrl => config.catalog.app_info_url = self.parse_url(value)?,
            ConfigKey::CatalogAppListUrl => config.catalog.app_list_url = self.parse_url(value)?,
            ConfigKey::CatalogAppListTtlHours => {
                config.catalog.app_list_ttl_hours = self.parse_positive(value)?
            }
            ConfigKey::CatalogClientIdleSecs => {
                config.catalog.client_idle_secs = self.parse_positive(value)?
            }
            ConfigKey::CatalogRequestTimeoutSecs => {
                config.catalog.request_timeout_secs = self.parse_positive(value)?
            }
            ConfigKey::CatalogCacheDirectory => {
                if value.is_empty() {
                    return Err(self.invalid(value, "directory must not be empty"));
                }
                config.catalog.cache_directory = PathBuf::from(value);
            }
            ConfigKey::CalculatorTimeoutSecs => {
                config.calculator.timeout_secs = self.parse_positive(value)?
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(value, "expected trace, debug, info, warn or error"));
                }
                config.logging.level = level;
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn parse_bool(&self, value: &str) -> ConfigResult<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(self.invalid(value, "expected true or false")),
        }
    }

    fn parse_positive(&self, value: &str) -> ConfigResult<u64> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(self.invalid(value, "expected a positive whole number")),
        }
    }

    fn parse_url(&self, value: &str) -> ConfigResult<String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(value.to_string())
        } else {
            Err(self.invalid(value, "expected an http:// or https:// URL"))
        }
    }
}

fn parse_words(value: &str) -> Vec<String> {
    value.split(',').filter_map(normalize_word).collect()
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_names() {
        assert_eq!(
            "size.include_dlc".parse::<ConfigKey>().unwrap(),
            ConfigKey::SizeIncludeDlc
        );
        assert_eq!(
            " Calculator.Timeout_Secs ".parse::<ConfigKey>().unwrap(),
            ConfigKey::CalculatorTimeoutSecs
        );
        assert!(matches!(
            "size.bogus".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_every_key_round_trips_its_name() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
            assert_eq!(key.to_string(), key.name());
        }
    }

    #[test]
    fn test_set_bool_variants() {
        let mut config = ConfigFile::default();
        ConfigKey::SizeIncludeDlc.set(&mut config, "yes").unwrap();
        assert!(config.size.include_dlc);
        ConfigKey::SizeIncludeDlc.set(&mut config, "OFF").unwrap();
        assert!(!config.size.include_dlc);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = ConfigFile::default();

        for (key, value) in [
            (ConfigKey::SizeIncludeOptional, "maybe"),
            (ConfigKey::CalculatorTimeoutSecs, "0"),
            (ConfigKey::CatalogClientIdleSecs, "-5"),
            (ConfigKey::CatalogAppInfoUrl, "ftp://example.com"),
            (ConfigKey::LoggingLevel, "loud"),
            (ConfigKey::CatalogCacheDirectory, "  "),
        ] {
            let err = key.set(&mut config, value).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { .. }),
                "{} accepted {:?}",
                key,
                value
            );
        }
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_region_words_are_normalized() {
        let mut config = ConfigFile::default();
        ConfigKey::RegionDeny
            .set(&mut config, " RU, ,Polish ")
            .unwrap();

        assert_eq!(config.region.deny, vec!["ru", "polish"]);
        assert_eq!(ConfigKey::RegionDeny.get(&config), "ru, polish");
    }

    #[test]
    fn test_logging_directory_can_be_cleared() {
        let mut config = ConfigFile::default();
        ConfigKey::LoggingDirectory
            .set(&mut config, "/var/log/depotsize")
            .unwrap();
        assert_eq!(ConfigKey::LoggingDirectory.get(&config), "/var/log/depotsize");

        ConfigKey::LoggingDirectory.set(&mut config, "").unwrap();
        assert!(config.logging.directory.is_none());
        assert_eq!(ConfigKey::LoggingDirectory.get(&config), "");
    }
}
