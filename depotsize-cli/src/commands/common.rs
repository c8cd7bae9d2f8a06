//! Common types and utilities shared across CLI commands.

use depotsize::app::{EngineConfig, SizeEngine};
use depotsize::config::ConfigFile;
use depotsize::depot::SizeQuerySettings;
use tokio::runtime::Runtime;
use tracing::debug;

use crate::error::CliError;

/// Loaded configuration plus a runtime for async engine calls.
pub struct CliRunner {
    config: ConfigFile,
    runtime: Runtime,
}

impl CliRunner {
    /// Load the configuration file and start a runtime.
    ///
    /// Unlike the `config` commands, a malformed file is an error here so
    /// sizes are never computed from settings the user did not intend.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        let runtime = Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))?;
        Ok(Self { config, runtime })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Build an engine from the configuration.
    pub fn engine(&self) -> Result<SizeEngine, CliError> {
        self.engine_with(self.config.query_settings())
    }

    /// Build an engine with explicit inclusion toggles.
    pub fn engine_with(&self, settings: SizeQuerySettings) -> Result<SizeEngine, CliError> {
        debug!(
            include_dlc = settings.include_dlc,
            include_optional = settings.include_optional,
            "Building size engine"
        );
        let config = EngineConfig::from_config_file(&self.config).with_settings(settings);
        Ok(SizeEngine::new(config)?)
    }
}

/// Command-line toggles win only when set; otherwise the file decides.
pub fn merge_settings(config: &ConfigFile, dlc: bool, optional: bool) -> SizeQuerySettings {
    let base = config.query_settings();
    SizeQuerySettings::new(
        base.include_dlc || dlc,
        base.include_optional || optional,
    )
}

/// Log level for a `-v` count, falling back to the configured level.
pub fn log_level(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_settings() {
        let mut config = ConfigFile::default();
        assert_eq!(
            merge_settings(&config, false, false),
            SizeQuerySettings::new(false, false)
        );
        assert_eq!(
            merge_settings(&config, true, false),
            SizeQuerySettings::new(true, false)
        );

        config.size.include_optional = true;
        assert_eq!(
            merge_settings(&config, false, false),
            SizeQuerySettings::new(false, true)
        );
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0, "warn"), "warn");
        assert_eq!(log_level(1, "warn"), "debug");
        assert_eq!(log_level(4, "warn"), "trace");
    }
}
