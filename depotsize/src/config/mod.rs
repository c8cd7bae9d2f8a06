//! Configuration file support.
//!
//! Settings live in an INI file at `~/.config/depotsize/config.ini` (or the
//! platform equivalent). Missing keys take their defaults, so an absent or
//! partial file is always valid.
//!
//! ```ini
//! [size]
//! include_dlc = false
//! include_optional = false
//!
//! [region]
//! allow = en, english, eu, europe, row, ww
//! deny = ru, russian, cn, ...
//!
//! [catalog]
//! app_info_url = https://api.steamcmd.net/v1/info/
//! app_list_ttl_hours = 18
//! client_idle_secs = 60
//!
//! [calculator]
//! timeout_secs = 7
//! ```

mod error;
mod file;
mod keys;
mod size;

pub use error::{ConfigError, ConfigResult};
pub use file::{
    config_directory, config_file_path, CalculatorSettings, CatalogSettings, ConfigFile,
    LoggingSettings, RegionSettings, SizeSettings,
};
pub use keys::ConfigKey;
pub use size::format_size;
