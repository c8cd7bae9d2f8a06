//! Engine bootstrap.
//!
//! [`SizeEngine`] wires every component of the size pipeline in one place
//! so front ends only deal with a configuration and a game record.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         SizeEngine                            │
//! │                                                               │
//! │  ReqwestClient ──► WebAppListSource ──► AppIdResolver         │
//! │       │                                      │                │
//! │       └──► SteamCmdCatalog (factory)         │                │
//! │               └── IdleRecycledCatalog ──► DepotAggregator     │
//! │                                              │                │
//! │  SteamSizeCalculator ◄───────────────────────┘                │
//! │  DiscImageCalculator                                          │
//! │       └──► SizeProviderOrchestrator ──► NotificationBoard     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use depotsize::app::SizeEngine;
//! use depotsize::config::ConfigFile;
//! use depotsize::game::Game;
//!
//! let engine = SizeEngine::from_config(&ConfigFile::load()?)?;
//! let game = Game::new("1", "Portal 2").with_platform("PC").with_installed(true);
//! let size = engine.get_size(&game).await;
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::SizeEngine;
pub use config::EngineConfig;
pub use error::AppError;
