//! depotsize - install-size aggregation for game libraries
//!
//! This library determines how much disk space a game will occupy by reading
//! the catalog's depot manifest for the title, filtering content units by
//! platform, region and optionality, and summing what remains. Several size
//! strategies can be chained behind a timeout-bounded orchestrator.
//!
//! # Architecture
//!
//! ```text
//! caller ─► SizeProviderOrchestrator
//!               │  (ordered, preferred-first, 7s per attempt)
//!               ├── SteamSizeCalculator
//!               │       ├── AppIdResolver ─► AppListSource + disk cache
//!               │       └── DepotAggregator ─► CatalogClient ─► DepotTree
//!               │                   └── filter (platform, region, optional)
//!               └── DiscImageCalculator
//! ```

pub mod app;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod depot;
pub mod game;
pub mod http;
pub mod logging;
pub mod orchestrator;
pub mod region;
pub mod resolver;

/// Crate version, recorded in on-disk caches.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
