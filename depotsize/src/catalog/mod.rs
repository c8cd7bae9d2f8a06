//! Catalog access for depot trees.
//!
//! The aggregation core only needs [`CatalogClient::fetch_depot_tree`].
//! This module provides:
//!
//! - [`SteamCmdCatalog`] - JSON app-info client with an in-memory tree cache
//! - [`IdleRecycledCatalog`] - wrapper that drops an idle client and lazily
//!   builds a fresh one on next use
//! - [`parse_app_info`] - mapping of the loosely-typed app-info document

mod client;
mod error;
mod parse;
mod recycle;
mod steamcmd;

pub use client::CatalogClient;
pub use error::{CatalogError, CatalogResult};
pub use parse::{parse_app_info, parse_app_node};
pub use recycle::{CatalogFactory, IdleRecycledCatalog, DEFAULT_IDLE_TIMEOUT};
pub use steamcmd::{SteamCmdCatalog, DEFAULT_APP_INFO_URL};

#[cfg(test)]
pub use client::testing::FakeCatalog;
