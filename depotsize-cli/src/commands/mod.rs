//! CLI command implementations.

pub mod common;
pub mod config;
pub mod index;
pub mod resolve;
pub mod size;
