//! Error types for size strategies.

use std::io;

use thiserror::Error;

use crate::catalog::CatalogError;

/// Errors a strategy may raise instead of answering.
///
/// The orchestrator catches these, records a notification and moves on.
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// Catalog access failed in a way the strategy treats as an error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Local file access failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The strategy's task panicked or was cancelled.
    #[error("strategy task failed: {0}")]
    Task(String),

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}
