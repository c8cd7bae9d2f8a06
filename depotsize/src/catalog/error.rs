//! Error types for catalog access.

use thiserror::Error;

use crate::depot::AppId;
use crate::http::HttpError;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while fetching a depot tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Transport failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The document was not valid or not shaped as expected.
    #[error("failed to parse catalog document for app {app_id}: {reason}")]
    Parse { app_id: AppId, reason: String },

    /// The catalog has no entry for this app.
    #[error("app {0} not found in catalog")]
    AppNotFound(AppId),

    /// No client could be created.
    #[error("catalog client unavailable: {0}")]
    Unavailable(String),
}
