//! Error types for app-id resolution.

use std::io;

use thiserror::Error;

use crate::http::HttpError;

/// Result type for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Errors that can occur while loading or refreshing the app list.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The app list could not be downloaded.
    #[error("failed to download app list: {0}")]
    Download(#[from] HttpError),

    /// The downloaded app list was malformed.
    #[error("failed to parse app list: {0}")]
    Parse(String),

    /// Reading or writing the disk cache failed.
    #[error("app list cache I/O error: {0}")]
    Io(#[from] io::Error),

    /// A blocking cache task was cancelled or panicked.
    #[error("app list cache task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResolverError::Parse("missing applist".to_string());
        assert_eq!(err.to_string(), "failed to parse app list: missing applist");

        let err: ResolverError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().contains("gone"));
    }
}
