//! Application error types.

use std::fmt;

use crate::http::HttpError;
use crate::resolver::ResolverError;

/// Errors that can occur while building or driving the engine.
#[derive(Debug)]
pub enum AppError {
    /// Failed to build the HTTP client.
    HttpClient(HttpError),

    /// App-list maintenance failed.
    Index(ResolverError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            AppError::Index(e) => write!(f, "App list error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::HttpClient(e) => Some(e),
            AppError::Index(e) => Some(e),
        }
    }
}

impl From<HttpError> for AppError {
    fn from(e: HttpError) -> Self {
        AppError::HttpClient(e)
    }
}

impl From<ResolverError> for AppError {
    fn from(e: ResolverError) -> Self {
        AppError::Index(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err: AppError = ResolverError::Task("join failed".to_string()).into();
        assert!(err.to_string().starts_with("App list error"));
        assert!(err.to_string().contains("join failed"));
    }

    #[test]
    fn test_app_error_from_http_error() {
        let app_err: AppError = HttpError::Client("no tls".to_string()).into();
        assert!(matches!(app_err, AppError::HttpClient(_)));
        assert!(std::error::Error::source(&app_err).is_some());
    }
}
