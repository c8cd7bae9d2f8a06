//! CLI error type.

use std::fmt;

use depotsize::app::AppError;
use depotsize::config::ConfigError;
use depotsize::logging::LoggingError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded, parsed or saved.
    Config(String),
    /// The size engine could not be built or used.
    Engine(String),
    /// Failed to create the Tokio runtime.
    Runtime(String),
    /// Logging could not be initialized.
    Logging(String),
    /// App-list maintenance failed.
    Index(String),
    /// A lookup found nothing.
    NotFound(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Runtime(msg) => write!(f, "Failed to create Tokio runtime: {}", msg),
            CliError::Logging(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Index(msg) => write!(f, "App list error: {}", msg),
            CliError::NotFound(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Index(e) => CliError::Index(e.to_string()),
            other @ AppError::HttpClient(_) => CliError::Engine(other.to_string()),
        }
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = ConfigError::UnknownKey("size.nope".to_string()).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("size.nope"));
    }

    #[test]
    fn test_not_found_display_is_bare() {
        let err = CliError::NotFound("No app id for 'X'".to_string());
        assert_eq!(err.to_string(), "No app id for 'X'");
    }
}
