//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use tracing_subscriber::EnvFilter;

use crate::utils::errors::{CampusError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate HTTP server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(CampusError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(CampusError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(CampusError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(CampusError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(CampusError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_secs == 0 {
        return Err(CampusError::Config(
            "Acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.trim().is_empty() {
        return Err(CampusError::Config(
            "Log level is required".to_string()
        ));
    }

    // Same parser init_logging uses, so full filter directives are accepted
    if let Err(e) = EnvFilter::try_new(&config.level) {
        return Err(CampusError::Config(
            format!("Invalid log level: {} ({})", config.level, e)
        ));
    }

    if let Some(directory) = &config.directory {
        if directory.trim().is_empty() {
            return Err(CampusError::Config(
                "Log directory cannot be blank".to_string()
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_rejects_zero_port() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert_matches!(validate_settings(&settings), Err(CampusError::Config(_)));
    }

    #[test]
    fn test_rejects_inverted_connection_bounds() {
        let mut settings = Settings::default();
        settings.database.min_connections = 20;
        settings.database.max_connections = 5;
        assert_matches!(validate_settings(&settings), Err(CampusError::Config(msg)) if msg.contains("Min connections"));
    }

    #[test]
    fn test_rejects_zero_acquire_timeout() {
        let mut settings = Settings::default();
        settings.database.acquire_timeout_secs = 0;
        assert_matches!(validate_settings(&settings), Err(CampusError::Config(msg)) if msg.contains("Acquire timeout"));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "campus_events=loud".to_string();
        assert_matches!(validate_settings(&settings), Err(CampusError::Config(msg)) if msg.contains("loud"));

        settings.logging.level = "  ".to_string();
        assert_matches!(validate_settings(&settings), Err(CampusError::Config(_)));
    }

    #[test]
    fn test_accepts_filter_directives() {
        let mut settings = Settings::default();
        for level in ["debug", "INFO", "campus_events=debug,tower_http=info", "warn,sqlx=error"] {
            settings.logging.level = level.to_string();
            assert!(validate_settings(&settings).is_ok(), "{} should be accepted", level);
        }
    }

    #[test]
    fn test_memory_url_is_accepted() {
        let mut settings = Settings::default();
        settings.database.url = "memory://".to_string();
        assert!(validate_settings(&settings).is_ok());
    }
}
