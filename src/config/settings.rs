//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub admission: AdmissionConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Admission state machine configuration
///
/// `allow_overwrite` controls whether an already-decided user (admitted or
/// rejected) may be re-decided: `true` gives last-write-wins semantics,
/// `false` makes a decided-to-decided transition fail.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdmissionConfig {
    pub allow_overwrite: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_file_size: String,
    pub max_files: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("HACKHUB"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::HackHubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/hackhub".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            admission: AdmissionConfig {
                allow_overwrite: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/hackhub.log".to_string(),
                max_file_size: "10MB".to_string(),
                max_files: 5,
            },
        }
    }
}
