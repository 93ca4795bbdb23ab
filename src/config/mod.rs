//! Configuration module
//!
//! This module handles application configuration loading and validation

pub mod settings;
pub mod validation;

// Re-export commonly used types
pub use settings::{Settings, DatabaseConfig, AdmissionConfig, LoggingConfig};
