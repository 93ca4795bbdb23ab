//! HackHub backend core
//!
//! The participant-facing core of a hackathon management system: user
//! admission, team membership, project submissions, prize entries, and
//! timed check-in activities. This library owns the authorization and
//! resource-ownership rules; the surrounding transport layer consumes
//! the services exposed here and maps their typed outcomes onto
//! protocol responses.

#![allow(non_snake_case)]

pub mod config;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{HackHubError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
