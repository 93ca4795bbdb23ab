//! Error handling for HackHub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy. Domain failures
//! (authorization denials, invariant violations, check-in denials) are
//! distinct variants so the transport layer can map them onto protocol
//! responses without inspecting internal state.

use thiserror::Error;

/// Main error type for the HackHub core
#[derive(Error, Debug)]
pub enum HackHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: i64 },

    #[error("Project not found: {project_id}")]
    ProjectNotFound { project_id: i64 },

    #[error("Team {team_id} has no project for event {event_id}")]
    NoProjectForTeam { team_id: i64, event_id: i64 },

    #[error("Prize not found: {prize_id}")]
    PrizeNotFound { prize_id: i64 },

    #[error("Check-in item not found: {item_id}")]
    CheckInItemNotFound { item_id: i64 },

    #[error("Caller's team does not own the target resource")]
    NotOwner,

    #[error("User {user_id} does not belong to a team")]
    NoTeam { user_id: i64 },

    #[error("Team {team_id} already has a project for event {event_id}")]
    DuplicateProject { team_id: i64, event_id: i64 },

    #[error("Check-in window is closed for item {item_id}")]
    OutOfWindow { item_id: i64 },

    #[error("Self check-in is disabled for item {item_id}")]
    SelfCheckInDisabled { item_id: i64 },

    #[error("Access level too low for item {item_id}")]
    InsufficientAccess { item_id: i64 },

    #[error("Invalid admission transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for HackHub operations
pub type Result<T> = std::result::Result<T, HackHubError>;

impl HackHubError {
    /// Check if the error is a domain denial the caller can recover from,
    /// as opposed to an infrastructure failure
    pub fn is_recoverable(&self) -> bool {
        match self {
            HackHubError::Database(_) => false,
            HackHubError::Migration(_) => false,
            HackHubError::Config(_) => false,
            HackHubError::UserNotFound { .. } => true,
            HackHubError::TeamNotFound { .. } => true,
            HackHubError::ProjectNotFound { .. } => true,
            HackHubError::NoProjectForTeam { .. } => true,
            HackHubError::PrizeNotFound { .. } => true,
            HackHubError::CheckInItemNotFound { .. } => true,
            HackHubError::NotOwner => true,
            HackHubError::NoTeam { .. } => true,
            HackHubError::DuplicateProject { .. } => true,
            HackHubError::OutOfWindow { .. } => true,
            HackHubError::SelfCheckInDisabled { .. } => true,
            HackHubError::InsufficientAccess { .. } => true,
            HackHubError::InvalidTransition { .. } => true,
            HackHubError::Serialization(_) => false,
            HackHubError::Io(_) => false,
            HackHubError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HackHubError::Database(_) => ErrorSeverity::Critical,
            HackHubError::Migration(_) => ErrorSeverity::Critical,
            HackHubError::Config(_) => ErrorSeverity::Critical,
            HackHubError::NotOwner => ErrorSeverity::Warning,
            HackHubError::NoTeam { .. } => ErrorSeverity::Warning,
            HackHubError::DuplicateProject { .. } => ErrorSeverity::Warning,
            HackHubError::OutOfWindow { .. } => ErrorSeverity::Info,
            HackHubError::SelfCheckInDisabled { .. } => ErrorSeverity::Info,
            HackHubError::InsufficientAccess { .. } => ErrorSeverity::Info,
            HackHubError::InvalidTransition { .. } => ErrorSeverity::Warning,
            HackHubError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
