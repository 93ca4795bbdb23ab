//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod user;
pub mod team;
pub mod project;
pub mod prize;
pub mod checkin;

// Re-export repositories
pub use user::UserRepository;
pub use team::TeamRepository;
pub use project::ProjectRepository;
pub use prize::PrizeRepository;
pub use checkin::CheckInRepository;

/// Whether a sqlx error is a storage-level unique constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
    )
}
