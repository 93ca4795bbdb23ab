//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Role of a user. Roles are fixed: admins bypass ownership checks,
/// participants are subject to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Participant,
}

/// Admission lifecycle status. `Pending` is the initial state; `Admitted`
/// and `Rejected` are reached only through admin-triggered transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdmissionStatus {
    Pending,
    Admitted,
    Rejected,
}

impl AdmissionStatus {
    /// Whether a decision has been made for this status
    pub fn is_decided(&self) -> bool {
        !matches!(self, AdmissionStatus::Pending)
    }
}

impl std::fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdmissionStatus::Pending => write!(f, "pending"),
            AdmissionStatus::Admitted => write!(f, "admitted"),
            AdmissionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Ordered access tier used by check-in items. A caller meets an item's
/// requirement iff their tier is at least the item's tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    General,
    Mentor,
    Organizer,
}

impl std::fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessLevel::General => write!(f, "general"),
            AccessLevel::Mentor => write!(f, "mentor"),
            AccessLevel::Organizer => write!(f, "organizer"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub admission_status: AdmissionStatus,
    pub access_level: AccessLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub access_level: Option<AccessLevel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub access_level: Option<AccessLevel>,
}
