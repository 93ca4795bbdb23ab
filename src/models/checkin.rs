//! Check-in item and record models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::models::user::AccessLevel;

/// A timed check-in activity. The eligibility window is half-open:
/// `start_time <= now < end_time`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckInItem {
    pub id: i64,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub points: i32,
    pub access_level: AccessLevel,
    pub enable_self_check_in: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CheckInItem {
    /// Whether `now` falls within the item's eligibility window
    pub fn window_contains(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now < self.end_time
    }
}

/// A performed check-in. The composite primary key (item_id, user_id)
/// makes recording idempotent; points are captured at check-in time so a
/// later item edit does not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckInRecord {
    pub item_id: i64,
    pub user_id: i64,
    pub points_awarded: i32,
    pub checked_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckInItemRequest {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub points: i32,
    pub access_level: Option<AccessLevel>,
    pub enable_self_check_in: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCheckInItemRequest {
    pub name: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub points: Option<i32>,
    pub access_level: Option<AccessLevel>,
    pub enable_self_check_in: Option<bool>,
}
