//! Prize model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Prize {
    pub id: i64,
    pub event_id: i64,
    pub provider: String,
    pub name: String,
    pub description: Option<String>,
    pub winner_project_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrizeRequest {
    pub event_id: i64,
    pub provider: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePrizeRequest {
    pub provider: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}
