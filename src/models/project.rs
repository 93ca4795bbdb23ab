//! Project model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A team's submission for an event. At most one project exists per
/// (team, event) pair, enforced by a unique index on those columns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub team_id: i64,
    pub event_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub repo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Prize-entry row. The composite primary key (project_id, prize_id)
/// gives prize entry its set semantics.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectPrize {
    pub project_id: i64,
    pub prize_id: i64,
    pub entered_at: DateTime<Utc>,
}

/// A project together with the identifiers of the prizes it is entered in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWithPrizes {
    #[serde(flatten)]
    pub project: Project,
    pub prizes: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub team_id: i64,
    pub event_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub repo_url: Option<String>,
}
