//! Team repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::team::{Team, TeamMember, CreateTeamRequest};
use crate::utils::errors::HackHubError;
use super::is_unique_violation;

#[derive(Debug, Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new team
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, HackHubError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, created_at, updated_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, created_at, updated_at
            "#
        )
        .bind(request.name)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(team)
    }

    /// Find team by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Team>, HackHubError> {
        let team = sqlx::query_as::<_, Team>(
            "SELECT id, name, created_at, updated_at FROM teams WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    /// Find the team a user belongs to, if any
    pub async fn find_by_member(&self, user_id: i64) -> Result<Option<Team>, HackHubError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT t.id, t.name, t.created_at, t.updated_at
            FROM teams t
            INNER JOIN team_members tm ON t.id = tm.team_id
            WHERE tm.user_id = $1
            "#
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    /// Add a member to a team. The unique index on `team_members.user_id`
    /// rejects a second membership for the same user.
    pub async fn add_member(&self, team_id: i64, user_id: i64) -> Result<TeamMember, HackHubError> {
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (team_id, user_id, joined_at)
            VALUES ($1, $2, $3)
            RETURNING id, team_id, user_id, joined_at
            "#
        )
        .bind(team_id)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HackHubError::InvalidInput(format!("User {} already belongs to a team", user_id))
            } else {
                e.into()
            }
        })?;

        Ok(member)
    }

    /// Remove a member from their team
    pub async fn remove_member(&self, user_id: i64) -> Result<(), HackHubError> {
        sqlx::query("DELETE FROM team_members WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get team members
    pub async fn members(&self, team_id: i64) -> Result<Vec<TeamMember>, HackHubError> {
        let members = sqlx::query_as::<_, TeamMember>(
            "SELECT id, team_id, user_id, joined_at FROM team_members WHERE team_id = $1 ORDER BY joined_at ASC"
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Count team members
    pub async fn member_count(&self, team_id: i64) -> Result<i64, HackHubError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM team_members WHERE team_id = $1"
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Delete team
    pub async fn delete(&self, id: i64) -> Result<(), HackHubError> {
        sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
