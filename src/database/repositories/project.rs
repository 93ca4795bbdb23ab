//! Project repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::project::{Project, ProjectPrize, CreateProjectRequest, UpdateProjectRequest};
use crate::utils::errors::HackHubError;
use super::is_unique_violation;

const PROJECT_COLUMNS: &str =
    "id, team_id, event_id, name, description, repo_url, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new project. The unique index on (team_id, event_id)
    /// closes the concurrent-create race: the losing insert surfaces as
    /// `DuplicateProject`, the same failure the pre-check produces.
    pub async fn create(&self, request: CreateProjectRequest) -> Result<Project, HackHubError> {
        let team_id = request.team_id;
        let event_id = request.event_id;

        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (team_id, event_id, name, description, repo_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(request.team_id)
        .bind(request.event_id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.repo_url)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                HackHubError::DuplicateProject { team_id, event_id }
            } else {
                e.into()
            }
        })?;

        Ok(project)
    }

    /// Find project by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Project>, HackHubError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// Find the project a team has for an event, if any
    pub async fn find_by_team_and_event(&self, team_id: i64, event_id: i64) -> Result<Option<Project>, HackHubError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE team_id = $1 AND event_id = $2"
        ))
        .bind(team_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    /// List projects for an event
    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<Project>, HackHubError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE event_id = $1 ORDER BY created_at ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    /// Update project attributes
    pub async fn update(&self, id: i64, request: UpdateProjectRequest) -> Result<Project, HackHubError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            UPDATE projects
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                repo_url = COALESCE($4, repo_url),
                updated_at = $5
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.repo_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    /// Delete project
    pub async fn delete(&self, id: i64) -> Result<(), HackHubError> {
        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Enter a project into a prize. Idempotent set-insertion: re-entering
    /// an already-entered prize inserts nothing.
    pub async fn enter_prize(&self, project_id: i64, prize_id: i64) -> Result<(), HackHubError> {
        sqlx::query(
            r#"
            INSERT INTO project_prizes (project_id, prize_id, entered_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id, prize_id) DO NOTHING
            "#
        )
        .bind(project_id)
        .bind(prize_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Whether a project is entered into a prize
    pub async fn is_entered(&self, project_id: i64, prize_id: i64) -> Result<bool, HackHubError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM project_prizes WHERE project_id = $1 AND prize_id = $2"
        )
        .bind(project_id)
        .bind(prize_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Prize identifiers the project is entered into
    pub async fn prize_ids(&self, project_id: i64) -> Result<Vec<i64>, HackHubError> {
        let entries = sqlx::query_as::<_, ProjectPrize>(
            "SELECT project_id, prize_id, entered_at FROM project_prizes WHERE project_id = $1 ORDER BY entered_at ASC"
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries.into_iter().map(|e| e.prize_id).collect())
    }
}
