//! Prize repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::prize::{Prize, CreatePrizeRequest, UpdatePrizeRequest};
use crate::utils::errors::HackHubError;

const PRIZE_COLUMNS: &str =
    "id, event_id, provider, name, description, winner_project_id, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PrizeRepository {
    pool: PgPool,
}

impl PrizeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new prize
    pub async fn create(&self, request: CreatePrizeRequest) -> Result<Prize, HackHubError> {
        let prize = sqlx::query_as::<_, Prize>(&format!(
            r#"
            INSERT INTO prizes (event_id, provider, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRIZE_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.provider)
        .bind(request.name)
        .bind(request.description)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prize)
    }

    /// Find prize by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Prize>, HackHubError> {
        let prize = sqlx::query_as::<_, Prize>(&format!(
            "SELECT {PRIZE_COLUMNS} FROM prizes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(prize)
    }

    /// List prizes for an event
    pub async fn list_by_event(&self, event_id: i64) -> Result<Vec<Prize>, HackHubError> {
        let prizes = sqlx::query_as::<_, Prize>(&format!(
            "SELECT {PRIZE_COLUMNS} FROM prizes WHERE event_id = $1 ORDER BY created_at ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(prizes)
    }

    /// Update prize attributes
    pub async fn update(&self, id: i64, request: UpdatePrizeRequest) -> Result<Prize, HackHubError> {
        let prize = sqlx::query_as::<_, Prize>(&format!(
            r#"
            UPDATE prizes
            SET provider = COALESCE($2, provider),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = $5
            WHERE id = $1
            RETURNING {PRIZE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.provider)
        .bind(request.name)
        .bind(request.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prize)
    }

    /// Set the winning project
    pub async fn set_winner(&self, id: i64, project_id: i64) -> Result<Prize, HackHubError> {
        let prize = sqlx::query_as::<_, Prize>(&format!(
            r#"
            UPDATE prizes
            SET winner_project_id = $2, updated_at = $3
            WHERE id = $1
            RETURNING {PRIZE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(project_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(prize)
    }

    /// Delete prize
    pub async fn delete(&self, id: i64) -> Result<(), HackHubError> {
        sqlx::query("DELETE FROM prizes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
