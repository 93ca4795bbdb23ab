//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::user::{User, UserRole, AdmissionStatus, AccessLevel, CreateUserRequest, UpdateUserRequest};
use crate::utils::errors::HackHubError;

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, role, admission_status, access_level, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, HackHubError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, first_name, last_name, role, admission_status, access_level, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(request.email)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.role.unwrap_or(UserRole::Participant))
        .bind(AdmissionStatus::Pending)
        .bind(request.access_level.unwrap_or(AccessLevel::General))
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, HackHubError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, HackHubError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user profile fields
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<User, HackHubError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                access_level = COALESCE($4, access_level),
                updated_at = $5
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.access_level)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Set admission status
    pub async fn set_admission_status(&self, id: i64, status: AdmissionStatus) -> Result<User, HackHubError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET admission_status = $2, updated_at = $3
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// List users by admission status
    pub async fn list_by_admission_status(&self, status: AdmissionStatus) -> Result<Vec<User>, HackHubError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE admission_status = $1 ORDER BY created_at ASC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// List all users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, HackHubError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, HackHubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Delete user
    pub async fn delete(&self, id: i64) -> Result<(), HackHubError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
