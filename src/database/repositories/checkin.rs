//! Check-in repository implementation

use sqlx::PgPool;
use chrono::{DateTime, Utc};
use crate::models::checkin::{CheckInItem, CheckInRecord, CreateCheckInItemRequest, UpdateCheckInItemRequest};
use crate::models::user::AccessLevel;
use crate::utils::errors::HackHubError;

const ITEM_COLUMNS: &str =
    "id, name, start_time, end_time, points, access_level, enable_self_check_in, created_at, updated_at";

const RECORD_COLUMNS: &str = "item_id, user_id, points_awarded, checked_in_at";

#[derive(Debug, Clone)]
pub struct CheckInRepository {
    pool: PgPool,
}

impl CheckInRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new check-in item
    pub async fn create_item(&self, request: CreateCheckInItemRequest) -> Result<CheckInItem, HackHubError> {
        let item = sqlx::query_as::<_, CheckInItem>(&format!(
            r#"
            INSERT INTO check_in_items (name, start_time, end_time, points, access_level, enable_self_check_in, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(request.name)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.points)
        .bind(request.access_level.unwrap_or(AccessLevel::General))
        .bind(request.enable_self_check_in)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Find check-in item by ID
    pub async fn find_item_by_id(&self, id: i64) -> Result<Option<CheckInItem>, HackHubError> {
        let item = sqlx::query_as::<_, CheckInItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM check_in_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// List all check-in items
    pub async fn list_items(&self) -> Result<Vec<CheckInItem>, HackHubError> {
        let items = sqlx::query_as::<_, CheckInItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM check_in_items ORDER BY start_time ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Update check-in item attributes
    pub async fn update_item(&self, id: i64, request: UpdateCheckInItemRequest) -> Result<CheckInItem, HackHubError> {
        let item = sqlx::query_as::<_, CheckInItem>(&format!(
            r#"
            UPDATE check_in_items
            SET name = COALESCE($2, name),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                points = COALESCE($5, points),
                access_level = COALESCE($6, access_level),
                enable_self_check_in = COALESCE($7, enable_self_check_in),
                updated_at = $8
            WHERE id = $1
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.points)
        .bind(request.access_level)
        .bind(request.enable_self_check_in)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Delete check-in item
    pub async fn delete_item(&self, id: i64) -> Result<(), HackHubError> {
        sqlx::query("DELETE FROM check_in_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Record a check-in. Idempotent set-insertion on the composite key:
    /// a repeated check-in leaves the existing row untouched and returns
    /// it, so points are never awarded twice.
    pub async fn record(
        &self,
        item_id: i64,
        user_id: i64,
        points: i32,
        now: DateTime<Utc>,
    ) -> Result<CheckInRecord, HackHubError> {
        let record = sqlx::query_as::<_, CheckInRecord>(&format!(
            r#"
            INSERT INTO check_in_records (item_id, user_id, points_awarded, checked_in_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (item_id, user_id)
            DO UPDATE SET points_awarded = check_in_records.points_awarded
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(item_id)
        .bind(user_id)
        .bind(points)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Find an existing check-in record
    pub async fn find_record(&self, item_id: i64, user_id: i64) -> Result<Option<CheckInRecord>, HackHubError> {
        let record = sqlx::query_as::<_, CheckInRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM check_in_records WHERE item_id = $1 AND user_id = $2"
        ))
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Check-in history for a user
    pub async fn records_for_user(&self, user_id: i64) -> Result<Vec<CheckInRecord>, HackHubError> {
        let records = sqlx::query_as::<_, CheckInRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM check_in_records WHERE user_id = $1 ORDER BY checked_in_at ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Users checked in for an item
    pub async fn records_for_item(&self, item_id: i64) -> Result<Vec<CheckInRecord>, HackHubError> {
        let records = sqlx::query_as::<_, CheckInRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM check_in_records WHERE item_id = $1 ORDER BY checked_in_at ASC"
        ))
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Total points a user has accumulated across check-ins
    pub async fn total_points(&self, user_id: i64) -> Result<i64, HackHubError> {
        let total: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(points_awarded), 0) FROM check_in_records WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.0)
    }
}
