//! Prize service implementation
//!
//! Prize management is admin-only apart from the public listing reads.

use tracing::info;
use crate::database::repositories::{PrizeRepository, ProjectRepository};
use crate::models::prize::{Prize, CreatePrizeRequest, UpdatePrizeRequest};
use crate::services::auth::{AuthService, Operation, Target};
use crate::utils::errors::{HackHubError, Result};
use crate::utils::logging::log_admin_action;

#[derive(Debug, Clone)]
pub struct PrizeService {
    prizes: PrizeRepository,
    projects: ProjectRepository,
    auth: AuthService,
}

impl PrizeService {
    pub fn new(prizes: PrizeRepository, projects: ProjectRepository, auth: AuthService) -> Self {
        Self { prizes, projects, auth }
    }

    /// Create a prize (admin only)
    pub async fn create_prize(&self, admin_id: i64, request: CreatePrizeRequest) -> Result<Prize> {
        self.auth.require_admin(admin_id).await?;

        if request.name.trim().is_empty() {
            return Err(HackHubError::InvalidInput("Prize name is required".to_string()));
        }

        let prize = self.prizes.create(request).await?;
        log_admin_action(admin_id, "create_prize", Some(&prize.id.to_string()), None);

        Ok(prize)
    }

    /// Get a prize by id (public read)
    pub async fn get_prize(&self, caller_id: i64, prize_id: i64) -> Result<Prize> {
        self.auth
            .authorize(caller_id, Operation::Read, Target::PublicListing)
            .await?;

        self.prizes
            .find_by_id(prize_id)
            .await?
            .ok_or(HackHubError::PrizeNotFound { prize_id })
    }

    /// List prizes for an event (public listing)
    pub async fn list_prizes(&self, caller_id: i64, event_id: i64) -> Result<Vec<Prize>> {
        self.auth
            .authorize(caller_id, Operation::List, Target::PublicListing)
            .await?;

        self.prizes.list_by_event(event_id).await
    }

    /// Update a prize (admin only)
    pub async fn update_prize(&self, admin_id: i64, prize_id: i64, request: UpdatePrizeRequest) -> Result<Prize> {
        self.auth.require_admin(admin_id).await?;

        let _ = self
            .prizes
            .find_by_id(prize_id)
            .await?
            .ok_or(HackHubError::PrizeNotFound { prize_id })?;

        let prize = self.prizes.update(prize_id, request).await?;
        log_admin_action(admin_id, "update_prize", Some(&prize_id.to_string()), None);

        Ok(prize)
    }

    /// Award a prize to a project (admin only). The winning project must
    /// be entered in the prize.
    pub async fn set_winner(&self, admin_id: i64, prize_id: i64, project_id: i64) -> Result<Prize> {
        self.auth.require_admin(admin_id).await?;

        let _ = self
            .prizes
            .find_by_id(prize_id)
            .await?
            .ok_or(HackHubError::PrizeNotFound { prize_id })?;

        let _ = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(HackHubError::ProjectNotFound { project_id })?;

        if !self.projects.is_entered(project_id, prize_id).await? {
            return Err(HackHubError::InvalidInput(format!(
                "Project {} is not entered in prize {}",
                project_id, prize_id
            )));
        }

        let prize = self.prizes.set_winner(prize_id, project_id).await?;
        info!(admin_id = admin_id, prize_id = prize_id, project_id = project_id, "Prize winner set");

        Ok(prize)
    }

    /// Delete a prize (admin only)
    pub async fn delete_prize(&self, admin_id: i64, prize_id: i64) -> Result<()> {
        self.auth.require_admin(admin_id).await?;

        let _ = self
            .prizes
            .find_by_id(prize_id)
            .await?
            .ok_or(HackHubError::PrizeNotFound { prize_id })?;

        self.prizes.delete(prize_id).await?;
        log_admin_action(admin_id, "delete_prize", Some(&prize_id.to_string()), None);

        Ok(())
    }
}
