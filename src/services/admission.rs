//! Admission service implementation
//!
//! The admission state machine: pending is the initial state, admitted
//! and rejected are reached only through admin-triggered transitions.
//! Whether an already-decided user may be re-decided is configurable;
//! the default is last-write-wins.

use tracing::info;
use crate::config::settings::Settings;
use crate::database::repositories::UserRepository;
use crate::models::user::{User, AdmissionStatus};
use crate::services::auth::AuthService;
use crate::utils::errors::{HackHubError, Result};
use crate::utils::logging::log_admin_action;

/// Admission state machine for user status transitions
#[derive(Debug, Clone)]
pub struct AdmissionService {
    users: UserRepository,
    auth: AuthService,
    settings: Settings,
}

impl AdmissionService {
    pub fn new(users: UserRepository, auth: AuthService, settings: Settings) -> Self {
        Self { users, auth, settings }
    }

    /// Whether the state machine permits `from -> to`. Re-applying the
    /// same decision is always permitted; overwriting a decided status
    /// only under the last-write-wins policy.
    pub fn transition_allowed(from: AdmissionStatus, to: AdmissionStatus, allow_overwrite: bool) -> bool {
        if from == to {
            return true;
        }
        if !from.is_decided() {
            return true;
        }
        allow_overwrite
    }

    /// Admit a user (admin only)
    pub async fn admit(&self, admin_id: i64, user_id: i64) -> Result<User> {
        self.apply(admin_id, user_id, AdmissionStatus::Admitted).await
    }

    /// Reject a user (admin only)
    pub async fn reject(&self, admin_id: i64, user_id: i64) -> Result<User> {
        self.apply(admin_id, user_id, AdmissionStatus::Rejected).await
    }

    /// Get a user's admission status
    pub async fn status(&self, user_id: i64) -> Result<AdmissionStatus> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(HackHubError::UserNotFound { user_id })?;

        Ok(user.admission_status)
    }

    /// List users still awaiting a decision (admin only)
    pub async fn pending_users(&self, admin_id: i64) -> Result<Vec<User>> {
        self.auth.require_admin(admin_id).await?;
        self.users.list_by_admission_status(AdmissionStatus::Pending).await
    }

    async fn apply(&self, admin_id: i64, user_id: i64, next: AdmissionStatus) -> Result<User> {
        self.auth.require_admin(admin_id).await?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(HackHubError::UserNotFound { user_id })?;

        if !Self::transition_allowed(user.admission_status, next, self.settings.admission.allow_overwrite) {
            return Err(HackHubError::InvalidTransition {
                from: user.admission_status.to_string(),
                to: next.to_string(),
            });
        }

        // Re-applying the current status is an idempotent no-op.
        if user.admission_status == next {
            return Ok(user);
        }

        let user = self.users.set_admission_status(user_id, next).await?;
        log_admin_action(admin_id, "admission_decision", Some(&user_id.to_string()), Some(&next.to_string()));
        info!(admin_id = admin_id, user_id = user_id, status = %next, "Admission status updated");

        Ok(user)
    }
}
