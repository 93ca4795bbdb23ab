//! Identity resolution service
//!
//! Resolves a user id into the caller identity every authorization
//! decision depends on: role, admission status, access level, and the
//! user's current team. Resolution happens on every call so that team
//! membership changes between requests are always observed; results are
//! never cached.

use tracing::debug;
use crate::database::repositories::{UserRepository, TeamRepository};
use crate::models::user::{UserRole, AdmissionStatus, AccessLevel};
use crate::utils::errors::{HackHubError, Result};

/// Resolved caller identity
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub role: UserRole,
    pub admission_status: AdmissionStatus,
    pub access_level: AccessLevel,
    pub team_id: Option<i64>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Identity resolver backed by the user and team directories
#[derive(Debug, Clone)]
pub struct IdentityService {
    users: UserRepository,
    teams: TeamRepository,
}

impl IdentityService {
    pub fn new(users: UserRepository, teams: TeamRepository) -> Self {
        Self { users, teams }
    }

    /// Resolve a user id into an identity. Fails with `UserNotFound` for
    /// unknown ids; `team_id` is `None` for users without a team.
    pub async fn resolve(&self, user_id: i64) -> Result<Identity> {
        let (user, team) = futures::future::try_join(
            self.users.find_by_id(user_id),
            self.teams.find_by_member(user_id),
        )
        .await?;

        let user = user.ok_or(HackHubError::UserNotFound { user_id })?;

        let identity = Identity {
            user_id: user.id,
            role: user.role,
            admission_status: user.admission_status,
            access_level: user.access_level,
            team_id: team.map(|t| t.id),
        };

        debug!(
            user_id = user_id,
            role = ?identity.role,
            team_id = ?identity.team_id,
            "Identity resolved"
        );

        Ok(identity)
    }
}
