//! Team service implementation
//!
//! Team membership operations and the "my team" resolution path. The
//! "by user id" operations always resolve the team through the identity
//! resolver, never from a caller-supplied team id, so a forged id in a
//! request cannot widen access.

use tracing::{info, debug};
use crate::database::repositories::TeamRepository;
use crate::models::team::{Team, TeamMember, CreateTeamRequest};
use crate::services::auth::{AuthService, Operation, Target};
use crate::utils::errors::{HackHubError, Result};

/// Team service for membership management and lookups
#[derive(Debug, Clone)]
pub struct TeamService {
    teams: TeamRepository,
    auth: AuthService,
}

impl TeamService {
    pub fn new(teams: TeamRepository, auth: AuthService) -> Self {
        Self { teams, auth }
    }

    /// Create a team and join it as the first member. Fails when the
    /// caller already belongs to a team.
    pub async fn create_team(&self, caller_id: i64, request: CreateTeamRequest) -> Result<Team> {
        let caller = self.auth.identity().resolve(caller_id).await?;

        if caller.team_id.is_some() {
            return Err(HackHubError::InvalidInput(
                "Caller already belongs to a team".to_string(),
            ));
        }

        if request.name.trim().is_empty() {
            return Err(HackHubError::InvalidInput("Team name is required".to_string()));
        }

        let team = self.teams.create(request).await?;
        self.teams.add_member(team.id, caller_id).await?;
        info!(user_id = caller_id, team_id = team.id, "Team created");

        Ok(team)
    }

    /// Join an existing team. The storage-level unique index on the
    /// member column rejects a second concurrent join.
    pub async fn join_team(&self, caller_id: i64, team_id: i64) -> Result<TeamMember> {
        let _ = self.auth.identity().resolve(caller_id).await?;

        let team = self
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or(HackHubError::TeamNotFound { team_id })?;

        let member = self.teams.add_member(team.id, caller_id).await?;
        info!(user_id = caller_id, team_id = team.id, "User joined team");

        Ok(member)
    }

    /// Leave the current team
    pub async fn leave_team(&self, caller_id: i64) -> Result<()> {
        let caller = self.auth.identity().resolve(caller_id).await?;

        let team_id = caller
            .team_id
            .ok_or(HackHubError::NoTeam { user_id: caller_id })?;

        self.teams.remove_member(caller_id).await?;
        info!(user_id = caller_id, team_id = team_id, "User left team");

        Ok(())
    }

    /// Get the caller's own team, resolved through the identity resolver
    pub async fn my_team(&self, caller_id: i64) -> Result<Team> {
        let caller = self.auth.identity().resolve(caller_id).await?;
        debug!(user_id = caller_id, team_id = ?caller.team_id, "Resolving own team");

        let team_id = caller
            .team_id
            .ok_or(HackHubError::NoTeam { user_id: caller_id })?;

        self.teams
            .find_by_id(team_id)
            .await?
            .ok_or(HackHubError::TeamNotFound { team_id })
    }

    /// Get a team by id: own team or admin only
    pub async fn get_team(&self, caller_id: i64, team_id: i64) -> Result<Team> {
        self.auth
            .authorize(caller_id, Operation::Read, Target::TeamOwned { team_id })
            .await?;

        self.teams
            .find_by_id(team_id)
            .await?
            .ok_or(HackHubError::TeamNotFound { team_id })
    }

    /// List a team's members: own team or admin only
    pub async fn members(&self, caller_id: i64, team_id: i64) -> Result<Vec<TeamMember>> {
        self.auth
            .authorize(caller_id, Operation::Read, Target::TeamOwned { team_id })
            .await?;

        self.teams.members(team_id).await
    }
}
