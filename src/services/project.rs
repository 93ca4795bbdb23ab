//! Project service implementation
//!
//! The team-resource invariant engine: at most one project per
//! (team, event), idempotent prize entry, explicit deletion. Ownership
//! over a project is derived from its owning team on every call.

use tracing::{info, debug};
use crate::database::repositories::{ProjectRepository, PrizeRepository};
use crate::models::project::{Project, ProjectWithPrizes, CreateProjectRequest, UpdateProjectRequest};
use crate::services::auth::{AuthService, Operation, Target};
use crate::utils::errors::{HackHubError, Result};

/// Attributes supplied when creating a project; the owning team comes
/// from the caller's identity, never from the request.
#[derive(Debug, Clone)]
pub struct ProjectAttrs {
    pub name: String,
    pub description: Option<String>,
    pub repo_url: Option<String>,
}

/// Project service enforcing the one-project-per-team invariant
#[derive(Debug, Clone)]
pub struct ProjectService {
    projects: ProjectRepository,
    prizes: PrizeRepository,
    auth: AuthService,
}

impl ProjectService {
    pub fn new(projects: ProjectRepository, prizes: PrizeRepository, auth: AuthService) -> Self {
        Self { projects, prizes, auth }
    }

    /// Create a project for the caller's team. The pre-check and the
    /// storage unique constraint both surface as `DuplicateProject`, so
    /// a lost race is indistinguishable from an ordinary duplicate.
    pub async fn create_project(&self, caller_id: i64, event_id: i64, attrs: ProjectAttrs) -> Result<Project> {
        let caller = self
            .auth
            .authorize(caller_id, Operation::Create, Target::NewProject)
            .await?;

        let team_id = caller
            .team_id
            .ok_or(HackHubError::NoTeam { user_id: caller_id })?;

        if attrs.name.trim().is_empty() {
            return Err(HackHubError::InvalidInput("Project name is required".to_string()));
        }

        if let Some(existing) = self.projects.find_by_team_and_event(team_id, event_id).await? {
            debug!(team_id = team_id, event_id = event_id, project_id = existing.id, "Project already exists for team");
            return Err(HackHubError::DuplicateProject { team_id, event_id });
        }

        let project = self
            .projects
            .create(CreateProjectRequest {
                team_id,
                event_id,
                name: attrs.name,
                description: attrs.description,
                repo_url: attrs.repo_url,
            })
            .await?;

        info!(user_id = caller_id, team_id = team_id, event_id = event_id, project_id = project.id, "Project created");

        Ok(project)
    }

    /// Get the caller's own project for an event, resolved through the
    /// identity resolver rather than a caller-supplied team id
    pub async fn my_project(&self, caller_id: i64, event_id: i64) -> Result<ProjectWithPrizes> {
        let caller = self.auth.identity().resolve(caller_id).await?;

        let team_id = caller
            .team_id
            .ok_or(HackHubError::NoTeam { user_id: caller_id })?;

        let project = self
            .projects
            .find_by_team_and_event(team_id, event_id)
            .await?
            .ok_or(HackHubError::NoProjectForTeam { team_id, event_id })?;

        self.with_prizes(project).await
    }

    /// Get a project by id (public read for any resolved caller)
    pub async fn get_project(&self, caller_id: i64, project_id: i64) -> Result<ProjectWithPrizes> {
        self.auth
            .authorize(caller_id, Operation::Read, Target::PublicListing)
            .await?;

        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(HackHubError::ProjectNotFound { project_id })?;

        self.with_prizes(project).await
    }

    /// List projects for an event (public listing)
    pub async fn list_projects(&self, caller_id: i64, event_id: i64) -> Result<Vec<Project>> {
        self.auth
            .authorize(caller_id, Operation::List, Target::PublicListing)
            .await?;

        self.projects.list_by_event(event_id).await
    }

    /// Update a project's attributes (owning team or admin)
    pub async fn update_project(&self, caller_id: i64, project_id: i64, request: UpdateProjectRequest) -> Result<Project> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(HackHubError::ProjectNotFound { project_id })?;

        self.auth
            .authorize(caller_id, Operation::Edit, Target::TeamOwned { team_id: project.team_id })
            .await?;

        let updated = self.projects.update(project_id, request).await?;
        info!(user_id = caller_id, project_id = project_id, "Project updated");

        Ok(updated)
    }

    /// Delete a project (owning team or admin). Unconditional removal;
    /// prize winner references are cleared by the schema.
    pub async fn delete_project(&self, caller_id: i64, project_id: i64) -> Result<()> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(HackHubError::ProjectNotFound { project_id })?;

        self.auth
            .authorize(caller_id, Operation::Delete, Target::TeamOwned { team_id: project.team_id })
            .await?;

        self.projects.delete(project_id).await?;
        info!(user_id = caller_id, project_id = project_id, "Project deleted");

        Ok(())
    }

    /// Enter a project into a prize. Idempotent: re-entering an
    /// already-entered prize is a no-op success.
    pub async fn enter_prize(&self, caller_id: i64, project_id: i64, prize_id: i64) -> Result<ProjectWithPrizes> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(HackHubError::ProjectNotFound { project_id })?;

        let prize = self
            .prizes
            .find_by_id(prize_id)
            .await?
            .ok_or(HackHubError::PrizeNotFound { prize_id })?;

        if prize.event_id != project.event_id {
            return Err(HackHubError::InvalidInput(format!(
                "Prize {} belongs to a different event than project {}",
                prize_id, project_id
            )));
        }

        self.auth
            .authorize(caller_id, Operation::Edit, Target::TeamOwned { team_id: project.team_id })
            .await?;

        self.projects.enter_prize(project_id, prize_id).await?;
        info!(user_id = caller_id, project_id = project_id, prize_id = prize_id, "Project entered in prize");

        self.with_prizes(project).await
    }

    async fn with_prizes(&self, project: Project) -> Result<ProjectWithPrizes> {
        let prizes = self.projects.prize_ids(project.id).await?;
        Ok(ProjectWithPrizes { project, prizes })
    }
}
