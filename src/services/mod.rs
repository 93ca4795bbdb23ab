//! Services module
//!
//! This module contains the business logic services: identity
//! resolution, ownership authorization, and the admission, project,
//! prize and check-in engines.

pub mod identity;
pub mod auth;
pub mod user;
pub mod team;
pub mod project;
pub mod prize;
pub mod admission;
pub mod checkin;

// Re-export commonly used services
pub use identity::{Identity, IdentityService};
pub use auth::{AuthService, Operation, Target, Decision, DenyReason};
pub use user::UserService;
pub use team::TeamService;
pub use project::{ProjectService, ProjectAttrs};
pub use prize::PrizeService;
pub use admission::AdmissionService;
pub use checkin::CheckInService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub identity_service: IdentityService,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub team_service: TeamService,
    pub project_service: ProjectService,
    pub prize_service: PrizeService,
    pub admission_service: AdmissionService,
    pub checkin_service: CheckInService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(db: DatabaseService, settings: Settings) -> Self {
        let identity_service = IdentityService::new(db.users.clone(), db.teams.clone());
        let auth_service = AuthService::new(identity_service.clone());
        let user_service = UserService::new(db.users.clone(), auth_service.clone());
        let team_service = TeamService::new(db.teams.clone(), auth_service.clone());
        let project_service = ProjectService::new(db.projects.clone(), db.prizes.clone(), auth_service.clone());
        let prize_service = PrizeService::new(db.prizes.clone(), db.projects.clone(), auth_service.clone());
        let admission_service = AdmissionService::new(db.users.clone(), auth_service.clone(), settings);
        let checkin_service = CheckInService::new(db.check_ins.clone(), auth_service.clone());

        Self {
            identity_service,
            auth_service,
            user_service,
            team_service,
            project_service,
            prize_service,
            admission_service,
            checkin_service,
        }
    }
}
