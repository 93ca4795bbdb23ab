//! Ownership authorization service
//!
//! This service decides who may act on which resource. Ownership is
//! derived solely from team membership: a caller owns a resource iff the
//! resource's team equals the caller's current team. The decision logic
//! is a single pure rule table consumed by every operation rather than
//! per-endpoint role checks, and it is re-evaluated on every call because
//! team membership can change between requests.

use tracing::debug;
use crate::models::user::UserRole;
use crate::services::identity::{Identity, IdentityService};
use crate::utils::errors::{HackHubError, Result};
use crate::utils::logging::log_authz_denial;

/// Operations in scope for authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Read,
    Create,
    Edit,
    Delete,
}

impl Operation {
    fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
        }
    }
}

/// The resource a caller is attempting to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Public-listing resources (project and prize listings): readable by
    /// any resolved caller
    PublicListing,
    /// A resource owned by the given team
    TeamOwned { team_id: i64 },
    /// A project about to be created for the caller's own team
    NewProject,
}

/// Outcome of an authorization or eligibility evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

/// Why an evaluation denied the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotOwner,
    NoTeam,
    OutOfWindow,
    SelfCheckInDisabled,
    InsufficientAccess,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::NotOwner => "not_owner",
            DenyReason::NoTeam => "no_team",
            DenyReason::OutOfWindow => "out_of_window",
            DenyReason::SelfCheckInDisabled => "self_check_in_disabled",
            DenyReason::InsufficientAccess => "insufficient_access",
        }
    }
}

/// Authorization service gating every operation on the core
#[derive(Debug, Clone)]
pub struct AuthService {
    identity: IdentityService,
}

impl AuthService {
    pub fn new(identity: IdentityService) -> Self {
        Self { identity }
    }

    /// Access to the identity resolver for "by user id" operations
    pub fn identity(&self) -> &IdentityService {
        &self.identity
    }

    /// Pure decision function. Rules are evaluated in order, first match
    /// wins; the project-creation precondition is layered before the rule
    /// table, so even an admin without a team cannot create a project.
    pub fn decide(caller: &Identity, operation: Operation, target: Target) -> Decision {
        // Precondition: creating a project requires a current team.
        if matches!(target, Target::NewProject) && caller.team_id.is_none() {
            return Decision::Deny(DenyReason::NoTeam);
        }

        // Rule 1: admins bypass ownership checks.
        if caller.role == UserRole::Admin {
            return Decision::Allow;
        }

        match target {
            // Rule 2: public listings are readable by any resolved caller.
            Target::PublicListing if matches!(operation, Operation::List | Operation::Read) => {
                Decision::Allow
            }
            // Rule 3: the owning team acts on its own resources.
            Target::TeamOwned { team_id } if caller.team_id == Some(team_id) => Decision::Allow,
            // Team presence was established above.
            Target::NewProject => Decision::Allow,
            // Rule 4: everything else is denied.
            _ => Decision::Deny(DenyReason::NotOwner),
        }
    }

    /// Resolve the caller and apply the rule table, converting a denial
    /// into the matching typed error
    pub async fn authorize(&self, user_id: i64, operation: Operation, target: Target) -> Result<Identity> {
        let caller = self.identity.resolve(user_id).await?;

        match Self::decide(&caller, operation, target) {
            Decision::Allow => {
                debug!(user_id = user_id, operation = operation.as_str(), target = ?target, "Authorization granted");
                Ok(caller)
            }
            Decision::Deny(reason) => {
                log_authz_denial(user_id, operation.as_str(), reason.as_str());
                Err(match reason {
                    DenyReason::NoTeam => HackHubError::NoTeam { user_id },
                    _ => HackHubError::NotOwner,
                })
            }
        }
    }

    /// Require the caller to be an admin
    pub async fn require_admin(&self, user_id: i64) -> Result<Identity> {
        let caller = self.identity.resolve(user_id).await?;

        if !caller.is_admin() {
            log_authz_denial(user_id, "admin", DenyReason::NotOwner.as_str());
            return Err(HackHubError::NotOwner);
        }

        Ok(caller)
    }
}
