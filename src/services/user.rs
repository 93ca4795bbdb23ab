//! User service implementation
//!
//! This service handles user registration and profile management. The
//! admission lifecycle lives in the admission service; this one only
//! creates and reads users.

use tracing::{info, debug};
use crate::database::repositories::UserRepository;
use crate::models::user::{User, CreateUserRequest, UpdateUserRequest, AccessLevel};
use crate::services::auth::AuthService;
use crate::utils::errors::{HackHubError, Result};
use crate::utils::logging::log_user_action;

/// User service for registration and profile operations
#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepository,
    auth: AuthService,
}

impl UserService {
    pub fn new(users: UserRepository, auth: AuthService) -> Self {
        Self { users, auth }
    }

    /// Register a new user or return the existing one for the same email
    pub async fn register_or_get(&self, request: CreateUserRequest) -> Result<User> {
        debug!(email = %request.email, "Attempting to register or get user");

        if request.email.trim().is_empty() {
            return Err(HackHubError::InvalidInput("Email is required".to_string()));
        }

        if let Some(existing) = self.users.find_by_email(&request.email).await? {
            info!(user_id = existing.id, "User already registered, returning existing user");
            return Ok(existing);
        }

        let user = self.users.create(request).await?;
        log_user_action(user.id, "register", None);

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(HackHubError::UserNotFound { user_id })
    }

    /// Update the caller's own profile. Access-level changes are stripped
    /// here; only the admin path below may grant tiers.
    pub async fn update_profile(&self, user_id: i64, mut request: UpdateUserRequest) -> Result<User> {
        let _ = self.get_user(user_id).await?;
        request.access_level = None;

        let user = self.users.update(user_id, request).await?;
        info!(user_id = user_id, "User profile updated");

        Ok(user)
    }

    /// Set a user's access level (admin only)
    pub async fn set_access_level(&self, admin_id: i64, user_id: i64, level: AccessLevel) -> Result<User> {
        self.auth.require_admin(admin_id).await?;
        let _ = self.get_user(user_id).await?;

        let request = UpdateUserRequest {
            access_level: Some(level),
            ..Default::default()
        };

        let user = self.users.update(user_id, request).await?;
        info!(admin_id = admin_id, user_id = user_id, level = %level, "Access level updated");

        Ok(user)
    }

    /// List users with pagination (admin only)
    pub async fn list_users(&self, admin_id: i64, limit: i64, offset: i64) -> Result<Vec<User>> {
        self.auth.require_admin(admin_id).await?;

        if limit > 100 {
            return Err(HackHubError::InvalidInput("Limit cannot exceed 100".to_string()));
        }

        self.users.list(limit, offset).await
    }
}
