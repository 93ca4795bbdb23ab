//! Check-in service implementation
//!
//! The check-in eligibility engine. Eligibility is evaluated against the
//! item's half-open time window, its self-check-in flag, and the caller's
//! access tier; recording a check-in is an idempotent set-insertion so a
//! double check-in never awards points twice.

use chrono::{DateTime, Utc};
use tracing::{info, debug};
use crate::database::repositories::CheckInRepository;
use crate::models::checkin::{CheckInItem, CheckInRecord, CreateCheckInItemRequest, UpdateCheckInItemRequest};
use crate::services::auth::{AuthService, Decision, DenyReason, Operation, Target};
use crate::services::identity::Identity;
use crate::utils::errors::{HackHubError, Result};
use crate::utils::logging::log_admin_action;

/// Check-in eligibility engine and recording service
#[derive(Debug, Clone)]
pub struct CheckInService {
    check_ins: CheckInRepository,
    auth: AuthService,
}

impl CheckInService {
    pub fn new(check_ins: CheckInRepository, auth: AuthService) -> Self {
        Self { check_ins, auth }
    }

    /// Pure eligibility evaluation. Rules in order: the window bounds
    /// everyone, admins bypass the self-check-in flag and the tier
    /// requirement, participants must satisfy both.
    pub fn evaluate(caller: &Identity, item: &CheckInItem, now: DateTime<Utc>) -> Decision {
        if !item.window_contains(now) {
            return Decision::Deny(DenyReason::OutOfWindow);
        }

        if !item.enable_self_check_in && !caller.is_admin() {
            return Decision::Deny(DenyReason::SelfCheckInDisabled);
        }

        if !caller.is_admin() && caller.access_level < item.access_level {
            return Decision::Deny(DenyReason::InsufficientAccess);
        }

        Decision::Allow
    }

    /// Evaluate whether the caller may check in for an item right now
    pub async fn can_check_in(&self, caller_id: i64, item_id: i64, now: DateTime<Utc>) -> Result<Decision> {
        let caller = self.auth.identity().resolve(caller_id).await?;
        let item = self.get_item_internal(item_id).await?;

        Ok(Self::evaluate(&caller, &item, now))
    }

    /// Perform a self check-in. A repeated check-in for the same item is
    /// a no-op success: the original record is returned and no further
    /// points are awarded.
    pub async fn check_in(&self, caller_id: i64, item_id: i64, now: DateTime<Utc>) -> Result<CheckInRecord> {
        let caller = self.auth.identity().resolve(caller_id).await?;
        let item = self.get_item_internal(item_id).await?;

        match Self::evaluate(&caller, &item, now) {
            Decision::Allow => {}
            Decision::Deny(reason) => return Err(Self::denial_error(reason, item_id)),
        }

        let record = self.check_ins.record(item_id, caller_id, item.points, now).await?;
        info!(user_id = caller_id, item_id = item_id, points = item.points, "Check-in recorded");

        Ok(record)
    }

    /// Check in another user (admin only). The window still applies; the
    /// self-check-in flag and tier requirement do not, since the admin is
    /// the caller.
    pub async fn check_in_user(&self, admin_id: i64, item_id: i64, user_id: i64, now: DateTime<Utc>) -> Result<CheckInRecord> {
        let admin = self.auth.require_admin(admin_id).await?;
        // The target must be a known user.
        let _ = self.auth.identity().resolve(user_id).await?;
        let item = self.get_item_internal(item_id).await?;

        match Self::evaluate(&admin, &item, now) {
            Decision::Allow => {}
            Decision::Deny(reason) => return Err(Self::denial_error(reason, item_id)),
        }

        let record = self.check_ins.record(item_id, user_id, item.points, now).await?;
        log_admin_action(admin_id, "check_in_user", Some(&user_id.to_string()), Some(&item_id.to_string()));

        Ok(record)
    }

    /// Create a check-in item (admin only)
    pub async fn create_item(&self, admin_id: i64, request: CreateCheckInItemRequest) -> Result<CheckInItem> {
        self.auth.require_admin(admin_id).await?;

        if request.start_time >= request.end_time {
            return Err(HackHubError::InvalidInput(
                "Check-in window must start before it ends".to_string(),
            ));
        }

        let item = self.check_ins.create_item(request).await?;
        log_admin_action(admin_id, "create_check_in_item", Some(&item.id.to_string()), None);

        Ok(item)
    }

    /// Update a check-in item (admin only)
    pub async fn update_item(&self, admin_id: i64, item_id: i64, request: UpdateCheckInItemRequest) -> Result<CheckInItem> {
        self.auth.require_admin(admin_id).await?;
        let current = self.get_item_internal(item_id).await?;

        // Validate the effective window before touching storage.
        let start = request.start_time.unwrap_or(current.start_time);
        let end = request.end_time.unwrap_or(current.end_time);
        if start >= end {
            return Err(HackHubError::InvalidInput(
                "Check-in window must start before it ends".to_string(),
            ));
        }

        let item = self.check_ins.update_item(item_id, request).await?;
        log_admin_action(admin_id, "update_check_in_item", Some(&item_id.to_string()), None);

        Ok(item)
    }

    /// Delete a check-in item (admin only)
    pub async fn delete_item(&self, admin_id: i64, item_id: i64) -> Result<()> {
        self.auth.require_admin(admin_id).await?;
        let _ = self.get_item_internal(item_id).await?;

        self.check_ins.delete_item(item_id).await?;
        log_admin_action(admin_id, "delete_check_in_item", Some(&item_id.to_string()), None);

        Ok(())
    }

    /// Get a check-in item (public read)
    pub async fn get_item(&self, caller_id: i64, item_id: i64) -> Result<CheckInItem> {
        self.auth
            .authorize(caller_id, Operation::Read, Target::PublicListing)
            .await?;

        self.get_item_internal(item_id).await
    }

    /// List check-in items (public listing)
    pub async fn list_items(&self, caller_id: i64) -> Result<Vec<CheckInItem>> {
        self.auth
            .authorize(caller_id, Operation::List, Target::PublicListing)
            .await?;

        self.check_ins.list_items().await
    }

    /// The caller's own check-in history
    pub async fn my_history(&self, caller_id: i64) -> Result<Vec<CheckInRecord>> {
        let caller = self.auth.identity().resolve(caller_id).await?;
        debug!(user_id = caller.user_id, "Fetching own check-in history");

        self.check_ins.records_for_user(caller.user_id).await
    }

    /// The caller's accumulated points
    pub async fn my_points(&self, caller_id: i64) -> Result<i64> {
        let caller = self.auth.identity().resolve(caller_id).await?;
        self.check_ins.total_points(caller.user_id).await
    }

    /// Any user's check-in history (admin only)
    pub async fn history_for(&self, admin_id: i64, user_id: i64) -> Result<Vec<CheckInRecord>> {
        self.auth.require_admin(admin_id).await?;
        self.check_ins.records_for_user(user_id).await
    }

    async fn get_item_internal(&self, item_id: i64) -> Result<CheckInItem> {
        self.check_ins
            .find_item_by_id(item_id)
            .await?
            .ok_or(HackHubError::CheckInItemNotFound { item_id })
    }

    fn denial_error(reason: DenyReason, item_id: i64) -> HackHubError {
        match reason {
            DenyReason::OutOfWindow => HackHubError::OutOfWindow { item_id },
            DenyReason::SelfCheckInDisabled => HackHubError::SelfCheckInDisabled { item_id },
            DenyReason::InsufficientAccess => HackHubError::InsufficientAccess { item_id },
            DenyReason::NotOwner | DenyReason::NoTeam => HackHubError::NotOwner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use crate::models::user::{UserRole, AdmissionStatus, AccessLevel};

    fn identity(role: UserRole, level: AccessLevel) -> Identity {
        Identity {
            user_id: 42,
            role,
            admission_status: AdmissionStatus::Admitted,
            access_level: level,
            team_id: None,
        }
    }

    fn item(start: i64, end: i64, level: AccessLevel, self_check_in: bool) -> CheckInItem {
        CheckInItem {
            id: 7,
            name: "opening ceremony".to_string(),
            start_time: Utc.timestamp_opt(start, 0).unwrap(),
            end_time: Utc.timestamp_opt(end, 0).unwrap(),
            points: 25,
            access_level: level,
            enable_self_check_in: self_check_in,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_participant_allowed_inside_window() {
        let caller = identity(UserRole::Participant, AccessLevel::General);
        let item = item(1000, 2000, AccessLevel::General, true);

        assert_eq!(CheckInService::evaluate(&caller, &item, at(1500)), Decision::Allow);
    }

    #[test]
    fn test_denied_outside_window() {
        let caller = identity(UserRole::Participant, AccessLevel::General);
        let item = item(1000, 2000, AccessLevel::General, true);

        assert_eq!(
            CheckInService::evaluate(&caller, &item, at(2500)),
            Decision::Deny(DenyReason::OutOfWindow)
        );
        assert_eq!(
            CheckInService::evaluate(&caller, &item, at(500)),
            Decision::Deny(DenyReason::OutOfWindow)
        );
    }

    #[test]
    fn test_window_is_half_open() {
        let caller = identity(UserRole::Participant, AccessLevel::General);
        let item = item(1000, 2000, AccessLevel::General, true);

        assert_eq!(CheckInService::evaluate(&caller, &item, at(1000)), Decision::Allow);
        assert_eq!(
            CheckInService::evaluate(&caller, &item, at(2000)),
            Decision::Deny(DenyReason::OutOfWindow)
        );
    }

    #[test]
    fn test_self_check_in_disabled_denies_participant_but_not_admin() {
        let participant = identity(UserRole::Participant, AccessLevel::General);
        let admin = identity(UserRole::Admin, AccessLevel::Organizer);
        let item = item(1000, 2000, AccessLevel::General, false);

        assert_eq!(
            CheckInService::evaluate(&participant, &item, at(1500)),
            Decision::Deny(DenyReason::SelfCheckInDisabled)
        );
        assert_eq!(CheckInService::evaluate(&admin, &item, at(1500)), Decision::Allow);
    }

    #[test]
    fn test_window_applies_to_admins_too() {
        let admin = identity(UserRole::Admin, AccessLevel::Organizer);
        let item = item(1000, 2000, AccessLevel::General, false);

        assert_eq!(
            CheckInService::evaluate(&admin, &item, at(2500)),
            Decision::Deny(DenyReason::OutOfWindow)
        );
    }

    #[test]
    fn test_access_tier_must_meet_item_requirement() {
        let general = identity(UserRole::Participant, AccessLevel::General);
        let mentor = identity(UserRole::Participant, AccessLevel::Mentor);
        let item = item(1000, 2000, AccessLevel::Mentor, true);

        assert_eq!(
            CheckInService::evaluate(&general, &item, at(1500)),
            Decision::Deny(DenyReason::InsufficientAccess)
        );
        assert_eq!(CheckInService::evaluate(&mentor, &item, at(1500)), Decision::Allow);
    }

    #[test]
    fn test_admin_bypasses_tier_requirement() {
        let admin = identity(UserRole::Admin, AccessLevel::General);
        let item = item(1000, 2000, AccessLevel::Organizer, true);

        assert_eq!(CheckInService::evaluate(&admin, &item, at(1500)), Decision::Allow);
    }

    proptest! {
        #[test]
        fn prop_window_bounds_eligibility(now in 0i64..4000) {
            let caller = identity(UserRole::Participant, AccessLevel::General);
            let item = item(1000, 2000, AccessLevel::General, true);
            let decision = CheckInService::evaluate(&caller, &item, at(now));

            if (1000..2000).contains(&now) {
                prop_assert_eq!(decision, Decision::Allow);
            } else {
                prop_assert_eq!(decision, Decision::Deny(DenyReason::OutOfWindow));
            }
        }
    }
}
