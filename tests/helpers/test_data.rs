//! Test data helpers for seeding fixtures
//!
//! Seed functions for users, teams, prizes and check-in items used across
//! the integration tests.

use chrono::{DateTime, TimeZone, Utc};
use HackHub::database::DatabaseService;
use HackHub::models::user::{User, UserRole, AccessLevel, CreateUserRequest};
use HackHub::models::team::{Team, CreateTeamRequest};
use HackHub::models::prize::{Prize, CreatePrizeRequest};
use HackHub::models::checkin::{CheckInItem, CreateCheckInItemRequest};

/// Seed a participant user
pub async fn seed_participant(db: &DatabaseService, email: &str) -> User {
    db.users
        .create(CreateUserRequest {
            email: email.to_string(),
            first_name: Some("Test".to_string()),
            last_name: Some("Participant".to_string()),
            role: Some(UserRole::Participant),
            access_level: Some(AccessLevel::General),
        })
        .await
        .expect("Failed to seed participant")
}

/// Seed an admin user
pub async fn seed_admin(db: &DatabaseService, email: &str) -> User {
    db.users
        .create(CreateUserRequest {
            email: email.to_string(),
            first_name: Some("Test".to_string()),
            last_name: Some("Admin".to_string()),
            role: Some(UserRole::Admin),
            access_level: Some(AccessLevel::Organizer),
        })
        .await
        .expect("Failed to seed admin")
}

/// Seed a team with the given members
pub async fn seed_team(db: &DatabaseService, name: &str, member_ids: &[i64]) -> Team {
    let team = db
        .teams
        .create(CreateTeamRequest { name: name.to_string() })
        .await
        .expect("Failed to seed team");

    for user_id in member_ids {
        db.teams
            .add_member(team.id, *user_id)
            .await
            .expect("Failed to add team member");
    }

    team
}

/// Seed a prize for an event
pub async fn seed_prize(db: &DatabaseService, event_id: i64, name: &str) -> Prize {
    db.prizes
        .create(CreatePrizeRequest {
            event_id,
            provider: "Acme Corp".to_string(),
            name: name.to_string(),
            description: None,
        })
        .await
        .expect("Failed to seed prize")
}

/// Seed a check-in item with a window given in epoch seconds
pub async fn seed_check_in_item(
    db: &DatabaseService,
    name: &str,
    start: i64,
    end: i64,
    points: i32,
    access_level: AccessLevel,
    enable_self_check_in: bool,
) -> CheckInItem {
    db.check_ins
        .create_item(CreateCheckInItemRequest {
            name: name.to_string(),
            start_time: ts(start),
            end_time: ts(end),
            points,
            access_level: Some(access_level),
            enable_self_check_in,
        })
        .await
        .expect("Failed to seed check-in item")
}

/// Epoch seconds to a UTC timestamp
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}
