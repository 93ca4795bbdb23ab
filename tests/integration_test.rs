//! Service integration tests
//!
//! End-to-end tests of the authorization, invariant, admission and
//! check-in engines against a real PostgreSQL database. They are marked
//! `#[ignore]` because they need Docker (testcontainers) or a
//! `TEST_DATABASE_URL` pointing at a disposable database; run them with
//! `cargo test -- --ignored`.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;
use helpers::*;

use HackHub::config::Settings;
use HackHub::database::DatabaseService;
use HackHub::models::user::{AdmissionStatus, AccessLevel};
use HackHub::services::{ServiceFactory, ProjectAttrs};
use HackHub::HackHubError;

const EVENT: i64 = 1;

async fn setup() -> (TestDatabase, DatabaseService, ServiceFactory) {
    let test_db = TestDatabase::new().await.expect("test database");
    let db = DatabaseService::new(test_db.pool.clone());
    let services = ServiceFactory::new(db.clone(), Settings::default());
    (test_db, db, services)
}

fn attrs(name: &str) -> ProjectAttrs {
    ProjectAttrs {
        name: name.to_string(),
        description: None,
        repo_url: None,
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_admission_flow_last_write_wins() {
    let (_test_db, db, services) = setup().await;

    let admin = seed_admin(&db, "admin@hackhub.test").await;
    let user = seed_participant(&db, "alice@hackhub.test").await;
    assert_eq!(user.admission_status, AdmissionStatus::Pending);

    let user = services.admission_service.admit(admin.id, user.id).await.unwrap();
    assert_eq!(user.admission_status, AdmissionStatus::Admitted);

    // Default policy: a later reject overwrites the earlier admit.
    let user = services.admission_service.reject(admin.id, user.id).await.unwrap();
    assert_eq!(user.admission_status, AdmissionStatus::Rejected);

    // Re-applying the same decision is an idempotent success.
    let user = services.admission_service.reject(admin.id, user.id).await.unwrap();
    assert_eq!(user.admission_status, AdmissionStatus::Rejected);
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_admission_requires_admin() {
    let (_test_db, db, services) = setup().await;

    let alice = seed_participant(&db, "alice@hackhub.test").await;
    let bob = seed_participant(&db, "bob@hackhub.test").await;

    let result = services.admission_service.admit(alice.id, bob.id).await;
    assert_matches!(result, Err(HackHubError::NotOwner));

    let result = services.admission_service.admit(alice.id, 999_999).await;
    assert_matches!(result, Err(HackHubError::NotOwner));
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_admission_strict_policy_rejects_overwrite() {
    let (test_db, db, _) = setup().await;

    let mut settings = Settings::default();
    settings.admission.allow_overwrite = false;
    let services = ServiceFactory::new(DatabaseService::new(test_db.pool.clone()), settings);

    let admin = seed_admin(&db, "admin@hackhub.test").await;
    let user = seed_participant(&db, "alice@hackhub.test").await;

    services.admission_service.admit(admin.id, user.id).await.unwrap();

    let result = services.admission_service.reject(admin.id, user.id).await;
    assert_matches!(result, Err(HackHubError::InvalidTransition { .. }));

    // Same decision still succeeds under the strict policy.
    let user = services.admission_service.admit(admin.id, user.id).await.unwrap();
    assert_eq!(user.admission_status, AdmissionStatus::Admitted);
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_one_project_per_team_per_event() {
    let (_test_db, db, services) = setup().await;

    let alice = seed_participant(&db, "alice@hackhub.test").await;
    let bob = seed_participant(&db, "bob@hackhub.test").await;
    seed_team(&db, "rustaceans", &[alice.id, bob.id]).await;

    services
        .project_service
        .create_project(alice.id, EVENT, attrs("raft from scratch"))
        .await
        .unwrap();

    // A teammate's second create for the same event violates the invariant.
    let result = services
        .project_service
        .create_project(bob.id, EVENT, attrs("another idea"))
        .await;
    assert_matches!(result, Err(HackHubError::DuplicateProject { .. }));

    // A different event is a different invariant scope.
    services
        .project_service
        .create_project(bob.id, EVENT + 1, attrs("another idea"))
        .await
        .unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_concurrent_project_creates_yield_single_project() {
    let (_test_db, db, services) = setup().await;

    let alice = seed_participant(&db, "alice@hackhub.test").await;
    let bob = seed_participant(&db, "bob@hackhub.test").await;
    let team = seed_team(&db, "rustaceans", &[alice.id, bob.id]).await;

    let svc_a = services.project_service.clone();
    let svc_b = services.project_service.clone();

    let (a, b) = tokio::join!(
        svc_a.create_project(alice.id, EVENT, attrs("raft from scratch")),
        svc_b.create_project(bob.id, EVENT, attrs("raft from scratch")),
    );

    // Exactly one attempt wins; the loser sees the same failure kind the
    // pre-check produces, whether it lost before or at commit time.
    let successes = [a.is_ok(), b.is_ok()].iter().filter(|&&ok| ok).count();
    assert_eq!(successes, 1);
    for result in [a, b] {
        if let Err(e) = result {
            assert_matches!(e, HackHubError::DuplicateProject { .. });
        }
    }

    let project = db
        .projects
        .find_by_team_and_event(team.id, EVENT)
        .await
        .unwrap();
    assert!(project.is_some());
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_project_creation_requires_team() {
    let (_test_db, db, services) = setup().await;

    let loner = seed_participant(&db, "loner@hackhub.test").await;

    let result = services
        .project_service
        .create_project(loner.id, EVENT, attrs("solo work"))
        .await;
    assert_matches!(result, Err(HackHubError::NoTeam { .. }));
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_cross_team_ownership_denied() {
    let (_test_db, db, services) = setup().await;

    let alice = seed_participant(&db, "alice@hackhub.test").await;
    let eve = seed_participant(&db, "eve@hackhub.test").await;
    let admin = seed_admin(&db, "admin@hackhub.test").await;
    seed_team(&db, "rustaceans", &[alice.id]).await;
    seed_team(&db, "gophers", &[eve.id]).await;

    let project = services
        .project_service
        .create_project(alice.id, EVENT, attrs("raft from scratch"))
        .await
        .unwrap();

    let result = services
        .project_service
        .delete_project(eve.id, project.id)
        .await;
    assert_matches!(result, Err(HackHubError::NotOwner));

    // Admins bypass ownership.
    services
        .project_service
        .delete_project(admin.id, project.id)
        .await
        .unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_my_project_ignores_forged_team_membership() {
    let (_test_db, db, services) = setup().await;

    let alice = seed_participant(&db, "alice@hackhub.test").await;
    let eve = seed_participant(&db, "eve@hackhub.test").await;
    seed_team(&db, "rustaceans", &[alice.id]).await;
    let eve_team = seed_team(&db, "gophers", &[eve.id]).await;

    let alice_project = services
        .project_service
        .create_project(alice.id, EVENT, attrs("raft from scratch"))
        .await
        .unwrap();
    services
        .project_service
        .create_project(eve.id, EVENT, attrs("impersonation toolkit"))
        .await
        .unwrap();

    // "My project" resolves through the caller's own membership: Eve's
    // resolution can only ever reach her own team's project.
    let eves_view = services.project_service.my_project(eve.id, EVENT).await.unwrap();
    assert_eq!(eves_view.project.team_id, eve_team.id);
    assert_ne!(eves_view.project.id, alice_project.id);

    let alices_view = services.project_service.my_project(alice.id, EVENT).await.unwrap();
    assert_eq!(alices_view.project.id, alice_project.id);

    // The same holds for "my team".
    let eves_team = services.team_service.my_team(eve.id).await.unwrap();
    assert_eq!(eves_team.id, eve_team.id);
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_prize_entry_is_idempotent() {
    let (_test_db, db, services) = setup().await;

    let alice = seed_participant(&db, "alice@hackhub.test").await;
    seed_team(&db, "rustaceans", &[alice.id]).await;
    let prize = seed_prize(&db, EVENT, "Best Infrastructure").await;

    let project = services
        .project_service
        .create_project(alice.id, EVENT, attrs("raft from scratch"))
        .await
        .unwrap();

    let first = services
        .project_service
        .enter_prize(alice.id, project.id, prize.id)
        .await
        .unwrap();
    let second = services
        .project_service
        .enter_prize(alice.id, project.id, prize.id)
        .await
        .unwrap();

    assert_eq!(first.prizes, vec![prize.id]);
    assert_eq!(second.prizes, first.prizes);
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_prize_entry_validates_references() {
    let (_test_db, db, services) = setup().await;

    let alice = seed_participant(&db, "alice@hackhub.test").await;
    seed_team(&db, "rustaceans", &[alice.id]).await;

    let project = services
        .project_service
        .create_project(alice.id, EVENT, attrs("raft from scratch"))
        .await
        .unwrap();

    let result = services
        .project_service
        .enter_prize(alice.id, project.id, 999_999)
        .await;
    assert_matches!(result, Err(HackHubError::PrizeNotFound { .. }));

    let result = services
        .project_service
        .enter_prize(alice.id, 999_999, 1)
        .await;
    assert_matches!(result, Err(HackHubError::ProjectNotFound { .. }));
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_check_in_window_and_flags() {
    let (_test_db, db, services) = setup().await;

    let admin = seed_admin(&db, "admin@hackhub.test").await;
    let alice = seed_participant(&db, "alice@hackhub.test").await;

    let open_item = seed_check_in_item(&db, "lunch", 1000, 2000, 10, AccessLevel::General, true).await;
    let staffed_item = seed_check_in_item(&db, "badge pickup", 1000, 2000, 5, AccessLevel::General, false).await;

    // In-window self check-in succeeds.
    let record = services
        .checkin_service
        .check_in(alice.id, open_item.id, ts(1500))
        .await
        .unwrap();
    assert_eq!(record.points_awarded, 10);

    // Out of window.
    let result = services
        .checkin_service
        .check_in(alice.id, open_item.id, ts(2500))
        .await;
    assert_matches!(result, Err(HackHubError::OutOfWindow { .. }));

    // Self check-in disabled: participant denied, admin may check the
    // participant in.
    let result = services
        .checkin_service
        .check_in(alice.id, staffed_item.id, ts(1500))
        .await;
    assert_matches!(result, Err(HackHubError::SelfCheckInDisabled { .. }));

    services
        .checkin_service
        .check_in_user(admin.id, staffed_item.id, alice.id, ts(1500))
        .await
        .unwrap();

    assert_eq!(services.checkin_service.my_points(alice.id).await.unwrap(), 15);
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_double_check_in_awards_points_once() {
    let (_test_db, db, services) = setup().await;

    let alice = seed_participant(&db, "alice@hackhub.test").await;
    let item = seed_check_in_item(&db, "workshop", 1000, 2000, 25, AccessLevel::General, true).await;

    services.checkin_service.check_in(alice.id, item.id, ts(1200)).await.unwrap();
    services.checkin_service.check_in(alice.id, item.id, ts(1300)).await.unwrap();

    assert_eq!(services.checkin_service.my_points(alice.id).await.unwrap(), 25);

    let history = services.checkin_service.my_history(alice.id).await.unwrap();
    assert_eq!(history.len(), 1);
    // The original record is preserved by the repeated check-in.
    assert_eq!(history[0].checked_in_at, ts(1200));
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_check_in_access_tier() {
    let (_test_db, db, services) = setup().await;

    let admin = seed_admin(&db, "admin@hackhub.test").await;
    let alice = seed_participant(&db, "alice@hackhub.test").await;
    let item = seed_check_in_item(&db, "mentor sync", 1000, 2000, 0, AccessLevel::Mentor, true).await;

    let result = services.checkin_service.check_in(alice.id, item.id, ts(1500)).await;
    assert_matches!(result, Err(HackHubError::InsufficientAccess { .. }));

    // Granting the tier makes the same check-in succeed.
    services
        .user_service
        .set_access_level(admin.id, alice.id, AccessLevel::Mentor)
        .await
        .unwrap();

    services.checkin_service.check_in(alice.id, item.id, ts(1500)).await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn test_membership_change_is_observed_immediately() {
    let (_test_db, db, services) = setup().await;

    let alice = seed_participant(&db, "alice@hackhub.test").await;
    let team = seed_team(&db, "rustaceans", &[alice.id]).await;

    let project = services
        .project_service
        .create_project(alice.id, EVENT, attrs("raft from scratch"))
        .await
        .unwrap();
    assert_eq!(project.team_id, team.id);

    // Identity is re-resolved per call: after leaving the team, the same
    // caller no longer owns the project.
    services.team_service.leave_team(alice.id).await.unwrap();

    let result = services
        .project_service
        .delete_project(alice.id, project.id)
        .await;
    assert_matches!(result, Err(HackHubError::NotOwner));
}
