//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, UserRepository, TeamRepository, ProjectRepository, PrizeRepository, CheckInRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub teams: TeamRepository,
    pub projects: ProjectRepository,
    pub prizes: PrizeRepository,
    pub check_ins: CheckInRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            prizes: PrizeRepository::new(pool.clone()),
            check_ins: CheckInRepository::new(pool),
        }
    }
}
