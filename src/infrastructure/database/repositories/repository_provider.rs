//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::collector::CollectorRequestRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reward::RewardRepository;
use crate::domain::submission::SubmissionRepository;
use crate::domain::user::UserRepository;

use super::collector_request_repository::SeaOrmCollectorRequestRepository;
use super::reward_repository::SeaOrmRewardRepository;
use super::submission_repository::SeaOrmSubmissionRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    submissions: SeaOrmSubmissionRepository,
    collector_requests: SeaOrmCollectorRequestRepository,
    rewards: SeaOrmRewardRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            submissions: SeaOrmSubmissionRepository::new(db.clone()),
            collector_requests: SeaOrmCollectorRequestRepository::new(db.clone()),
            rewards: SeaOrmRewardRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn submissions(&self) -> &dyn SubmissionRepository {
        &self.submissions
    }

    fn collector_requests(&self) -> &dyn CollectorRequestRepository {
        &self.collector_requests
    }

    fn rewards(&self) -> &dyn RewardRepository {
        &self.rewards
    }
}
