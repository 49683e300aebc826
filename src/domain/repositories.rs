//! Repository provider
//!
//! Injectable storage boundary: services depend on this trait, never on a
//! concrete store, so the SeaORM-backed provider and the in-memory provider
//! are interchangeable.

use crate::domain::collector::CollectorRequestRepository;
use crate::domain::reward::RewardRepository;
use crate::domain::submission::SubmissionRepository;
use crate::domain::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn submissions(&self) -> &dyn SubmissionRepository;
    fn collector_requests(&self) -> &dyn CollectorRequestRepository;
    fn rewards(&self) -> &dyn RewardRepository;
}
