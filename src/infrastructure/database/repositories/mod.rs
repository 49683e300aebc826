//! SeaORM repository implementations

pub mod collector_request_repository;
pub mod repository_provider;
pub mod reward_repository;
pub mod submission_repository;
pub mod user_repository;

pub use collector_request_repository::SeaOrmCollectorRequestRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reward_repository::SeaOrmRewardRepository;
pub use submission_repository::SeaOrmSubmissionRepository;
pub use user_repository::SeaOrmUserRepository;
