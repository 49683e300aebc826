//! Core business entities, types and traits

pub mod collector;
pub mod repositories;
pub mod reward;
pub mod scoring;
pub mod submission;
pub mod user;
pub mod waste;

// Re-export commonly used types
pub use collector::{CollectorRequest, CollectorRequestRepository, PendingRequest, RequestStatus};
pub use repositories::RepositoryProvider;
pub use reward::{RedemptionReceipt, RewardCatalogEntry, RewardRedemption, RewardRepository};
pub use scoring::{ScoringConfig, ScoringEngine};
pub use submission::{Committed, NewSubmission, SubmissionRepository, WasteSubmission};
pub use user::{level_for_points, NewUser, User, UserRepository, UserRole};
pub use waste::{map_label, Category, Classification, ClassificationSource};

// Re-export error types for convenience
pub use crate::shared::{DomainError, DomainResult};
