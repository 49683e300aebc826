//! API data transfer objects

pub mod auth;
pub mod collector;
pub mod common;
pub mod reward;
pub mod submission;
pub mod user;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use collector::{CollectorRequestDto, PendingRequestDto};
pub use common::{
    ApiError, ApiResponse, EmptyData, PaginatedResponse, PaginationParams, ValidatedJson,
};
pub use reward::{CreateRewardRequest, RedemptionDto, RedemptionReceiptDto, RewardDto};
pub use submission::{ClassificationDto, SubmissionDto, SubmissionResultDto};
pub use user::{leaderboard_rows, CategoryCountsDto, LeaderboardEntryDto, UserProfileDto, UserStatsDto};
