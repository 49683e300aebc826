//! Reward catalog aggregate

pub mod model;
pub mod repository;

pub use model::{RedemptionReceipt, RewardCatalogEntry, RewardRedemption};
pub use repository::RewardRepository;
