use async_trait::async_trait;

use super::model::{RedemptionReceipt, RewardCatalogEntry, RewardRedemption};
use crate::shared::DomainResult;

#[async_trait]
pub trait RewardRepository: Send + Sync {
    async fn list(&self) -> DomainResult<Vec<RewardCatalogEntry>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RewardCatalogEntry>>;

    /// Record the redemption and debit the user's points in one transaction.
    /// `Validation` if the reward is unavailable or the balance is too low.
    async fn redeem(&self, user_id: &str, reward_id: i32) -> DomainResult<RedemptionReceipt>;

    async fn redemptions_for_user(&self, user_id: &str) -> DomainResult<Vec<RewardRedemption>>;

    /// Insert a catalog entry (bootstrap/seeding and admin management).
    async fn create(&self, entry: RewardCatalogEntry) -> DomainResult<RewardCatalogEntry>;

    async fn count(&self) -> DomainResult<u64>;
}
