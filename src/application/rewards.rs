//! Reward catalog and redemption service
//!
//! Redemptions debit the same per-user balance submissions credit, so they
//! go through the same per-user lock. The repository applies the debit and
//! the redemption record in one transaction.

use std::sync::Arc;

use metrics::counter;
use tracing::info;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::reward::{RedemptionReceipt, RewardCatalogEntry, RewardRedemption};
use crate::shared::DomainResult;

use super::locks::UserLocks;

pub struct RewardService {
    repos: Arc<dyn RepositoryProvider>,
    locks: Arc<UserLocks>,
}

impl RewardService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, locks: Arc<UserLocks>) -> Self {
        Self { repos, locks }
    }

    pub async fn catalog(&self) -> DomainResult<Vec<RewardCatalogEntry>> {
        self.repos.rewards().list().await
    }

    /// Redeem a reward, debiting the user's points.
    pub async fn redeem(&self, user_id: &str, reward_id: i32) -> DomainResult<RedemptionReceipt> {
        let _guard = self.locks.acquire(user_id).await;

        let receipt = self.repos.rewards().redeem(user_id, reward_id).await?;

        counter!("ecosort_redemptions_total").increment(1);
        info!(
            user_id,
            reward_id,
            points_spent = receipt.points_spent,
            remaining = receipt.remaining_points,
            "reward redeemed"
        );
        Ok(receipt)
    }

    pub async fn redemptions(&self, user_id: &str) -> DomainResult<Vec<RewardRedemption>> {
        self.repos.rewards().redemptions_for_user(user_id).await
    }

    /// Admin-only catalog management.
    pub async fn add_catalog_entry(
        &self,
        entry: RewardCatalogEntry,
    ) -> DomainResult<RewardCatalogEntry> {
        let entry = self.repos.rewards().create(entry).await?;
        info!(reward_id = entry.id, title = %entry.title, "reward added to catalog");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reward::RewardRepository;
    use crate::domain::submission::{NewSubmission, SubmissionRepository};
    use crate::domain::user::{NewUser, User, UserRepository, UserRole};
    use crate::domain::waste::{Category, ClassificationSource};
    use crate::infrastructure::MemoryStore;
    use crate::shared::DomainError;

    async fn seed_user_with_points(repos: &MemoryStore, points: i32) -> User {
        let user = repos
            .users()
            .create(NewUser {
                username: "asha".to_string(),
                email: "asha@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::User,
                qr_token: "QR-1".to_string(),
            })
            .await
            .unwrap();

        if points > 0 {
            repos
                .submissions()
                .append(NewSubmission {
                    user_id: user.id.clone(),
                    collector_id: None,
                    waste_label: "plastic_bottle".to_string(),
                    predicted_category: Category::Dry,
                    declared_category: Category::Dry,
                    confidence: 0.9,
                    points_earned: points,
                    source: ClassificationSource::Remote,
                    qr_token: "QR-1".to_string(),
                    image_ref: None,
                })
                .await
                .unwrap();
        }
        user
    }

    async fn seed_reward(repos: &MemoryStore, cost: i32, available: bool) -> RewardCatalogEntry {
        repos
            .rewards()
            .create(RewardCatalogEntry {
                id: 0,
                title: "Compost kit".to_string(),
                description: Some("Starter compost bin".to_string()),
                cost_points: cost,
                category: "merchandise".to_string(),
                is_available: available,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn redeem_debits_points_and_records_the_redemption() {
        let repos = Arc::new(MemoryStore::new());
        let service = RewardService::new(Arc::clone(&repos) as _, Arc::new(UserLocks::new()));
        let user = seed_user_with_points(&repos, 150).await;
        let reward = seed_reward(&repos, 100, true).await;

        let receipt = service.redeem(&user.id, reward.id).await.unwrap();
        assert_eq!(receipt.points_spent, 100);
        assert_eq!(receipt.remaining_points, 50);

        let after = repos.users().find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(after.total_points, 50);

        let history = service.redemptions(&user.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].points_spent, 100);
    }

    #[tokio::test]
    async fn insufficient_points_are_rejected_without_debit() {
        let repos = Arc::new(MemoryStore::new());
        let service = RewardService::new(Arc::clone(&repos) as _, Arc::new(UserLocks::new()));
        let user = seed_user_with_points(&repos, 40).await;
        let reward = seed_reward(&repos, 100, true).await;

        let err = service.redeem(&user.id, reward.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let after = repos.users().find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(after.total_points, 40);
        assert!(service.redemptions(&user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_rewards_cannot_be_redeemed() {
        let repos = Arc::new(MemoryStore::new());
        let service = RewardService::new(Arc::clone(&repos) as _, Arc::new(UserLocks::new()));
        let user = seed_user_with_points(&repos, 500).await;
        let reward = seed_reward(&repos, 100, false).await;

        assert!(matches!(
            service.redeem(&user.id, reward.id).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn unknown_reward_is_not_found() {
        let repos = Arc::new(MemoryStore::new());
        let service = RewardService::new(Arc::clone(&repos) as _, Arc::new(UserLocks::new()));
        let user = seed_user_with_points(&repos, 500).await;

        assert!(matches!(
            service.redeem(&user.id, 9999).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn catalog_lists_cheapest_first() {
        let repos = Arc::new(MemoryStore::new());
        let service = RewardService::new(Arc::clone(&repos) as _, Arc::new(UserLocks::new()));
        seed_reward(&repos, 300, true).await;
        seed_reward(&repos, 50, true).await;

        let catalog = service.catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog[0].cost_points <= catalog[1].cost_points);
    }
}
