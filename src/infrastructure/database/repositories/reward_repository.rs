//! SeaORM implementation of RewardRepository
//!
//! `redeem` inserts the redemption row and debits the user's points in one
//! database transaction, keeping the ledger sum invariant intact.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::reward::{
    RedemptionReceipt, RewardCatalogEntry, RewardRedemption, RewardRepository,
};
use crate::shared::{DomainError, DomainResult};

use super::super::entities::{redemption, reward, user};
use super::user_repository::db_err;

pub struct SeaOrmRewardRepository {
    db: DatabaseConnection,
}

impl SeaOrmRewardRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn reward_model_to_domain(m: reward::Model) -> RewardCatalogEntry {
    RewardCatalogEntry {
        id: m.id,
        title: m.title,
        description: m.description,
        cost_points: m.cost_points,
        category: m.category,
        is_available: m.is_available,
    }
}

fn redemption_model_to_domain(m: redemption::Model) -> RewardRedemption {
    RewardRedemption {
        id: m.id,
        user_id: m.user_id,
        reward_id: m.reward_id,
        points_spent: m.points_spent,
        redeemed_at: m.redeemed_at,
    }
}

#[async_trait]
impl RewardRepository for SeaOrmRewardRepository {
    async fn list(&self) -> DomainResult<Vec<RewardCatalogEntry>> {
        let models = reward::Entity::find()
            .order_by_asc(reward::Column::CostPoints)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(reward_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RewardCatalogEntry>> {
        let model = reward::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(reward_model_to_domain))
    }

    async fn redeem(&self, user_id: &str, reward_id: i32) -> DomainResult<RedemptionReceipt> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let reward_model = reward::Entity::find_by_id(reward_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("reward", "id", reward_id.to_string()))?;

        if !reward_model.is_available {
            return Err(DomainError::Validation(format!(
                "reward '{}' is not available",
                reward_model.title
            )));
        }

        let user_model = user::Entity::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("user", "id", user_id))?;

        if user_model.total_points < reward_model.cost_points {
            return Err(DomainError::Validation(format!(
                "insufficient points: have {}, need {}",
                user_model.total_points, reward_model.cost_points
            )));
        }

        let row = redemption::ActiveModel {
            user_id: Set(user_id.to_string()),
            reward_id: Set(reward_id),
            points_spent: Set(reward_model.cost_points),
            redeemed_at: Set(Utc::now()),
            ..Default::default()
        };
        let inserted = row.insert(&txn).await.map_err(db_err)?;

        let remaining = user_model.total_points - reward_model.cost_points;

        let mut active: user::ActiveModel = user_model.into();
        active.total_points = Set(remaining);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        Ok(RedemptionReceipt {
            redemption_id: inserted.id,
            reward_id,
            points_spent: reward_model.cost_points,
            remaining_points: remaining,
        })
    }

    async fn redemptions_for_user(&self, user_id: &str) -> DomainResult<Vec<RewardRedemption>> {
        let models = redemption::Entity::find()
            .filter(redemption::Column::UserId.eq(user_id))
            .order_by_desc(redemption::Column::RedeemedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(redemption_model_to_domain).collect())
    }

    async fn create(&self, entry: RewardCatalogEntry) -> DomainResult<RewardCatalogEntry> {
        let row = reward::ActiveModel {
            title: Set(entry.title),
            description: Set(entry.description),
            cost_points: Set(entry.cost_points),
            category: Set(entry.category),
            is_available: Set(entry.is_available),
            ..Default::default()
        };
        let inserted = row.insert(&self.db).await.map_err(db_err)?;
        Ok(reward_model_to_domain(inserted))
    }

    async fn count(&self) -> DomainResult<u64> {
        reward::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
