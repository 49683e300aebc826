//! Reward catalog and redemption DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::reward::{RedemptionReceipt, RewardCatalogEntry, RewardRedemption};

/// Admin request to add a catalog entry
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "title": "Grocery voucher",
    "description": "100 off at partner stores",
    "cost_points": 500,
    "category": "voucher"
}))]
pub struct CreateRewardRequest {
    #[validate(length(min = 1, max = 100, message = "title must be 1-100 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "cost_points must be positive"))]
    pub cost_points: i32,
    #[validate(length(min = 1, max = 50, message = "category must be 1-50 characters"))]
    pub category: String,
}

/// Reward catalog entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RewardDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub cost_points: i32,
    pub category: String,
    pub is_available: bool,
}

impl From<&RewardCatalogEntry> for RewardDto {
    fn from(r: &RewardCatalogEntry) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            description: r.description.clone(),
            cost_points: r.cost_points,
            category: r.category.clone(),
            is_available: r.is_available,
        }
    }
}

/// Outcome of a successful redemption
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RedemptionReceiptDto {
    pub redemption_id: i32,
    pub reward_id: i32,
    pub points_spent: i32,
    pub remaining_points: i32,
}

impl From<&RedemptionReceipt> for RedemptionReceiptDto {
    fn from(r: &RedemptionReceipt) -> Self {
        Self {
            redemption_id: r.redemption_id,
            reward_id: r.reward_id,
            points_spent: r.points_spent,
            remaining_points: r.remaining_points,
        }
    }
}

/// One past redemption
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RedemptionDto {
    pub id: i32,
    pub reward_id: i32,
    pub points_spent: i32,
    pub redeemed_at: DateTime<Utc>,
}

impl From<&RewardRedemption> for RedemptionDto {
    fn from(r: &RewardRedemption) -> Self {
        Self {
            id: r.id,
            reward_id: r.reward_id,
            points_spent: r.points_spent,
            redeemed_at: r.redeemed_at,
        }
    }
}
