//! Reward catalog and redemption entities

use chrono::{DateTime, Utc};

/// Catalog entry users can spend points on
#[derive(Debug, Clone)]
pub struct RewardCatalogEntry {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Cost in points
    pub cost_points: i32,
    /// Free-form grouping, e.g. `voucher`, `merchandise`
    pub category: String,
    pub is_available: bool,
}

/// Persisted redemption ledger entry. Together with submissions this keeps
/// the invariant: total_points == sum(points_earned) - sum(points_spent).
#[derive(Debug, Clone)]
pub struct RewardRedemption {
    pub id: i32,
    pub user_id: String,
    pub reward_id: i32,
    pub points_spent: i32,
    pub redeemed_at: DateTime<Utc>,
}

/// Outcome of a successful redemption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionReceipt {
    pub redemption_id: i32,
    pub reward_id: i32,
    pub points_spent: i32,
    pub remaining_points: i32,
}
