//! Waste submission entity
//!
//! Append-only; rows are never updated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "waste_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: String,

    /// Collector who verified the drop-off, if any
    #[sea_orm(nullable)]
    pub collector_id: Option<String>,

    /// Normalized waste kind, e.g. `plastic_bottle`
    pub waste_label: String,

    /// Category: dry, wet, hazardous
    pub predicted_category: String,

    /// Category declared by the user at submission time
    pub declared_category: String,

    #[sea_orm(column_type = "Double")]
    pub confidence: f64,

    /// Signed point delta applied to the user's total
    pub points_earned: i32,

    /// Classification source: remote, synthetic
    pub source: String,

    /// QR token scanned as proof of location/identity
    pub qr_token: String,

    #[sea_orm(nullable)]
    pub image_ref: Option<String>,

    pub submitted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
