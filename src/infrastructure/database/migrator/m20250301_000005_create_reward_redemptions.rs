//! Create reward_redemptions table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;
use super::m20250301_000004_create_rewards::Rewards;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RewardRedemptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RewardRedemptions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RewardRedemptions::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardRedemptions::RewardId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardRedemptions::PointsSpent)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardRedemptions::RedeemedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reward_redemptions_user")
                            .from(RewardRedemptions::Table, RewardRedemptions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reward_redemptions_reward")
                            .from(RewardRedemptions::Table, RewardRedemptions::RewardId)
                            .to(Rewards::Table, Rewards::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reward_redemptions_user")
                    .table(RewardRedemptions::Table)
                    .col(RewardRedemptions::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RewardRedemptions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum RewardRedemptions {
    Table,
    Id,
    UserId,
    RewardId,
    PointsSpent,
    RedeemedAt,
}
