//! Create collector_requests table

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CollectorRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CollectorRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CollectorRequests::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CollectorRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(CollectorRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CollectorRequests::ResolvedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collector_requests_user")
                            .from(CollectorRequests::Table, CollectorRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Pending-per-user uniqueness check
        manager
            .create_index(
                Index::create()
                    .name("idx_collector_requests_user_status")
                    .table(CollectorRequests::Table)
                    .col(CollectorRequests::UserId)
                    .col(CollectorRequests::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CollectorRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CollectorRequests {
    Table,
    Id,
    UserId,
    Status,
    CreatedAt,
    ResolvedAt,
}
