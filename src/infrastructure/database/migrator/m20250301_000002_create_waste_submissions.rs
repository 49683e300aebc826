//! Create waste_submissions table

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
                    .table(WasteSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WasteSubmissions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WasteSubmissions::UserId).string().not_null())
                    .col(ColumnDef::new(WasteSubmissions::CollectorId).string())
                    .col(
                        ColumnDef::new(WasteSubmissions::WasteLabel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WasteSubmissions::PredictedCategory)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WasteSubmissions::DeclaredCategory)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WasteSubmissions::Confidence)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WasteSubmissions::PointsEarned)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WasteSubmissions::Source)
                            .string_len(20)
                            .not_null()
                            .default("remote"),
                    )
                    .col(ColumnDef::new(WasteSubmissions::QrToken).string().not_null())
                    .col(ColumnDef::new(WasteSubmissions::ImageRef).string())
                    .col(
                        ColumnDef::new(WasteSubmissions::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_waste_submissions_user")
                            .from(WasteSubmissions::Table, WasteSubmissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Per-user history scans
        manager
            .create_index(
                Index::create()
                    .name("idx_waste_submissions_user")
                    .table(WasteSubmissions::Table)
                    .col(WasteSubmissions::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WasteSubmissions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum WasteSubmissions {
    Table,
    Id,
    UserId,
    CollectorId,
    WasteLabel,
    PredictedCategory,
    DeclaredCategory,
    Confidence,
    PointsEarned,
    Source,
    QrToken,
    ImageRef,
    SubmittedAt,
}
