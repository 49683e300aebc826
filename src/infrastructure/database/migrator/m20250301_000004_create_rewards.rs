//! Create rewards table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rewards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rewards::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rewards::Title).string().not_null())
                    .col(ColumnDef::new(Rewards::Description).string())
                    .col(ColumnDef::new(Rewards::CostPoints).integer().not_null())
                    .col(ColumnDef::new(Rewards::Category).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Rewards::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rewards::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Rewards {
    Table,
    Id,
    Title,
    Description,
    CostPoints,
    Category,
    IsAvailable,
}
