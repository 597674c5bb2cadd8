//! Create `pass_type` table: the template defining a pass's limits and price.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PassType::Table)
                    .if_not_exists()
                    .col(pk_auto(PassType::Id))
                    .col(string_len(PassType::Name, 100).not_null())
                    .col(integer(PassType::LimitLifts).not_null())
                    .col(integer(PassType::LimitHours).not_null())
                    .col(integer(PassType::Price).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PassType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PassType {
    Table,
    Id,
    Name,
    LimitLifts,
    LimitHours,
    Price,
}
