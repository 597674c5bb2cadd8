//! Create `lift` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lift::Table)
                    .if_not_exists()
                    .col(pk_auto(Lift::Id))
                    .col(string_len(Lift::Name, 100).not_null())
                    .col(integer(Lift::Height).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Lift::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Lift {
    Table,
    Id,
    Name,
    Height,
}
