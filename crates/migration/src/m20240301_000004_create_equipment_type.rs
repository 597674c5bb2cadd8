//! Create `equipment_type` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EquipmentType::Table)
                    .if_not_exists()
                    .col(pk_auto(EquipmentType::Id))
                    .col(string_len(EquipmentType::Name, 100).not_null())
                    .col(string_len_null(EquipmentType::Description, 200))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EquipmentType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum EquipmentType {
    Table,
    Id,
    Name,
    Description,
}
