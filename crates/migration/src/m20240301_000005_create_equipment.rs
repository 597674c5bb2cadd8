//! Create `equipment` table with FK to `equipment_type`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(pk_auto(Equipment::Id))
                    .col(integer(Equipment::TypeId).not_null())
                    .col(string_len(Equipment::Model, 100).not_null())
                    .col(boolean(Equipment::IsAvailable).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_type")
                            .from(Equipment::Table, Equipment::TypeId)
                            .to(EquipmentType::Table, EquipmentType::Id)
                            // Cascades are handled by the service layer
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Equipment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Equipment {
    Table,
    Id,
    TypeId,
    Model,
    IsAvailable,
}

#[derive(DeriveIden)]
enum EquipmentType {
    Table,
    Id,
}
