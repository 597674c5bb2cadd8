//! Create `rental_equipment` join table (composite PK).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RentalEquipment::Table)
                    .if_not_exists()
                    .col(integer(RentalEquipment::RentalId).not_null())
                    .col(integer(RentalEquipment::EquipmentId).not_null())
                    .primary_key(
                        Index::create()
                            .col(RentalEquipment::RentalId)
                            .col(RentalEquipment::EquipmentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rental_equipment_rental")
                            .from(RentalEquipment::Table, RentalEquipment::RentalId)
                            .to(Rental::Table, Rental::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rental_equipment_equipment")
                            .from(RentalEquipment::Table, RentalEquipment::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RentalEquipment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RentalEquipment {
    Table,
    RentalId,
    EquipmentId,
}

#[derive(DeriveIden)]
enum Rental {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Equipment {
    Table,
    Id,
}
