//! Create `pass_rental_usage` join table.
//!
//! `hours_deducted` stores the exact amount charged so deletion can restore
//! it without re-deriving from the rental's (possibly edited) times.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PassRentalUsage::Table)
                    .if_not_exists()
                    .col(integer(PassRentalUsage::PassId).not_null())
                    .col(integer(PassRentalUsage::RentalId).not_null())
                    .col(double(PassRentalUsage::HoursDeducted).not_null())
                    .primary_key(
                        Index::create()
                            .col(PassRentalUsage::PassId)
                            .col(PassRentalUsage::RentalId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pass_rental_usage_pass")
                            .from(PassRentalUsage::Table, PassRentalUsage::PassId)
                            .to(Pass::Table, Pass::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pass_rental_usage_rental")
                            .from(PassRentalUsage::Table, PassRentalUsage::RentalId)
                            .to(Rental::Table, Rental::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PassRentalUsage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PassRentalUsage {
    Table,
    PassId,
    RentalId,
    HoursDeducted,
}

#[derive(DeriveIden)]
enum Pass {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Rental {
    Table,
    Id,
}
