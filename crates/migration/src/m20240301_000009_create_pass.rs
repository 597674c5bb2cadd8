//! Create `pass` table.
//!
//! `remaining_lifts` and `remaining_hours` are seeded from the pass type at
//! purchase time and only ever change through consumption links.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pass::Table)
                    .if_not_exists()
                    .col(pk_auto(Pass::Id))
                    .col(integer(Pass::ClientId).not_null())
                    .col(integer(Pass::PassTypeId).not_null())
                    .col(date(Pass::PurchaseDate).not_null())
                    .col(date(Pass::ValidFrom).not_null())
                    .col(date(Pass::ValidTo).not_null())
                    .col(integer(Pass::RemainingLifts).not_null())
                    .col(double(Pass::RemainingHours).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pass_client")
                            .from(Pass::Table, Pass::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pass_pass_type")
                            .from(Pass::Table, Pass::PassTypeId)
                            .to(PassType::Table, PassType::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pass::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pass {
    Table,
    Id,
    ClientId,
    PassTypeId,
    PurchaseDate,
    ValidFrom,
    ValidTo,
    RemainingLifts,
    RemainingHours,
}

#[derive(DeriveIden)]
enum Client {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum PassType {
    Table,
    Id,
}
