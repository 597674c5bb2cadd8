//! Create `lift_usage` table: one ride of a client on a lift.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LiftUsage::Table)
                    .if_not_exists()
                    .col(pk_auto(LiftUsage::Id))
                    .col(integer(LiftUsage::ClientId).not_null())
                    .col(integer(LiftUsage::LiftId).not_null())
                    .col(date(LiftUsage::UsageDate).not_null())
                    .col(time(LiftUsage::UsageTimeStart).not_null())
                    .col(time(LiftUsage::UsageTimeEnd).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lift_usage_client")
                            .from(LiftUsage::Table, LiftUsage::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lift_usage_lift")
                            .from(LiftUsage::Table, LiftUsage::LiftId)
                            .to(Lift::Table, Lift::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(LiftUsage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum LiftUsage {
    Table,
    Id,
    ClientId,
    LiftId,
    UsageDate,
    UsageTimeStart,
    UsageTimeEnd,
}

#[derive(DeriveIden)]
enum Client {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Lift {
    Table,
    Id,
}
