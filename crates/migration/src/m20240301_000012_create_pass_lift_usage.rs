//! Create `pass_lift_usage` join table: charges one lift ride to a pass.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PassLiftUsage::Table)
                    .if_not_exists()
                    .col(integer(PassLiftUsage::PassId).not_null())
                    .col(integer(PassLiftUsage::LiftUsageId).not_null())
                    .primary_key(
                        Index::create()
                            .col(PassLiftUsage::PassId)
                            .col(PassLiftUsage::LiftUsageId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pass_lift_usage_pass")
                            .from(PassLiftUsage::Table, PassLiftUsage::PassId)
                            .to(Pass::Table, Pass::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pass_lift_usage_lift_usage")
                            .from(PassLiftUsage::Table, PassLiftUsage::LiftUsageId)
                            .to(LiftUsage::Table, LiftUsage::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PassLiftUsage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PassLiftUsage {
    Table,
    PassId,
    LiftUsageId,
}

#[derive(DeriveIden)]
enum Pass {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum LiftUsage {
    Table,
    Id,
}
