use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pass: index on client_id
        manager
            .create_index(
                Index::create()
                    .name("idx_pass_client")
                    .table(Pass::Table)
                    .col(Pass::ClientId)
                    .to_owned(),
            )
            .await?;

        // LiftUsage: index on client_id and usage_date
        manager
            .create_index(
                Index::create()
                    .name("idx_lift_usage_client")
                    .table(LiftUsage::Table)
                    .col(LiftUsage::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_lift_usage_date")
                    .table(LiftUsage::Table)
                    .col(LiftUsage::UsageDate)
                    .to_owned(),
            )
            .await?;

        // Rental: index on client_id and rental_date (report range scans)
        manager
            .create_index(
                Index::create()
                    .name("idx_rental_client")
                    .table(Rental::Table)
                    .col(Rental::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_rental_date")
                    .table(Rental::Table)
                    .col(Rental::RentalDate)
                    .to_owned(),
            )
            .await?;

        // PassRentalUsage: a rental may be charged to at most one pass
        manager
            .create_index(
                Index::create()
                    .name("uniq_pass_rental_usage_rental")
                    .table(PassRentalUsage::Table)
                    .col(PassRentalUsage::RentalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // SavedView: index on client_id
        manager
            .create_index(
                Index::create()
                    .name("idx_saved_view_client")
                    .table(SavedView::Table)
                    .col(SavedView::ClientId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pass_client").table(Pass::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_lift_usage_client").table(LiftUsage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_lift_usage_date").table(LiftUsage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rental_client").table(Rental::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_rental_date").table(Rental::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("uniq_pass_rental_usage_rental")
                    .table(PassRentalUsage::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_saved_view_client").table(SavedView::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Pass {
    Table,
    ClientId,
}

#[derive(DeriveIden)]
enum LiftUsage {
    Table,
    ClientId,
    UsageDate,
}

#[derive(DeriveIden)]
enum Rental {
    Table,
    ClientId,
    RentalDate,
}

#[derive(DeriveIden)]
enum PassRentalUsage {
    Table,
    RentalId,
}

#[derive(DeriveIden)]
enum SavedView {
    Table,
    ClientId,
}
