//! Create `rental` table. `end_time` is nullable: open rentals have no end
//! yet and cannot be charged against an hourly pass.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rental::Table)
                    .if_not_exists()
                    .col(pk_auto(Rental::Id))
                    .col(integer(Rental::ClientId).not_null())
                    .col(integer(Rental::EmployeeId).not_null())
                    .col(date(Rental::RentalDate).not_null())
                    .col(time(Rental::StartTime).not_null())
                    .col(time_null(Rental::EndTime))
                    .col(string_len(Rental::RentalType, 100).not_null())
                    .col(integer(Rental::TotalPrice).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rental_client")
                            .from(Rental::Table, Rental::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rental_employee")
                            .from(Rental::Table, Rental::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Rental::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Rental {
    Table,
    Id,
    ClientId,
    EmployeeId,
    RentalDate,
    StartTime,
    EndTime,
    RentalType,
    TotalPrice,
}

#[derive(DeriveIden)]
enum Client {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
}
