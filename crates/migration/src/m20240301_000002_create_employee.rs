//! Create `employee` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_len(Employee::FullName, 100).not_null())
                    .col(string_len(Employee::Position, 100).not_null())
                    .col(integer(Employee::Salary).not_null())
                    .col(string_len(Employee::PhoneNumber, 100).not_null())
                    .col(string_len(Employee::Email, 100).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    FullName,
    Position,
    Salary,
    PhoneNumber,
    Email,
}
