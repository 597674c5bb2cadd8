//! Create `client` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(pk_auto(Client::Id))
                    .col(string_len(Client::FullName, 100).not_null())
                    .col(string_len(Client::DocumentId, 100).not_null())
                    .col(date(Client::DateOfBirth).not_null())
                    .col(string_len(Client::PhoneNumber, 100).not_null())
                    .col(string_len(Client::Email, 100).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Client::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Client {
    Table,
    Id,
    FullName,
    DocumentId,
    DateOfBirth,
    PhoneNumber,
    Email,
}
