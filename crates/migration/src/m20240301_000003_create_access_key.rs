//! Create `access_key` table holding login credentials and the role used
//! for route authorization.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessKey::Table)
                    .if_not_exists()
                    .col(pk_auto(AccessKey::Id))
                    .col(string_len(AccessKey::Login, 100).unique_key().not_null())
                    .col(string_len(AccessKey::PasswordHash, 200).not_null())
                    .col(string_len(AccessKey::AccessRight, 100).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AccessKey::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AccessKey {
    Table,
    Id,
    Login,
    PasswordHash,
    AccessRight,
}
