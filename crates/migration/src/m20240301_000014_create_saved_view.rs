//! Create `saved_view` table: a client's bookmarked list-screen URL.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SavedView::Table)
                    .if_not_exists()
                    .col(pk_auto(SavedView::Id))
                    .col(string_len(SavedView::Name, 150).not_null())
                    .col(string_len(SavedView::Url, 500).not_null())
                    .col(integer(SavedView::ClientId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_view_client")
                            .from(SavedView::Table, SavedView::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SavedView::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SavedView {
    Table,
    Id,
    Name,
    Url,
    ClientId,
}

#[derive(DeriveIden)]
enum Client {
    Table,
    Id,
}
