//! Create `store` table with FK to `user`.
//!
//! `user_id` is unique: a user owns at most one store.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(pk_auto(Store::Id))
                    .col(string_len(Store::Name, 128).not_null())
                    .col(text_null(Store::Description))
                    .col(integer(Store::UserId).unique_key().not_null())
                    .col(timestamp_with_time_zone(Store::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_store_user")
                            .from(Store::Table, Store::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Store::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Store { Table, Id, Name, Description, UserId, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
