//! Create `product` table with FK to `store`.
//!
//! The FK uses RESTRICT on delete so a store that still owns products
//! cannot be removed, even when two requests race.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string_len(Product::Name, 128).not_null())
                    .col(text_null(Product::Description))
                    .col(decimal_len(Product::Price, 10, 2).not_null())
                    .col(integer(Product::Stock).not_null().default(0))
                    .col(integer(Product::StoreId).not_null())
                    .col(timestamp_with_time_zone(Product::CreatedAt).not_null())
                    .check(Expr::col(Product::Price).gte(0))
                    .check(Expr::col(Product::Stock).gte(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_store")
                            .from(Product::Table, Product::StoreId)
                            .to(Store::Table, Store::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Id, Name, Description, Price, Stock, StoreId, CreatedAt }

#[derive(DeriveIden)]
enum Store { Table, Id }
