//! Create `reviews` table.
//!
//! Uniqueness of (order_id, user_id) is checked procedurally at the service
//! layer; the index pass adds a unique backstop.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(uuid(Review::Id).primary_key())
                    .col(uuid(Review::OrderId).not_null())
                    .col(uuid(Review::UserId).not_null())
                    .col(uuid(Review::ListingId).not_null())
                    .col(integer(Review::Rating).not_null())
                    .col(ColumnDef::new(Review::Comment).text().null())
                    .col(timestamp_with_time_zone(Review::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_order")
                            .from(Review::Table, Review::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_listing")
                            .from(Review::Table, Review::ListingId)
                            .to(Listing::Table, Listing::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Review {
    #[sea_orm(iden = "reviews")]
    Table,
    Id,
    OrderId,
    UserId,
    ListingId,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Order {
    #[sea_orm(iden = "orders")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Listing {
    #[sea_orm(iden = "listings")]
    Table,
    Id,
}
