//! Create `listing_media` table; rows are ordered per listing by `position`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ListingMedia::Table)
                    .if_not_exists()
                    .col(uuid(ListingMedia::Id).primary_key())
                    .col(uuid(ListingMedia::ListingId).not_null())
                    .col(string_len(ListingMedia::Kind, 16).not_null())
                    .col(string_len(ListingMedia::Url, 512).not_null())
                    .col(ColumnDef::new(ListingMedia::ShortDescription).text().null())
                    .col(integer(ListingMedia::Position).not_null())
                    .col(timestamp_with_time_zone(ListingMedia::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listing_media_listing")
                            .from(ListingMedia::Table, ListingMedia::ListingId)
                            .to(Listing::Table, Listing::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ListingMedia::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ListingMedia {
    #[sea_orm(iden = "listing_media")]
    Table,
    Id,
    ListingId,
    Kind,
    Url,
    ShortDescription,
    Position,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Listing {
    #[sea_orm(iden = "listings")]
    Table,
    Id,
}
