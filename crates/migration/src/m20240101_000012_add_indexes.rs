use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Orders: lookup by client, provider, status
        manager
            .create_index(
                Index::create()
                    .name("idx_order_client")
                    .table(Order::Table)
                    .col(Order::ClientId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_order_provider")
                    .table(Order::Table)
                    .col(Order::ProviderId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_order_status")
                    .table(Order::Table)
                    .col(Order::Status)
                    .to_owned(),
            )
            .await?;

        // Reviews: composite unique (order_id, user_id) plus per-listing lookup
        manager
            .create_index(
                Index::create()
                    .name("uniq_review_order_user")
                    .table(Review::Table)
                    .col(Review::OrderId)
                    .col(Review::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_review_listing")
                    .table(Review::Table)
                    .col(Review::ListingId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_review_user")
                    .table(Review::Table)
                    .col(Review::UserId)
                    .to_owned(),
            )
            .await?;

        // Listings: lookup by provider and category
        manager
            .create_index(
                Index::create()
                    .name("idx_listing_provider")
                    .table(Listing::Table)
                    .col(Listing::ProviderId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_listing_category")
                    .table(Listing::Table)
                    .col(Listing::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Media rows fetched per listing ordered by position
        manager
            .create_index(
                Index::create()
                    .name("idx_media_listing")
                    .table(ListingMedia::Table)
                    .col(ListingMedia::ListingId)
                    .to_owned(),
            )
            .await?;

        // Payments and evaluations fetched per order/provider
        manager
            .create_index(
                Index::create()
                    .name("idx_payment_order")
                    .table(Payment::Table)
                    .col(Payment::OrderId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_evaluation_provider")
                    .table(Evaluation::Table)
                    .col(Evaluation::ProviderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_order_client").table(Order::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_provider").table(Order::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_status").table(Order::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_review_order_user").table(Review::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_review_listing").table(Review::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_review_user").table(Review::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_listing_provider").table(Listing::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_listing_category").table(Listing::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_media_listing").table(ListingMedia::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_payment_order").table(Payment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_evaluation_provider").table(Evaluation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Order {
    #[sea_orm(iden = "orders")]
    Table,
    ClientId,
    ProviderId,
    Status,
}

#[derive(DeriveIden)]
enum Review {
    #[sea_orm(iden = "reviews")]
    Table,
    OrderId,
    UserId,
    ListingId,
}

#[derive(DeriveIden)]
enum Listing {
    #[sea_orm(iden = "listings")]
    Table,
    ProviderId,
    CategoryId,
}

#[derive(DeriveIden)]
enum ListingMedia {
    #[sea_orm(iden = "listing_media")]
    Table,
    ListingId,
}

#[derive(DeriveIden)]
enum Payment {
    #[sea_orm(iden = "payments")]
    Table,
    OrderId,
}

#[derive(DeriveIden)]
enum Evaluation {
    #[sea_orm(iden = "evaluations")]
    Table,
    ProviderId,
}
