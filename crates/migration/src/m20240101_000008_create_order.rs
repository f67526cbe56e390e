//! Create `orders` table.
//!
//! Status is stored as the uppercase enum string; client/provider/listing
//! references are immutable after creation (enforced at the service layer).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(uuid(Order::Id).primary_key())
                    .col(string_len(Order::Status, 32).not_null())
                    .col(ColumnDef::new(Order::Details).text().null())
                    .col(big_integer(Order::Quantity).not_null())
                    .col(decimal_len(Order::Value, 12, 2).not_null())
                    .col(date(Order::EventDate).not_null())
                    .col(uuid(Order::ClientId).not_null())
                    .col(uuid(Order::ProviderId).not_null())
                    .col(uuid(Order::ListingId).not_null())
                    .col(timestamp_with_time_zone(Order::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_client")
                            .from(Order::Table, Order::ClientId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_provider")
                            .from(Order::Table, Order::ProviderId)
                            .to(ProviderProfile::Table, ProviderProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_listing")
                            .from(Order::Table, Order::ListingId)
                            .to(Listing::Table, Listing::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Order::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Order {
    #[sea_orm(iden = "orders")]
    Table,
    Id,
    Status,
    Details,
    Quantity,
    Value,
    EventDate,
    ClientId,
    ProviderId,
    ListingId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ProviderProfile {
    #[sea_orm(iden = "provider_profiles")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Listing {
    #[sea_orm(iden = "listings")]
    Table,
    Id,
}
