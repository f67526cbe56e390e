//! Create `listings` table with FKs to `provider_profiles` and `categories`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listing::Table)
                    .if_not_exists()
                    .col(uuid(Listing::Id).primary_key())
                    .col(uuid(Listing::ProviderId).not_null())
                    .col(uuid(Listing::CategoryId).not_null())
                    .col(string_len(Listing::Title, 255).not_null())
                    .col(ColumnDef::new(Listing::Description).text().null())
                    .col(decimal_len(Listing::BasePrice, 12, 2).not_null())
                    .col(boolean(Listing::Active).not_null())
                    .col(ColumnDef::new(Listing::AvgDuration).decimal_len(6, 2).null())
                    .col(timestamp_with_time_zone(Listing::CreatedAt).not_null())
                    .col(ColumnDef::new(Listing::UpdatedAt).timestamp_with_time_zone().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listing_provider")
                            .from(Listing::Table, Listing::ProviderId)
                            .to(ProviderProfile::Table, ProviderProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listing_category")
                            .from(Listing::Table, Listing::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Listing::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Listing {
    #[sea_orm(iden = "listings")]
    Table,
    Id,
    ProviderId,
    CategoryId,
    Title,
    Description,
    BasePrice,
    Active,
    AvgDuration,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProviderProfile {
    #[sea_orm(iden = "provider_profiles")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Category {
    #[sea_orm(iden = "categories")]
    Table,
    Id,
}
