//! Create `addresses` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(uuid(Address::Id).primary_key())
                    .col(string_len(Address::Street, 255).not_null())
                    .col(integer(Address::Number).not_null())
                    .col(string_len(Address::Neighborhood, 128).not_null())
                    .col(string_len(Address::City, 128).not_null())
                    .col(string_len(Address::FederativeUnit, 2).not_null())
                    .col(string_len(Address::PostalCode, 8).not_null())
                    .col(ColumnDef::new(Address::Latitude).decimal_len(10, 7).null())
                    .col(ColumnDef::new(Address::Longitude).decimal_len(10, 7).null())
                    .col(timestamp_with_time_zone(Address::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Address::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Address {
    #[sea_orm(iden = "addresses")]
    Table,
    Id,
    Street,
    Number,
    Neighborhood,
    City,
    FederativeUnit,
    PostalCode,
    Latitude,
    Longitude,
    CreatedAt,
}
