//! Create `users` table with optional FK to `addresses`.
//!
//! Stores account records; passwords arrive already hashed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Name, 128).not_null())
                    .col(string_len(User::Email, 255).unique_key().not_null())
                    .col(string_len(User::PasswordHash, 255).not_null())
                    .col(ColumnDef::new(User::CellphoneNumber).string_len(32).null())
                    .col(string_len(User::Kind, 16).not_null())
                    .col(boolean(User::Active).not_null())
                    // Explicitly define nullable address_id to avoid conflicting NULL/NOT NULL
                    .col(ColumnDef::new(User::AddressId).uuid().null())
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_address")
                            .from(User::Table, User::AddressId)
                            .to(Address::Table, Address::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    CellphoneNumber,
    Kind,
    Active,
    AddressId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Address {
    #[sea_orm(iden = "addresses")]
    Table,
    Id,
}
