//! Create `provider_profiles` table, 1:1 with `users`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderProfile::Table)
                    .if_not_exists()
                    .col(uuid(ProviderProfile::Id).primary_key())
                    .col(uuid(ProviderProfile::UserId).unique_key().not_null())
                    .col(ColumnDef::new(ProviderProfile::Bio).text().null())
                    .col(boolean(ProviderProfile::Verified).not_null())
                    .col(ColumnDef::new(ProviderProfile::PayoutKey).string_len(128).null())
                    .col(ColumnDef::new(ProviderProfile::ProfilePhotoUrl).string_len(512).null())
                    .col(timestamp_with_time_zone(ProviderProfile::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_profile_user")
                            .from(ProviderProfile::Table, ProviderProfile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProviderProfile::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProviderProfile {
    #[sea_orm(iden = "provider_profiles")]
    Table,
    Id,
    UserId,
    Bio,
    Verified,
    PayoutKey,
    ProfilePhotoUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}
