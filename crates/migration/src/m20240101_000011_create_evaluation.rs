//! Create `evaluations` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Evaluation::Table)
                    .if_not_exists()
                    .col(uuid(Evaluation::Id).primary_key())
                    .col(uuid(Evaluation::OrderId).not_null())
                    .col(uuid(Evaluation::ClientId).not_null())
                    .col(uuid(Evaluation::ProviderId).not_null())
                    .col(integer(Evaluation::Score).not_null())
                    .col(ColumnDef::new(Evaluation::Comment).text().null())
                    .col(timestamp_with_time_zone(Evaluation::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_order")
                            .from(Evaluation::Table, Evaluation::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_client")
                            .from(Evaluation::Table, Evaluation::ClientId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluation_provider")
                            .from(Evaluation::Table, Evaluation::ProviderId)
                            .to(ProviderProfile::Table, ProviderProfile::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Evaluation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Evaluation {
    #[sea_orm(iden = "evaluations")]
    Table,
    Id,
    OrderId,
    ClientId,
    ProviderId,
    Score,
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
enum ProviderProfile {
    #[sea_orm(iden = "provider_profiles")]
    Table,
    Id,
}
