//! Create `payments` table; rows are stored facts attached to an order.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(uuid(Payment::Id).primary_key())
                    .col(uuid(Payment::OrderId).not_null())
                    .col(string_len(Payment::Method, 32).not_null())
                    .col(string_len(Payment::Status, 32).not_null())
                    .col(decimal_len(Payment::Value, 12, 2).not_null())
                    .col(big_integer(Payment::TransactionId).not_null())
                    .col(timestamp_with_time_zone(Payment::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Payment::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_order")
                            .from(Payment::Table, Payment::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Payment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Payment {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    OrderId,
    Method,
    Status,
    Value,
    TransactionId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Order {
    #[sea_orm(iden = "orders")]
    Table,
    Id,
}
