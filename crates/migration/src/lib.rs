//! Migrator registering entity-specific migrations in FK dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_address;
mod m20240101_000002_create_user;
mod m20240101_000003_create_category;
mod m20240101_000004_create_provider_profile;
mod m20240101_000005_create_provider_category;
mod m20240101_000006_create_listing;
mod m20240101_000007_create_listing_media;
mod m20240101_000008_create_order;
mod m20240101_000009_create_review;
mod m20240101_000010_create_payment;
mod m20240101_000011_create_evaluation;
mod m20240101_000012_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_address::Migration),
            Box::new(m20240101_000002_create_user::Migration),
            Box::new(m20240101_000003_create_category::Migration),
            Box::new(m20240101_000004_create_provider_profile::Migration),
            Box::new(m20240101_000005_create_provider_category::Migration),
            Box::new(m20240101_000006_create_listing::Migration),
            Box::new(m20240101_000007_create_listing_media::Migration),
            Box::new(m20240101_000008_create_order::Migration),
            Box::new(m20240101_000009_create_review::Migration),
            Box::new(m20240101_000010_create_payment::Migration),
            Box::new(m20240101_000011_create_evaluation::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000012_add_indexes::Migration),
        ]
    }
}
