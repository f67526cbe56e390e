#![cfg(test)]
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use uuid::Uuid;

use common::pagination::Pagination;
use migration::MigratorTrait;
use models::db::{config_from_env, connect_with_config};
use models::order::{self, OrderStatus};
use models::{listing, provider_profile, review, user};

use crate::errors::ServiceError;
use crate::order::repository::OrderRepository;
use crate::review::repository::ReviewRepository;
use crate::store::{ListingRepository, ProviderRepository, UserRepository};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_init(|| async {
            let cfg = config_from_env();
            let db = connect_with_config(&cfg).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    // Return a fresh connection for the current test's runtime
    let mut cfg = config_from_env();
    cfg.max_connections = cfg.max_connections.max(20);
    cfg.acquire_timeout_secs = 10;
    let db = connect_with_config(&cfg).await?;
    Ok(db)
}

/// In-memory entity store backing the deterministic engine tests. Implements
/// every repository contract the engines consume.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<HashMap<Uuid, user::Model>>,
    providers: Mutex<HashMap<Uuid, provider_profile::Model>>,
    listings: Mutex<HashMap<Uuid, listing::Model>>,
    orders: Mutex<HashMap<Uuid, order::Model>>,
    reviews: Mutex<HashMap<Uuid, review::Model>>,
}

impl InMemoryStore {
    pub fn add_user(&self, kind: user::UserKind) -> user::Model {
        let m = user::Model {
            id: Uuid::new_v4(),
            name: "Test User".into(),
            email: format!("user_{}@example.com", Uuid::new_v4()),
            password_hash: "$argon2id$test".into(),
            cellphone_number: None,
            kind,
            active: true,
            address_id: None,
            created_at: Utc::now().into(),
        };
        self.users.lock().unwrap().insert(m.id, m.clone());
        m
    }

    pub fn add_provider(&self, user_id: Uuid) -> provider_profile::Model {
        let m = provider_profile::Model {
            id: Uuid::new_v4(),
            user_id,
            bio: None,
            verified: true,
            payout_key: None,
            profile_photo_url: None,
            created_at: Utc::now().into(),
        };
        self.providers.lock().unwrap().insert(m.id, m.clone());
        m
    }

    pub fn add_listing(&self, provider_id: Uuid) -> listing::Model {
        let m = listing::Model {
            id: Uuid::new_v4(),
            provider_id,
            category_id: Uuid::new_v4(),
            title: "Test listing".into(),
            description: None,
            base_price: Decimal::new(10000, 2),
            active: true,
            avg_duration: None,
            created_at: Utc::now().into(),
            updated_at: None,
        };
        self.listings.lock().unwrap().insert(m.id, m.clone());
        m
    }

    pub fn add_order(
        &self,
        client_id: Uuid,
        provider_id: Uuid,
        listing_id: Uuid,
        status: OrderStatus,
    ) -> order::Model {
        let m = order::Model {
            id: Uuid::new_v4(),
            status,
            details: None,
            quantity: 1,
            value: Decimal::new(10000, 2),
            event_date: chrono::NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            client_id,
            provider_id,
            listing_id,
            created_at: Utc::now().into(),
        };
        self.orders.lock().unwrap().insert(m.id, m.clone());
        m
    }

    fn listing_ids_of_provider(&self, provider_id: Uuid) -> Vec<Uuid> {
        self.listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.provider_id == provider_id)
            .map(|l| l.id)
            .collect()
    }

    fn page<T>(items: Vec<T>, page: Pagination) -> Vec<T> {
        let (idx, per) = page.normalize();
        items.into_iter().skip((idx * per) as usize).take(per as usize).collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

#[async_trait]
impl ProviderRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<provider_profile::Model>, ServiceError> {
        Ok(self.providers.lock().unwrap().get(&id).cloned())
    }
}

#[async_trait]
impl ListingRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<listing::Model>, ServiceError> {
        Ok(self.listings.lock().unwrap().get(&id).cloned())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<order::Model>, ServiceError> {
        Ok(self.orders.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, m: order::Model) -> Result<order::Model, ServiceError> {
        self.orders.lock().unwrap().insert(m.id, m.clone());
        Ok(m)
    }

    async fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<order::Model, ServiceError> {
        let mut orders = self.orders.lock().unwrap();
        let m = orders.get_mut(&id).ok_or_else(|| ServiceError::not_found("order"))?;
        m.status = status;
        Ok(m.clone())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.orders.lock().unwrap().contains_key(&id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.orders.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn list(&self, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        let mut all: Vec<_> = self.orders.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::page(all, page))
    }

    async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        let mut all: Vec<_> = self
            .orders
            .lock()
            .unwrap()
            .values()
            .filter(|o| o.client_id == client_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::page(all, page))
    }

    async fn list_by_provider(&self, provider_id: Uuid, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        let mut all: Vec<_> = self
            .orders
            .lock()
            .unwrap()
            .values()
            .filter(|o| o.provider_id == provider_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::page(all, page))
    }

    async fn list_by_status(&self, status: OrderStatus, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        let mut all: Vec<_> = self
            .orders
            .lock()
            .unwrap()
            .values()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::page(all, page))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.orders.lock().unwrap().len() as u64)
    }

    async fn count_by_status(&self, status: OrderStatus) -> Result<u64, ServiceError> {
        Ok(self.orders.lock().unwrap().values().filter(|o| o.status == status).count() as u64)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<review::Model>, ServiceError> {
        Ok(self.reviews.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, m: review::Model) -> Result<review::Model, ServiceError> {
        self.reviews.lock().unwrap().insert(m.id, m.clone());
        Ok(m)
    }

    async fn update_content(&self, id: Uuid, rating: i32, comment: Option<String>) -> Result<review::Model, ServiceError> {
        let mut reviews = self.reviews.lock().unwrap();
        let m = reviews.get_mut(&id).ok_or_else(|| ServiceError::not_found("review"))?;
        m.rating = rating;
        m.comment = comment;
        Ok(m.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.reviews.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn exists_for_order_and_user(&self, order_id: Uuid, user_id: Uuid) -> Result<bool, ServiceError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .values()
            .any(|r| r.order_id == order_id && r.user_id == user_id))
    }

    async fn list(&self, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        let mut all: Vec<_> = self.reviews.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::page(all, page))
    }

    async fn list_by_listing(&self, listing_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        let mut all: Vec<_> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.listing_id == listing_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::page(all, page))
    }

    async fn list_by_user(&self, user_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        let mut all: Vec<_> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::page(all, page))
    }

    async fn list_by_provider(&self, provider_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        let ids = self.listing_ids_of_provider(provider_id);
        let mut all: Vec<_> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| ids.contains(&r.listing_id))
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Self::page(all, page))
    }

    async fn average_rating_by_listing(&self, listing_id: Uuid) -> Result<Option<f64>, ServiceError> {
        let ratings: Vec<i32> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.listing_id == listing_id)
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return Ok(None);
        }
        Ok(Some(ratings.iter().sum::<i32>() as f64 / ratings.len() as f64))
    }

    async fn average_rating_by_provider(&self, provider_id: Uuid) -> Result<Option<f64>, ServiceError> {
        let ids = self.listing_ids_of_provider(provider_id);
        let ratings: Vec<i32> = self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| ids.contains(&r.listing_id))
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return Ok(None);
        }
        Ok(Some(ratings.iter().sum::<i32>() as f64 / ratings.len() as f64))
    }

    async fn count_by_listing(&self, listing_id: Uuid) -> Result<u64, ServiceError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.listing_id == listing_id)
            .count() as u64)
    }

    async fn count_by_provider(&self, provider_id: Uuid) -> Result<u64, ServiceError> {
        let ids = self.listing_ids_of_provider(provider_id);
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| ids.contains(&r.listing_id))
            .count() as u64)
    }
}
