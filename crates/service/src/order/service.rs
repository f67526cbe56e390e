use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

use common::pagination::Pagination;
use models::order::{self, OrderStatus};

use crate::errors::ServiceError;
use crate::order::repository::OrderRepository;
use crate::order::transitions;
use crate::store::{ListingRepository, ProviderRepository, UserRepository};

/// Creation request for an order.
///
/// A supplied `status` is ignored: every order starts PENDING.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub status: Option<OrderStatus>,
    pub details: Option<String>,
    pub quantity: i64,
    pub value: Decimal,
    pub event_date: NaiveDate,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub listing_id: Uuid,
}

/// Order lifecycle engine.
///
/// Every referenced entity is loaded before a decision is made; mutations are
/// gated first on actor identity (only the order's provider changes status,
/// only its client cancels), then on the transition table.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
    providers: Arc<dyn ProviderRepository>,
    listings: Arc<dyn ListingRepository>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
        providers: Arc<dyn ProviderRepository>,
        listings: Arc<dyn ListingRepository>,
    ) -> Self {
        Self { orders, users, providers, listings }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<order::Model, ServiceError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order"))
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        self.orders.list(page).await
    }

    pub async fn list_by_client(&self, client_id: Uuid, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        self.orders.list_by_client(client_id, page).await
    }

    pub async fn list_by_provider(&self, provider_id: Uuid, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        self.orders.list_by_provider(provider_id, page).await
    }

    pub async fn list_by_status(&self, status: OrderStatus, page: Pagination) -> Result<Vec<order::Model>, ServiceError> {
        self.orders.list_by_status(status, page).await
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        self.orders.count().await
    }

    pub async fn count_by_status(&self, status: OrderStatus) -> Result<u64, ServiceError> {
        self.orders.count_by_status(status).await
    }

    /// Create an order against a provider's listing.
    ///
    /// Client, provider and listing must all resolve, and the listing must be
    /// owned by the requested provider.
    #[instrument(skip(self, req), fields(client_id = %req.client_id, provider_id = %req.provider_id))]
    pub async fn create(&self, req: NewOrder) -> Result<order::Model, ServiceError> {
        order::validate_quantity(req.quantity)?;
        order::validate_value(req.value)?;

        let client = self
            .users
            .find_by_id(req.client_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("client"))?;
        let provider = self
            .providers
            .find_by_id(req.provider_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("provider"))?;
        let listing = self
            .listings
            .find_by_id(req.listing_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("listing"))?;

        if listing.provider_id != provider.id {
            return Err(ServiceError::Validation(
                "listing does not belong to the specified provider".into(),
            ));
        }

        // Whatever status the caller supplied, orders always start PENDING.
        let model = order::Model {
            id: Uuid::new_v4(),
            status: OrderStatus::Pending,
            details: req.details,
            quantity: req.quantity,
            value: req.value,
            event_date: req.event_date,
            client_id: client.id,
            provider_id: provider.id,
            listing_id: listing.id,
            created_at: Utc::now().into(),
        };
        let created = self.orders.insert(model).await?;
        info!(order_id = %created.id, "order_created");
        Ok(created)
    }

    /// Apply a status transition on behalf of the order's provider.
    ///
    /// Authorization is checked before transition legality, so a foreign
    /// provider gets Forbidden even on a terminal order.
    #[instrument(skip(self), fields(order_id = %id, next = ?next, provider_id = %acting_provider_id))]
    pub async fn update_status(
        &self,
        id: Uuid,
        next: OrderStatus,
        acting_provider_id: Uuid,
    ) -> Result<order::Model, ServiceError> {
        let current = self.find_by_id(id).await?;

        if current.provider_id != acting_provider_id {
            return Err(ServiceError::Forbidden(
                "only the order's provider can update its status".into(),
            ));
        }
        if !transitions::can_transition(current.status, next) {
            return Err(ServiceError::InvalidTransition(format!(
                "cannot change status from {:?} to {:?}",
                current.status, next
            )));
        }

        let updated = self.orders.set_status(id, next).await?;
        info!(order_id = %id, from = ?current.status, to = ?next, "order_status_updated");
        Ok(updated)
    }

    /// Cancel on behalf of the order's client; legal only from PENDING or
    /// ACCEPTED.
    #[instrument(skip(self), fields(order_id = %id, client_id = %acting_client_id))]
    pub async fn cancel(&self, id: Uuid, acting_client_id: Uuid) -> Result<order::Model, ServiceError> {
        let current = self.find_by_id(id).await?;

        if current.client_id != acting_client_id {
            return Err(ServiceError::Forbidden(
                "only the order's client can cancel it".into(),
            ));
        }
        if !transitions::client_cancellable(current.status) {
            return Err(ServiceError::Validation(format!(
                "cannot cancel order with status {:?}",
                current.status
            )));
        }

        let updated = self.orders.set_status(id, OrderStatus::Cancelled).await?;
        info!(order_id = %id, from = ?current.status, "order_cancelled");
        Ok(updated)
    }

    /// Administrative hard delete. Deliberately bypasses the state machine;
    /// this is an operational escape hatch, not a business transition.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.orders.exists(id).await? {
            return Err(ServiceError::not_found("order"));
        }
        self.orders.delete(id).await?;
        info!(order_id = %id, "order_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryStore;
    use models::user::UserKind;
    use sea_orm::Iterable;

    fn engine(store: &Arc<InMemoryStore>) -> OrderService {
        OrderService::new(store.clone(), store.clone(), store.clone(), store.clone())
    }

    /// client id, provider id, listing id
    fn seed(store: &Arc<InMemoryStore>) -> (Uuid, Uuid, Uuid) {
        let client = store.add_user(UserKind::Client);
        let provider_user = store.add_user(UserKind::Provider);
        let provider = store.add_provider(provider_user.id);
        let listing = store.add_listing(provider.id);
        (client.id, provider.id, listing.id)
    }

    fn request(client_id: Uuid, provider_id: Uuid, listing_id: Uuid) -> NewOrder {
        NewOrder {
            status: None,
            details: Some("weekend event".into()),
            quantity: 2,
            value: Decimal::new(25000, 2),
            event_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            client_id,
            provider_id,
            listing_id,
        }
    }

    #[tokio::test]
    async fn create_always_starts_pending() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        // Even an explicit caller-supplied status is overridden.
        let mut req = request(c, p, l);
        req.status = Some(OrderStatus::Completed);
        let created = svc.create(req).await.unwrap();
        assert_eq!(created.status, OrderStatus::Pending);

        let created2 = svc.create(request(c, p, l)).await.unwrap();
        assert_eq!(created2.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn create_rejects_missing_references() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        let err = svc.create(request(Uuid::new_v4(), p, l)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = svc.create(request(c, Uuid::new_v4(), l)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = svc.create(request(c, p, Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_rejects_foreign_listing() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, _l) = seed(&store);
        // Listing owned by a different provider
        let other_user = store.add_user(UserKind::Provider);
        let other_provider = store.add_provider(other_user.id);
        let foreign = store.add_listing(other_provider.id);

        let err = svc.create(request(c, p, foreign.id)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_nonpositive_quantity_and_value() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        let mut req = request(c, p, l);
        req.quantity = 0;
        assert!(matches!(svc.create(req).await.unwrap_err(), ServiceError::Model(_)));

        let mut req = request(c, p, l);
        req.value = Decimal::ZERO;
        assert!(matches!(svc.create(req).await.unwrap_err(), ServiceError::Model(_)));
    }

    #[tokio::test]
    async fn update_status_checks_provider_before_legality() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);
        let stranger = Uuid::new_v4();

        // The ownership check fires for every current status, including
        // terminal ones where the transition itself would also be illegal.
        for status in OrderStatus::iter() {
            let order = store.add_order(c, p, l, status);
            let err = svc
                .update_status(order.id, OrderStatus::Accepted, stranger)
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::Forbidden(_)), "{:?}", status);
        }
    }

    #[tokio::test]
    async fn update_status_applies_every_legal_transition() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        for from in OrderStatus::iter() {
            for to in transitions::allowed_next(from) {
                let order = store.add_order(c, p, l, from);
                let updated = svc.update_status(order.id, *to, p).await.unwrap();
                assert_eq!(updated.status, *to);
                assert_eq!(svc.find_by_id(order.id).await.unwrap().status, *to);
            }
        }
    }

    #[tokio::test]
    async fn update_status_rejects_every_illegal_transition() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        for from in OrderStatus::iter() {
            for to in OrderStatus::iter() {
                if transitions::can_transition(from, to) {
                    continue;
                }
                let order = store.add_order(c, p, l, from);
                let err = svc.update_status(order.id, to, p).await.unwrap_err();
                assert!(
                    matches!(err, ServiceError::InvalidTransition(_)),
                    "{:?} -> {:?}",
                    from,
                    to
                );
                // Status unchanged after the rejection
                assert_eq!(svc.find_by_id(order.id).await.unwrap().status, from);
            }
        }
    }

    #[tokio::test]
    async fn update_status_missing_order_is_not_found() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let err = svc
            .update_status(Uuid::new_v4(), OrderStatus::Accepted, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn lifecycle_walks_pending_to_completed() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        let order = svc.create(request(c, p, l)).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        let order_id = order.id;
        let accepted = svc.update_status(order_id, OrderStatus::Accepted, p).await.unwrap();
        assert_eq!(accepted.status, OrderStatus::Accepted);

        // ACCEPTED cannot jump straight to COMPLETED
        let err = svc.update_status(order_id, OrderStatus::Completed, p).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidTransition(_)));

        let in_progress = svc.update_status(order_id, OrderStatus::InProgress, p).await.unwrap();
        assert_eq!(in_progress.status, OrderStatus::InProgress);

        let completed = svc.update_status(order_id, OrderStatus::Completed, p).await.unwrap();
        assert_eq!(completed.status, OrderStatus::Completed);
    }

    #[tokio::test]
    async fn cancel_only_by_client_and_only_early() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        // Cancellable from PENDING
        let order = store.add_order(c, p, l, OrderStatus::Pending);
        let cancelled = svc.cancel(order.id, c).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        // A second cancel finds a CANCELLED order and rejects it
        let err = svc.cancel(order.id, c).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // Cancellable from ACCEPTED
        let order = store.add_order(c, p, l, OrderStatus::Accepted);
        assert!(svc.cancel(order.id, c).await.is_ok());

        // Not cancellable once work started or finished
        for status in [OrderStatus::InProgress, OrderStatus::Completed, OrderStatus::Rejected] {
            let order = store.add_order(c, p, l, status);
            let err = svc.cancel(order.id, c).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{:?}", status);
        }

        // Wrong actor is Forbidden regardless of status
        let order = store.add_order(c, p, l, OrderStatus::Pending);
        let err = svc.cancel(order.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn delete_bypasses_the_state_machine() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        // Terminal orders are deletable; this is the admin escape hatch.
        let order = store.add_order(c, p, l, OrderStatus::Completed);
        svc.delete(order.id).await.unwrap();
        assert!(matches!(svc.find_by_id(order.id).await.unwrap_err(), ServiceError::NotFound(_)));

        let err = svc.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn reads_filter_by_client_provider_and_status() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);
        let (c2, p2, l2) = seed(&store);

        store.add_order(c, p, l, OrderStatus::Pending);
        store.add_order(c, p, l, OrderStatus::Completed);
        store.add_order(c2, p2, l2, OrderStatus::Pending);

        let page = Pagination::default();
        assert_eq!(svc.list(page).await.unwrap().len(), 3);
        assert_eq!(svc.list_by_client(c, page).await.unwrap().len(), 2);
        assert_eq!(svc.list_by_provider(p2, page).await.unwrap().len(), 1);
        assert_eq!(svc.list_by_status(OrderStatus::Pending, page).await.unwrap().len(), 2);
        assert_eq!(svc.count().await.unwrap(), 3);
        assert_eq!(svc.count_by_status(OrderStatus::Completed).await.unwrap(), 1);
    }
}
