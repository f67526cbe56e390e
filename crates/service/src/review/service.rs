use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use common::pagination::Pagination;
use models::order::OrderStatus;
use models::review;

use crate::errors::ServiceError;
use crate::order::repository::OrderRepository;
use crate::review::repository::ReviewRepository;
use crate::store::{ListingRepository, UserRepository};

/// Creation request for a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub rating: i32,
    pub comment: Option<String>,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
}

/// Update request; only rating and comment are mutable, and `user_id` must
/// match the review's author.
#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub rating: i32,
    pub comment: Option<String>,
    pub user_id: Uuid,
}

/// Review eligibility engine.
///
/// Eligibility is checked procedurally at write time so the caller gets a
/// specific rejection (not-completed vs. not-owner vs. duplicate) rather
/// than a constraint-violation.
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
    listings: Arc<dyn ListingRepository>,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
        listings: Arc<dyn ListingRepository>,
    ) -> Self {
        Self { reviews, orders, users, listings }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<review::Model, ServiceError> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("review"))
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        self.reviews.list(page).await
    }

    pub async fn list_by_listing(&self, listing_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        self.reviews.list_by_listing(listing_id, page).await
    }

    pub async fn list_by_user(&self, user_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        self.reviews.list_by_user(user_id, page).await
    }

    pub async fn list_by_provider(&self, provider_id: Uuid, page: Pagination) -> Result<Vec<review::Model>, ServiceError> {
        self.reviews.list_by_provider(provider_id, page).await
    }

    /// Average rating across a listing's reviews; 0.0 when none exist.
    pub async fn average_rating_by_listing(&self, listing_id: Uuid) -> Result<f64, ServiceError> {
        Ok(self.reviews.average_rating_by_listing(listing_id).await?.unwrap_or(0.0))
    }

    /// Average rating across all of a provider's listings; 0.0 when none exist.
    pub async fn average_rating_by_provider(&self, provider_id: Uuid) -> Result<f64, ServiceError> {
        Ok(self.reviews.average_rating_by_provider(provider_id).await?.unwrap_or(0.0))
    }

    pub async fn count_by_listing(&self, listing_id: Uuid) -> Result<u64, ServiceError> {
        self.reviews.count_by_listing(listing_id).await
    }

    pub async fn count_by_provider(&self, provider_id: Uuid) -> Result<u64, ServiceError> {
        self.reviews.count_by_provider(provider_id).await
    }

    /// Create a review for a completed order.
    ///
    /// Checks run in order: order exists, order is COMPLETED, the requester
    /// is the order's client, no review exists yet for (order, user), then
    /// the user and listing references resolve.
    #[instrument(skip(self, req), fields(order_id = %req.order_id, user_id = %req.user_id))]
    pub async fn create(&self, req: NewReview) -> Result<review::Model, ServiceError> {
        review::validate_rating(req.rating)?;

        let order = self
            .orders
            .find_by_id(req.order_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order"))?;

        if order.status != OrderStatus::Completed {
            return Err(ServiceError::Validation(format!(
                "only completed orders can be reviewed, current status {:?}",
                order.status
            )));
        }
        if order.client_id != req.user_id {
            return Err(ServiceError::Validation(
                "only the order's client can review it".into(),
            ));
        }
        if self.reviews.exists_for_order_and_user(req.order_id, req.user_id).await? {
            return Err(ServiceError::Validation(
                "order already reviewed by this user".into(),
            ));
        }

        let user = self
            .users
            .find_by_id(req.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        let listing = self
            .listings
            .find_by_id(req.listing_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("listing"))?;

        let model = review::Model {
            id: Uuid::new_v4(),
            order_id: order.id,
            user_id: user.id,
            listing_id: listing.id,
            rating: req.rating,
            comment: req.comment,
            created_at: Utc::now().into(),
        };
        let created = self.reviews.insert(model).await?;
        info!(review_id = %created.id, "review_created");
        Ok(created)
    }

    /// Update rating/comment; the order/user/listing bindings never change.
    #[instrument(skip(self, req), fields(review_id = %id, user_id = %req.user_id))]
    pub async fn update(&self, id: Uuid, req: ReviewUpdate) -> Result<review::Model, ServiceError> {
        review::validate_rating(req.rating)?;

        let existing = self.find_by_id(id).await?;
        if existing.user_id != req.user_id {
            return Err(ServiceError::Validation(
                "only the review's author can update it".into(),
            ));
        }

        let updated = self.reviews.update_content(id, req.rating, req.comment).await?;
        info!(review_id = %id, "review_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(review_id = %id, user_id = %requesting_user_id))]
    pub async fn delete(&self, id: Uuid, requesting_user_id: Uuid) -> Result<(), ServiceError> {
        let existing = self.find_by_id(id).await?;
        if existing.user_id != requesting_user_id {
            return Err(ServiceError::Validation(
                "only the review's author can delete it".into(),
            ));
        }
        self.reviews.delete(id).await?;
        info!(review_id = %id, "review_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryStore;
    use models::order;
    use models::user::UserKind;

    fn engine(store: &Arc<InMemoryStore>) -> ReviewService {
        ReviewService::new(store.clone(), store.clone(), store.clone(), store.clone())
    }

    /// client id, provider id, listing id
    fn seed(store: &Arc<InMemoryStore>) -> (Uuid, Uuid, Uuid) {
        let client = store.add_user(UserKind::Client);
        let provider_user = store.add_user(UserKind::Provider);
        let provider = store.add_provider(provider_user.id);
        let listing = store.add_listing(provider.id);
        (client.id, provider.id, listing.id)
    }

    fn request(order: &order::Model, user_id: Uuid) -> NewReview {
        NewReview {
            rating: 5,
            comment: Some("great service".into()),
            order_id: order.id,
            user_id,
            listing_id: order.listing_id,
        }
    }

    #[tokio::test]
    async fn create_requires_completed_order() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        for status in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::InProgress,
            OrderStatus::Rejected,
            OrderStatus::Cancelled,
        ] {
            let order = store.add_order(c, p, l, status);
            let err = svc.create(request(&order, c)).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "{:?}", status);
        }

        let order = store.add_order(c, p, l, OrderStatus::Completed);
        let created = svc.create(request(&order, c)).await.unwrap();
        assert_eq!(created.rating, 5);
        assert_eq!(created.order_id, order.id);
    }

    #[tokio::test]
    async fn create_requires_the_orders_client_and_uniqueness() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);
        let order = store.add_order(c, p, l, OrderStatus::Completed);

        // A stranger (even an existing user) may not review someone else's order
        let stranger = store.add_user(UserKind::Client);
        let err = svc.create(request(&order, stranger.id)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // First review by the client succeeds, the second is a duplicate
        svc.create(request(&order, c)).await.unwrap();
        let err = svc.create(request(&order, c)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_missing_references_are_not_found() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);

        let order = store.add_order(c, p, l, OrderStatus::Completed);

        // Unknown order
        let mut req = request(&order, c);
        req.order_id = Uuid::new_v4();
        assert!(matches!(svc.create(req).await.unwrap_err(), ServiceError::NotFound(_)));

        // Unknown listing reference
        let mut req = request(&order, c);
        req.listing_id = Uuid::new_v4();
        assert!(matches!(svc.create(req).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_rating() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);
        let order = store.add_order(c, p, l, OrderStatus::Completed);

        for rating in [0, 6, -1] {
            let mut req = request(&order, c);
            req.rating = rating;
            assert!(matches!(svc.create(req).await.unwrap_err(), ServiceError::Model(_)));
        }
    }

    #[tokio::test]
    async fn update_and_delete_are_author_gated() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l) = seed(&store);
        let order = store.add_order(c, p, l, OrderStatus::Completed);
        let created = svc.create(request(&order, c)).await.unwrap();

        // Foreign user may neither update nor delete
        let err = svc
            .update(created.id, ReviewUpdate { rating: 1, comment: None, user_id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let err = svc.delete(created.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        // The author updates rating/comment; bindings stay put
        let updated = svc
            .update(created.id, ReviewUpdate { rating: 3, comment: Some("ok".into()), user_id: c })
            .await
            .unwrap();
        assert_eq!(updated.rating, 3);
        assert_eq!(updated.comment.as_deref(), Some("ok"));
        assert_eq!(updated.order_id, created.order_id);
        assert_eq!(updated.user_id, created.user_id);
        assert_eq!(updated.listing_id, created.listing_id);

        svc.delete(created.id, c).await.unwrap();
        assert!(matches!(svc.find_by_id(created.id).await.unwrap_err(), ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn averages_default_to_zero_without_ratings() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (_c, p, l) = seed(&store);

        assert_eq!(svc.average_rating_by_listing(l).await.unwrap(), 0.0);
        assert_eq!(svc.average_rating_by_provider(p).await.unwrap(), 0.0);
        assert_eq!(svc.count_by_listing(l).await.unwrap(), 0);
        assert_eq!(svc.count_by_provider(p).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn aggregates_span_the_providers_listings() {
        let store = Arc::new(InMemoryStore::default());
        let svc = engine(&store);
        let (c, p, l1) = seed(&store);
        let l2 = store.add_listing(p);

        let o1 = store.add_order(c, p, l1, OrderStatus::Completed);
        let o2 = store.add_order(c, p, l2.id, OrderStatus::Completed);

        let mut r1 = request(&o1, c);
        r1.rating = 4;
        svc.create(r1).await.unwrap();
        let mut r2 = request(&o2, c);
        r2.rating = 2;
        svc.create(r2).await.unwrap();

        assert_eq!(svc.average_rating_by_listing(l1).await.unwrap(), 4.0);
        assert_eq!(svc.average_rating_by_provider(p).await.unwrap(), 3.0);
        assert_eq!(svc.count_by_listing(l2.id).await.unwrap(), 1);
        assert_eq!(svc.count_by_provider(p).await.unwrap(), 2);
        assert_eq!(svc.list_by_provider(p, Pagination::default()).await.unwrap().len(), 2);
    }
}
