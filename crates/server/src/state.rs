use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::order::{OrderService, SeaOrmOrderRepository};
use service::review::{ReviewService, SeaOrmReviewRepository};
use service::store::SeaOrmEntityStore;

/// Shared handler state: the pooled connection for the thin CRUD services
/// plus the two engines wired over their SeaORM repositories.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub orders: Arc<OrderService>,
    pub reviews: Arc<ReviewService>,
}

pub fn build_state(db: DatabaseConnection) -> AppState {
    let entities = Arc::new(SeaOrmEntityStore { db: db.clone() });
    let order_repo = Arc::new(SeaOrmOrderRepository { db: db.clone() });
    let review_repo = Arc::new(SeaOrmReviewRepository { db: db.clone() });

    let orders = Arc::new(OrderService::new(
        order_repo.clone(),
        entities.clone(),
        entities.clone(),
        entities.clone(),
    ));
    let reviews = Arc::new(ReviewService::new(
        review_repo,
        order_repo,
        entities.clone(),
        entities,
    ));

    AppState { db, orders, reviews }
}
