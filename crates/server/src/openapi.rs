//! OpenAPI document. Request schemas are mirrored here as plain doc structs
//! (enums as strings) so the wire DTOs stay decoupled from the doc layer.

use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct CreateOrderRequest {
    /// Ignored; orders always start PENDING.
    pub status: Option<String>,
    pub details: Option<String>,
    pub quantity: i64,
    pub value: f64,
    pub event_date: String,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub listing_id: Uuid,
}

#[derive(ToSchema)]
pub struct StatusUpdateRequest {
    /// One of PENDING, ACCEPTED, REJECTED, IN_PROGRESS, COMPLETED, CANCELLED.
    pub status: String,
}

#[derive(ToSchema)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
}

#[derive(ToSchema)]
pub struct UpdateReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
    pub user_id: Uuid,
}

#[derive(ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub cellphone_number: Option<String>,
    /// One of CLIENT, PROVIDER, ADMIN.
    pub kind: String,
    pub address_id: Option<Uuid>,
}

#[derive(ToSchema)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub cellphone_number: Option<String>,
    pub kind: String,
}

#[derive(ToSchema)]
pub struct AddressRequest {
    pub street: String,
    pub number: i32,
    pub neighborhood: String,
    pub city: String,
    pub federative_unit: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(ToSchema)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct ProviderRequest {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub verified: bool,
    pub payout_key: Option<String>,
    pub profile_photo_url: Option<String>,
    pub category_ids: Vec<Uuid>,
}

#[derive(ToSchema)]
pub struct ListingRequest {
    pub provider_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub active: bool,
    pub avg_duration: Option<f64>,
}

#[derive(ToSchema)]
pub struct MediaRequest {
    /// One of IMAGE, VIDEO.
    pub kind: String,
    pub url: String,
    pub short_description: Option<String>,
    pub position: i32,
}

#[derive(ToSchema)]
pub struct PaymentRequest {
    pub order_id: Uuid,
    /// One of PIX, CREDIT_CARD, DEBIT_CARD, CASH.
    pub method: String,
    /// One of PENDING, PAID, REFUNDED, FAILED.
    pub status: String,
    pub value: f64,
    pub transaction_id: i64,
}

#[derive(ToSchema)]
pub struct EvaluationRequest {
    pub order_id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub score: i32,
    pub comment: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::orders::list,
        crate::routes::orders::get_by_id,
        crate::routes::orders::by_client,
        crate::routes::orders::by_provider,
        crate::routes::orders::by_status,
        crate::routes::orders::create,
        crate::routes::orders::update_status,
        crate::routes::orders::cancel,
        crate::routes::orders::delete_order,
        crate::routes::reviews::list,
        crate::routes::reviews::get_by_id,
        crate::routes::reviews::by_listing,
        crate::routes::reviews::by_user,
        crate::routes::reviews::by_provider,
        crate::routes::reviews::average_by_listing,
        crate::routes::reviews::average_by_provider,
        crate::routes::reviews::count_by_listing,
        crate::routes::reviews::count_by_provider,
        crate::routes::reviews::create,
        crate::routes::reviews::update,
        crate::routes::reviews::delete_review,
        crate::routes::users::list,
        crate::routes::users::get_by_id,
        crate::routes::users::create,
        crate::routes::users::update,
        crate::routes::users::toggle_active,
        crate::routes::users::delete_user,
        crate::routes::addresses::create,
        crate::routes::addresses::get_by_id,
        crate::routes::addresses::update,
        crate::routes::addresses::delete_address,
        crate::routes::categories::list,
        crate::routes::categories::get_by_id,
        crate::routes::categories::create,
        crate::routes::categories::update,
        crate::routes::categories::delete_category,
        crate::routes::providers::list,
        crate::routes::providers::get_by_id,
        crate::routes::providers::categories,
        crate::routes::providers::create,
        crate::routes::providers::update,
        crate::routes::providers::delete_provider,
        crate::routes::listings::list,
        crate::routes::listings::get_by_id,
        crate::routes::listings::create,
        crate::routes::listings::update,
        crate::routes::listings::toggle_active,
        crate::routes::listings::delete_listing,
        crate::routes::listings::list_media,
        crate::routes::listings::add_media,
        crate::routes::listings::update_media,
        crate::routes::listings::delete_media,
        crate::routes::payments::list,
        crate::routes::payments::get_by_id,
        crate::routes::payments::create,
        crate::routes::payments::update,
        crate::routes::payments::delete_payment,
        crate::routes::evaluations::list,
        crate::routes::evaluations::get_by_id,
        crate::routes::evaluations::create,
        crate::routes::evaluations::update,
        crate::routes::evaluations::delete_evaluation,
        crate::routes::admin::stats,
    ),
    components(
        schemas(
            HealthResponse,
            CreateOrderRequest,
            StatusUpdateRequest,
            CreateReviewRequest,
            UpdateReviewRequest,
            CreateUserRequest,
            UpdateUserRequest,
            AddressRequest,
            CategoryRequest,
            ProviderRequest,
            ListingRequest,
            MediaRequest,
            PaymentRequest,
            EvaluationRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "orders", description = "Order lifecycle: creation, provider-gated transitions, client cancellation"),
        (name = "reviews", description = "Reviews of completed orders and rating aggregates"),
        (name = "users"),
        (name = "addresses"),
        (name = "categories"),
        (name = "providers"),
        (name = "listings"),
        (name = "payments"),
        (name = "evaluations"),
        (name = "admin")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted next to the API routes.
pub fn swagger_router() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
