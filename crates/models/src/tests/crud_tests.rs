use crate::db::connect;
use crate::{category, listing, order, provider_profile, review, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use migration::MigratorTrait;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn new_user(kind: user::UserKind) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Test User".into()),
        email: Set(format!("crud_{}@example.com", Uuid::new_v4())),
        password_hash: Set("$argon2id$test".into()),
        cellphone_number: Set(None),
        kind: Set(kind),
        active: Set(true),
        address_id: Set(None),
        created_at: Set(Utc::now().into()),
    }
}

/// Test complete workflow: user -> provider -> category -> listing -> order -> review
#[tokio::test]
async fn test_complete_workflow() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let client = new_user(user::UserKind::Client).insert(&db).await?;
    let provider_user = new_user(user::UserKind::Provider).insert(&db).await?;

    let provider = provider_profile::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(provider_user.id),
        bio: Set(Some("test provider".into())),
        verified: Set(false),
        payout_key: Set(None),
        profile_photo_url: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;

    let cat = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("crud_category_{}", Uuid::new_v4())),
        description: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;

    let lst = listing::ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_id: Set(provider.id),
        category_id: Set(cat.id),
        title: Set("Test listing".into()),
        description: Set(None),
        base_price: Set(Decimal::new(15000, 2)),
        active: Set(true),
        avg_duration: Set(None),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
    }
    .insert(&db)
    .await?;

    let ord = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        status: Set(order::OrderStatus::Completed),
        details: Set(Some("workflow order".into())),
        quantity: Set(1),
        value: Set(Decimal::new(15000, 2)),
        event_date: Set(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
        client_id: Set(client.id),
        provider_id: Set(provider.id),
        listing_id: Set(lst.id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;

    let rev = review::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(ord.id),
        user_id: Set(client.id),
        listing_id: Set(lst.id),
        rating: Set(5),
        comment: Set(Some("great".into())),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;

    // Verify all entities exist and are properly linked
    let found_order = order::Entity::find_by_id(ord.id).one(&db).await?.unwrap();
    assert_eq!(found_order.status, order::OrderStatus::Completed);
    assert_eq!(found_order.client_id, client.id);
    assert_eq!(found_order.provider_id, provider.id);

    let found_review = review::Entity::find()
        .filter(review::Column::OrderId.eq(ord.id))
        .filter(review::Column::UserId.eq(client.id))
        .one(&db)
        .await?;
    assert!(found_review.is_some());
    assert_eq!(found_review.unwrap().id, rev.id);

    // Cleanup in reverse order
    review::Entity::delete_by_id(rev.id).exec(&db).await?;
    order::Entity::delete_by_id(ord.id).exec(&db).await?;
    listing::Entity::delete_by_id(lst.id).exec(&db).await?;
    category::Entity::delete_by_id(cat.id).exec(&db).await?;
    provider_profile::Entity::delete_by_id(provider.id).exec(&db).await?;
    user::Entity::delete_by_id(provider_user.id).exec(&db).await?;
    user::Entity::delete_by_id(client.id).exec(&db).await?;
    Ok(())
}

/// Status round-trips through its stored string form
#[tokio::test]
async fn test_order_status_persists_as_string() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let client = new_user(user::UserKind::Client).insert(&db).await?;
    let provider_user = new_user(user::UserKind::Provider).insert(&db).await?;
    let provider = provider_profile::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(provider_user.id),
        bio: Set(None),
        verified: Set(true),
        payout_key: Set(None),
        profile_photo_url: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;
    let cat = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("status_category_{}", Uuid::new_v4())),
        description: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;
    let lst = listing::ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_id: Set(provider.id),
        category_id: Set(cat.id),
        title: Set("Status listing".into()),
        description: Set(None),
        base_price: Set(Decimal::new(9900, 2)),
        active: Set(true),
        avg_duration: Set(None),
        created_at: Set(Utc::now().into()),
        updated_at: Set(None),
    }
    .insert(&db)
    .await?;

    let ord = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        status: Set(order::OrderStatus::InProgress),
        details: Set(None),
        quantity: Set(2),
        value: Set(Decimal::new(19800, 2)),
        event_date: Set(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()),
        client_id: Set(client.id),
        provider_id: Set(provider.id),
        listing_id: Set(lst.id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&db)
    .await?;

    let by_status = order::Entity::find()
        .filter(order::Column::Status.eq(order::OrderStatus::InProgress))
        .filter(order::Column::Id.eq(ord.id))
        .one(&db)
        .await?;
    assert!(by_status.is_some());

    order::Entity::delete_by_id(ord.id).exec(&db).await?;
    listing::Entity::delete_by_id(lst.id).exec(&db).await?;
    category::Entity::delete_by_id(cat.id).exec(&db).await?;
    provider_profile::Entity::delete_by_id(provider.id).exec(&db).await?;
    user::Entity::delete_by_id(provider_user.id).exec(&db).await?;
    user::Entity::delete_by_id(client.id).exec(&db).await?;
    Ok(())
}
