use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use models::category;

use crate::errors::ServiceError;

/// Create a category.
pub async fn create_category(db: &DatabaseConnection, name: &str, description: Option<String>) -> Result<category::Model, ServiceError> {
    category::validate_name(name)?;
    let am = category::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(description),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get a category by id.
pub async fn get_category(db: &DatabaseConnection, id: Uuid) -> Result<Option<category::Model>, ServiceError> {
    category::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// List every category, alphabetically.
pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>, ServiceError> {
    category::Entity::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Rename a category / replace its description.
pub async fn update_category(db: &DatabaseConnection, id: Uuid, name: &str, description: Option<String>) -> Result<category::Model, ServiceError> {
    category::validate_name(name)?;
    let mut am: category::ActiveModel = category::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("category"))?
        .into();
    am.name = Set(name.to_string());
    am.description = Set(description);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Hard delete a category.
pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = category::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("category"))?;
    category::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}
