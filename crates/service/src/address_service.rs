use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use models::address;

use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct AddressInput {
    pub street: String,
    pub number: i32,
    pub neighborhood: String,
    pub city: String,
    pub federative_unit: String,
    pub postal_code: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

/// Create an address.
pub async fn create_address(db: &DatabaseConnection, input: AddressInput) -> Result<address::Model, ServiceError> {
    address::validate_federative_unit(&input.federative_unit)?;
    address::validate_postal_code(&input.postal_code)?;

    let am = address::ActiveModel {
        id: Set(Uuid::new_v4()),
        street: Set(input.street),
        number: Set(input.number),
        neighborhood: Set(input.neighborhood),
        city: Set(input.city),
        federative_unit: Set(input.federative_unit.to_ascii_uppercase()),
        postal_code: Set(input.postal_code),
        latitude: Set(input.latitude),
        longitude: Set(input.longitude),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get an address by id.
pub async fn get_address(db: &DatabaseConnection, id: Uuid) -> Result<Option<address::Model>, ServiceError> {
    address::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace an address's fields.
pub async fn update_address(db: &DatabaseConnection, id: Uuid, input: AddressInput) -> Result<address::Model, ServiceError> {
    address::validate_federative_unit(&input.federative_unit)?;
    address::validate_postal_code(&input.postal_code)?;

    let mut am: address::ActiveModel = address::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("address"))?
        .into();
    am.street = Set(input.street);
    am.number = Set(input.number);
    am.neighborhood = Set(input.neighborhood);
    am.city = Set(input.city);
    am.federative_unit = Set(input.federative_unit.to_ascii_uppercase());
    am.postal_code = Set(input.postal_code);
    am.latitude = Set(input.latitude);
    am.longitude = Set(input.longitude);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Hard delete an address.
pub async fn delete_address(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = address::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("address"))?;
    address::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}
