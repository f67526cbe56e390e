use sea_orm::entity::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors, listing, provider_profile, user};

/// Order lifecycle status, stored as the uppercase enum string.
///
/// Legal transitions between these values are owned by the service layer;
/// the entity only guarantees the stored value is one of the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "ACCEPTED")]
    Accepted,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// A client's request for a provider's listing, tracked through the status
/// lifecycle. Client/provider/listing references never change after creation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub status: OrderStatus,
    pub details: Option<String>,
    pub quantity: i64,
    pub value: Decimal,
    pub event_date: Date,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub listing_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Client,
    Provider,
    Listing,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(user::Entity)
                .from(Column::ClientId)
                .to(user::Column::Id)
                .into(),
            Relation::Provider => Entity::belongs_to(provider_profile::Entity)
                .from(Column::ProviderId)
                .to(provider_profile::Column::Id)
                .into(),
            Relation::Listing => Entity::belongs_to(listing::Entity)
                .from(Column::ListingId)
                .to(listing::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_quantity(quantity: i64) -> Result<(), errors::ModelError> {
    if quantity <= 0 {
        return Err(errors::ModelError::Validation("quantity must be positive".into()));
    }
    Ok(())
}

pub fn validate_value(value: Decimal) -> Result<(), errors::ModelError> {
    if value <= Decimal::ZERO {
        return Err(errors::ModelError::Validation("value must be positive".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_stored_string() {
        let s = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(s, "\"IN_PROGRESS\"");
        let back: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn quantity_and_value_must_be_positive() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(3).is_ok());
        assert!(validate_value(Decimal::ZERO).is_err());
        assert!(validate_value(Decimal::new(15000, 2)).is_ok());
    }
}
