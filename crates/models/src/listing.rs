use sea_orm::entity::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{category, errors, provider_profile};

/// A service listing published by a provider under a category.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub active: bool,
    pub avg_duration: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Provider,
    Category,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Provider => Entity::belongs_to(provider_profile::Entity)
                .from(Column::ProviderId)
                .to(provider_profile::Column::Id)
                .into(),
            Relation::Category => Entity::belongs_to(category::Entity)
                .from(Column::CategoryId)
                .to(category::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title required".into()));
    }
    Ok(())
}

pub fn validate_base_price(price: Decimal) -> Result<(), errors::ModelError> {
    if price <= Decimal::ZERO {
        return Err(errors::ModelError::Validation("base_price must be positive".into()));
    }
    Ok(())
}
