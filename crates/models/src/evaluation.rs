use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, order, provider_profile, user};

/// Provider evaluation attached to an order by the client. Flat record.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub score: i32,
    pub comment: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Order,
    Client,
    Provider,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::belongs_to(order::Entity)
                .from(Column::OrderId)
                .to(order::Column::Id)
                .into(),
            Relation::Client => Entity::belongs_to(user::Entity)
                .from(Column::ClientId)
                .to(user::Column::Id)
                .into(),
            Relation::Provider => Entity::belongs_to(provider_profile::Entity)
                .from(Column::ProviderId)
                .to(provider_profile::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_score(score: i32) -> Result<(), errors::ModelError> {
    if !(1..=5).contains(&score) {
        return Err(errors::ModelError::Validation("score must be between 1 and 5".into()));
    }
    Ok(())
}
