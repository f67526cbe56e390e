use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{category, provider_profile};

/// Join row linking a provider profile to a category it serves.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub provider_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: Uuid,
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
