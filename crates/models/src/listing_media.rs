use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, listing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    #[sea_orm(string_value = "IMAGE")]
    Image,
    #[sea_orm(string_value = "VIDEO")]
    Video,
}

/// Media row attached to a listing; `position` orders the gallery.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listing_media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub listing_id: Uuid,
    pub kind: MediaKind,
    pub url: String,
    pub short_description: Option<String>,
    pub position: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Listing,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Listing => Entity::belongs_to(listing::Entity)
                .from(Column::ListingId)
                .to(listing::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_url(url: &str) -> Result<(), errors::ModelError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(errors::ModelError::Validation("url must start with http(s)".into()));
    }
    Ok(())
}
