use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, listing, order, user};

/// A client's rating of a completed order. Order/user/listing bindings are
/// immutable after creation; only rating and comment may change.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub listing_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Order,
    User,
    Listing,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Order => Entity::belongs_to(order::Entity)
                .from(Column::OrderId)
                .to(order::Column::Id)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Listing => Entity::belongs_to(listing::Entity)
                .from(Column::ListingId)
                .to(listing::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_rating(rating: i32) -> Result<(), errors::ModelError> {
    if !(1..=5).contains(&rating) {
        return Err(errors::ModelError::Validation("rating must be between 1 and 5".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_rating;

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(6).is_err());
    }
}
