use sea_orm::entity::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub street: String,
    pub number: i32,
    pub neighborhood: String,
    pub city: String,
    pub federative_unit: String,
    pub postal_code: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_federative_unit(uf: &str) -> Result<(), errors::ModelError> {
    if uf.len() != 2 || !uf.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(errors::ModelError::Validation("federative_unit must be 2 letters".into()));
    }
    Ok(())
}

pub fn validate_postal_code(code: &str) -> Result<(), errors::ModelError> {
    if code.len() != 8 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("postal_code must be 8 digits".into()));
    }
    Ok(())
}
