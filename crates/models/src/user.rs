use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::address;
use crate::errors;

/// Account kind, stored as the uppercase enum string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserKind {
    #[sea_orm(string_value = "CLIENT")]
    Client,
    #[sea_orm(string_value = "PROVIDER")]
    Provider,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub cellphone_number: Option<String>,
    pub kind: UserKind,
    pub active: bool,
    pub address_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Address,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Address => Entity::belongs_to(address::Entity)
                .from(Column::AddressId)
                .to(address::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_must_contain_at() {
        assert!(validate_email("bob@example.com").is_ok());
        assert!(validate_email("bob.example.com").is_err());
    }

    #[test]
    fn kind_serializes_uppercase() {
        let s = serde_json::to_string(&UserKind::Provider).unwrap();
        assert_eq!(s, "\"PROVIDER\"");
    }
}
