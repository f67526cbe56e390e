use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use chrono::Utc;
use rand::rngs::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use common::pagination::Pagination;
use models::user::{self, UserKind};

use crate::errors::ServiceError;

/// Creation input for an account. The password arrives in plain text and is
/// hashed here; it is never stored as-is.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub cellphone_number: Option<String>,
    pub kind: UserKind,
    pub address_id: Option<Uuid>,
}

/// Update input; `password` is re-hashed only when supplied.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub cellphone_number: Option<String>,
    pub kind: UserKind,
}

fn hash_password(plain: &str) -> Result<String, ServiceError> {
    if plain.len() < 8 {
        return Err(ServiceError::Validation("password too short (>=8)".into()));
    }
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| ServiceError::Db(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Create a user account with a hashed password.
pub async fn create_user(db: &DatabaseConnection, input: NewUser) -> Result<user::Model, ServiceError> {
    user::validate_email(&input.email)?;
    user::validate_name(&input.name)?;
    let password_hash = hash_password(&input.password)?;

    let am = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        email: Set(input.email),
        password_hash: Set(password_hash),
        cellphone_number: Set(input.cellphone_number),
        kind: Set(input.kind),
        active: Set(true),
        address_id: Set(input.address_id),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// List users with pagination.
pub async fn list_users_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<user::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    user::Entity::find()
        .order_by_desc(user::Column::CreatedAt)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Update a user's profile fields; the password changes only when supplied.
pub async fn update_user(db: &DatabaseConnection, id: Uuid, input: UserUpdate) -> Result<user::Model, ServiceError> {
    user::validate_email(&input.email)?;
    user::validate_name(&input.name)?;

    let mut am: user::ActiveModel = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?
        .into();
    am.name = Set(input.name);
    am.email = Set(input.email);
    am.kind = Set(input.kind);
    am.cellphone_number = Set(input.cellphone_number);
    if let Some(plain) = input.password.filter(|p| !p.is_empty()) {
        am.password_hash = Set(hash_password(&plain)?);
    }
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Hard-delete a user (removes record).
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let existing = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    user::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// Flip the active flag.
pub async fn toggle_user_active(db: &DatabaseConnection, id: Uuid) -> Result<user::Model, ServiceError> {
    let found = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;
    let active = found.active;
    let mut am: user::ActiveModel = found.into();
    am.active = Set(!active);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn count_users(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    user::Entity::find().count(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn count_active_users(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    user::Entity::find()
        .filter(user::Column::Active.eq(true))
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(email: String) -> NewUser {
        NewUser {
            name: "Svc User".into(),
            email,
            password: "Secret123".into(),
            cellphone_number: None,
            kind: UserKind::Client,
            address_id: None,
        }
    }

    #[test]
    fn passwords_are_hashed_and_validated() {
        assert!(matches!(hash_password("short").unwrap_err(), ServiceError::Validation(_)));
        let hash = hash_password("Secret123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "Secret123");
    }

    #[tokio::test]
    async fn user_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let email = format!("svc_{}@example.com", Uuid::new_v4());
        let u = create_user(&db, input(email.clone())).await?;
        assert_eq!(u.email, email);
        assert!(u.active);

        let found = get_user(&db, u.id).await?.unwrap();
        assert_eq!(found.id, u.id);

        let updated = update_user(
            &db,
            u.id,
            UserUpdate {
                name: "New Name".into(),
                email: email.clone(),
                password: None,
                cellphone_number: Some("5551999".into()),
                kind: UserKind::Client,
            },
        )
        .await?;
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.password_hash, u.password_hash);

        let toggled = toggle_user_active(&db, u.id).await?;
        assert!(!toggled.active);

        delete_user(&db, u.id).await?;
        let after = get_user(&db, u.id).await?;
        assert!(after.is_none());
        Ok(())
    }
}
