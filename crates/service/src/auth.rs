//! Access keys and sessions. Passwords are argon2id-hashed at rest;
//! sessions are stateless JWTs carrying the key's role.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use models::access_key;

use crate::errors::ServiceError;

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// login of the access key
    pub sub: String,
    pub role: String,
    pub exp: u64,
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Db(format!("password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

/// Create an access key with the given role. Logins are unique.
pub async fn register_key(
    db: &DatabaseConnection,
    login: &str,
    password: &str,
    access_right: &str,
) -> Result<access_key::Model, ServiceError> {
    if login.trim().is_empty() {
        return Err(ServiceError::Validation("login required".into()));
    }
    if password.len() < 8 {
        return Err(ServiceError::Validation("password must be at least 8 characters".into()));
    }
    let taken = access_key::Entity::find()
        .filter(access_key::Column::Login.eq(login))
        .one(db)
        .await
        .map_err(db_err)?;
    if taken.is_some() {
        return Err(ServiceError::InvalidState(format!("login '{}' is taken", login)));
    }
    access_key::ActiveModel {
        login: Set(login.to_string()),
        password_hash: Set(hash_password(password)?),
        access_right: Set(access_right.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)
}

/// Check credentials. The same error covers an unknown login and a wrong
/// password, so probing logins learns nothing.
pub async fn login(
    db: &DatabaseConnection,
    login: &str,
    password: &str,
) -> Result<access_key::Model, ServiceError> {
    let key = access_key::Entity::find()
        .filter(access_key::Column::Login.eq(login))
        .one(db)
        .await
        .map_err(db_err)?;
    match key {
        Some(key) if verify_password(password, &key.password_hash) => Ok(key),
        _ => Err(ServiceError::Unauthorized("invalid login or password".into())),
    }
}

pub fn issue_token(
    secret: &str,
    key: &access_key::Model,
    ttl_secs: u64,
) -> Result<String, ServiceError> {
    let exp = jsonwebtoken::get_current_timestamp() + ttl_secs;
    let claims = Claims { sub: key.login.clone(), role: key.access_right.clone(), exp };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| ServiceError::Db(format!("token encoding failed: {}", e)))
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims, ServiceError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ServiceError::Unauthorized("invalid or expired session".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[test]
    fn hash_verifies_and_rejects() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn token_roundtrip_preserves_claims() {
        let key = access_key::Model {
            id: 1,
            login: "manager".into(),
            password_hash: String::new(),
            access_right: "admin".into(),
        };
        let token = issue_token("s3cret", &key, 3600).unwrap();
        let claims = verify_token("s3cret", &token).unwrap();
        assert_eq!(claims.sub, "manager");
        assert_eq!(claims.role, "admin");
        assert!(verify_token("other-secret", &token).is_err());
    }

    #[tokio::test]
    async fn register_then_login() {
        let db = get_db().await.unwrap();
        register_key(&db, "frontdesk", "password123", "staff").await.unwrap();

        let key = login(&db, "frontdesk", "password123").await.unwrap();
        assert_eq!(key.access_right, "staff");

        let err = login(&db, "frontdesk", "nope-nope").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
        let err = login(&db, "ghost", "password123").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn duplicate_login_rejected() {
        let db = get_db().await.unwrap();
        register_key(&db, "frontdesk", "password123", "staff").await.unwrap();
        let err = register_key(&db, "frontdesk", "password456", "staff").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }
}
