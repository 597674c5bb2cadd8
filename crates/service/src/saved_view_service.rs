//! Bookmarked list URLs a client can return to, filters and sort included.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;

use models::{client, saved_view};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreateSavedView {
    pub name: String,
    pub url: String,
    pub client_id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSavedView {
    pub name: Option<String>,
    pub url: Option<String>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<saved_view::Model>, ServiceError> {
    query::apply(saved_view::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<saved_view::Model, ServiceError> {
    saved_view::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("SavedView", id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateSavedView,
) -> Result<saved_view::Model, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("name required".into()));
    }
    if input.url.trim().is_empty() {
        return Err(ServiceError::Validation("url required".into()));
    }
    client::Entity::find_by_id(input.client_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Client", input.client_id))?;
    saved_view::ActiveModel {
        name: Set(input.name),
        url: Set(input.url),
        client_id: Set(input.client_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateSavedView,
) -> Result<saved_view::Model, ServiceError> {
    let existing = get(db, id).await?;
    let mut am: saved_view::ActiveModel = existing.into();
    if let Some(v) = input.name {
        if v.trim().is_empty() {
            return Err(ServiceError::Validation("name required".into()));
        }
        am.name = Set(v);
    }
    if let Some(v) = input.url {
        if v.trim().is_empty() {
            return Err(ServiceError::Validation("url required".into()));
        }
        am.url = Set(v);
    }
    am.update(db).await.map_err(db_err)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    if saved_view::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    saved_view::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db};

    #[tokio::test]
    async fn create_requires_existing_client() {
        let db = get_db().await.unwrap();
        let err = create(
            &db,
            CreateSavedView {
                name: "my passes".into(),
                url: "/passes?filter_cols=client_id&filter_ops=eq&filter_vals=1".into(),
                client_id: 41,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn rename_keeps_url() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let v = create(
            &db,
            CreateSavedView {
                name: "rentals today".into(),
                url: "/rentals?sort_by=rental_date&descending=true".into(),
                client_id: c.id,
            },
        )
        .await
        .unwrap();
        let v2 = update(
            &db,
            v.id,
            UpdateSavedView { name: Some("recent rentals".into()), ..Default::default() },
        )
        .await
        .unwrap();
        assert_eq!(v2.url, v.url);
        assert_eq!(v2.name, "recent rentals");
    }
}
