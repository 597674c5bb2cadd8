use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use models::{lift, lift_usage};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreateLift {
    pub name: String,
    pub height: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLift {
    pub name: Option<String>,
    pub height: Option<i32>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<lift::Model>, ServiceError> {
    query::apply(lift::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<lift::Model, ServiceError> {
    lift::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Lift", id))
}

pub async fn create(db: &DatabaseConnection, input: CreateLift) -> Result<lift::Model, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("name required".into()));
    }
    lift::ActiveModel { name: Set(input.name), height: Set(input.height), ..Default::default() }
        .insert(db)
        .await
        .map_err(db_err)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateLift,
) -> Result<lift::Model, ServiceError> {
    let existing = get(db, id).await?;
    let mut am: lift::ActiveModel = existing.into();
    if let Some(v) = input.name {
        am.name = Set(v);
    }
    if let Some(v) = input.height {
        am.height = Set(v);
    }
    am.update(db).await.map_err(db_err)
}

/// A lift with recorded usages cannot be removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    if lift::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    let in_use = lift_usage::Entity::find()
        .filter(lift_usage::Column::LiftId.eq(id))
        .one(db)
        .await
        .map_err(db_err)?;
    if in_use.is_some() {
        return Err(ServiceError::InvalidState(format!(
            "Lift {} has recorded usages and cannot be deleted",
            id
        )));
    }
    lift::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(true)
}
