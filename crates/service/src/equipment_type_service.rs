use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use models::{equipment, equipment_type};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreateEquipmentType {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEquipmentType {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<equipment_type::Model>, ServiceError> {
    query::apply(equipment_type::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<equipment_type::Model, ServiceError> {
    equipment_type::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("EquipmentType", id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateEquipmentType,
) -> Result<equipment_type::Model, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("name required".into()));
    }
    equipment_type::ActiveModel {
        name: Set(input.name),
        description: Set(input.description),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateEquipmentType,
) -> Result<equipment_type::Model, ServiceError> {
    let existing = get(db, id).await?;
    let mut am: equipment_type::ActiveModel = existing.into();
    if let Some(v) = input.name {
        am.name = Set(v);
    }
    if let Some(v) = input.description {
        am.description = Set(v);
    }
    am.update(db).await.map_err(db_err)
}

/// A type still referenced by equipment units cannot be removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    if equipment_type::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    let in_use = equipment::Entity::find()
        .filter(equipment::Column::TypeId.eq(id))
        .one(db)
        .await
        .map_err(db_err)?;
    if in_use.is_some() {
        return Err(ServiceError::InvalidState(format!(
            "EquipmentType {} still has equipment units",
            id
        )));
    }
    equipment_type::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(true)
}
