use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use models::{equipment, equipment_type, rental_equipment};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreateEquipment {
    pub type_id: i32,
    pub model: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEquipment {
    pub type_id: Option<i32>,
    pub model: Option<String>,
    pub is_available: Option<bool>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<equipment::Model>, ServiceError> {
    query::apply(equipment::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<equipment::Model, ServiceError> {
    equipment::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Equipment", id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateEquipment,
) -> Result<equipment::Model, ServiceError> {
    equipment_type::Entity::find_by_id(input.type_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("EquipmentType", input.type_id))?;
    equipment::ActiveModel {
        type_id: Set(input.type_id),
        model: Set(input.model),
        is_available: Set(input.is_available),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateEquipment,
) -> Result<equipment::Model, ServiceError> {
    let existing = get(db, id).await?;
    if let Some(type_id) = input.type_id {
        equipment_type::Entity::find_by_id(type_id)
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found("EquipmentType", type_id))?;
    }
    let mut am: equipment::ActiveModel = existing.into();
    if let Some(v) = input.type_id {
        am.type_id = Set(v);
    }
    if let Some(v) = input.model {
        am.model = Set(v);
    }
    if let Some(v) = input.is_available {
        am.is_available = Set(v);
    }
    am.update(db).await.map_err(db_err)
}

/// Removing a unit also drops its rental links.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    use sea_orm::TransactionTrait;
    if equipment::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    let txn = db.begin().await.map_err(db_err)?;
    rental_equipment::Entity::delete_many()
        .filter(rental_equipment::Column::EquipmentId.eq(id))
        .exec(&txn)
        .await
        .map_err(db_err)?;
    equipment::Entity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
    txn.commit().await.map_err(db_err)?;
    Ok(true)
}
