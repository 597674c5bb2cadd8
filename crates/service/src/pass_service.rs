//! Pass CRUD. Balances are seeded at purchase from the type's limits and
//! are owned by the consumption-link services afterwards; a plain update
//! never touches them.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;

use models::{client, pass_lift_usage, pass_rental_usage, pass_type, passes};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreatePass {
    pub client_id: i32,
    pub pass_type_id: i32,
    pub purchase_date: chrono::NaiveDate,
    pub valid_from: chrono::NaiveDate,
    pub valid_to: chrono::NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePass {
    pub client_id: Option<i32>,
    pub purchase_date: Option<chrono::NaiveDate>,
    pub valid_from: Option<chrono::NaiveDate>,
    pub valid_to: Option<chrono::NaiveDate>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<passes::Model>, ServiceError> {
    query::apply(passes::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<passes::Model, ServiceError> {
    passes::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Pass", id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreatePass,
) -> Result<passes::Model, ServiceError> {
    client::Entity::find_by_id(input.client_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Client", input.client_id))?;
    let ptype = pass_type::Entity::find_by_id(input.pass_type_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("PassType", input.pass_type_id))?;
    let created = passes::create(
        db,
        input.client_id,
        &ptype,
        input.purchase_date,
        input.valid_from,
        input.valid_to,
    )
    .await?;
    Ok(created)
}

/// Patch ownership and validity dates. The pass type and both balances are
/// deliberately not patchable here.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdatePass,
) -> Result<passes::Model, ServiceError> {
    let existing = get(db, id).await?;
    if let Some(client_id) = input.client_id {
        client::Entity::find_by_id(client_id)
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found("Client", client_id))?;
    }
    let valid_from = input.valid_from.unwrap_or(existing.valid_from);
    let valid_to = input.valid_to.unwrap_or(existing.valid_to);
    if valid_to < valid_from {
        return Err(ServiceError::Validation("valid_to precedes valid_from".into()));
    }
    let mut am: passes::ActiveModel = existing.into();
    if let Some(v) = input.client_id {
        am.client_id = Set(v);
    }
    if let Some(v) = input.purchase_date {
        am.purchase_date = Set(v);
    }
    am.valid_from = Set(valid_from);
    am.valid_to = Set(valid_to);
    am.update(db).await.map_err(db_err)
}

/// Delete a pass and its consumption links. No refunds are computed; the
/// balances disappear with the pass.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    if passes::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    let txn = db.begin().await.map_err(db_err)?;
    pass_lift_usage::Entity::delete_many()
        .filter(pass_lift_usage::Column::PassId.eq(id))
        .exec(&txn)
        .await
        .map_err(db_err)?;
    pass_rental_usage::Entity::delete_many()
        .filter(pass_rental_usage::Column::PassId.eq(id))
        .exec(&txn)
        .await
        .map_err(db_err)?;
    passes::Entity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
    txn.commit().await.map_err(db_err)?;
    Ok(true)
}
