//! Client CRUD. Deleting a client removes everything hanging off it
//! (saved views, passes with their consumption links, rentals with their
//! equipment links, lift usages) inside one transaction, since the schema
//! keeps its foreign keys restrictive.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use serde::Deserialize;

use models::{
    client, lift_usage, pass_lift_usage, pass_rental_usage, passes, rental, rental_equipment,
    saved_view,
};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreateClient {
    pub full_name: String,
    pub document_id: String,
    pub date_of_birth: chrono::NaiveDate,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateClient {
    pub full_name: Option<String>,
    pub document_id: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<client::Model>, ServiceError> {
    query::apply(client::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<client::Model, ServiceError> {
    client::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Client", id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateClient,
) -> Result<client::Model, ServiceError> {
    let created = client::create(
        db,
        &input.full_name,
        &input.document_id,
        input.date_of_birth,
        &input.phone_number,
        &input.email,
    )
    .await?;
    Ok(created)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateClient,
) -> Result<client::Model, ServiceError> {
    let existing = get(db, id).await?;
    if let Some(name) = &input.full_name {
        client::validate_full_name(name)?;
    }
    if let Some(email) = &input.email {
        client::validate_email(email)?;
    }
    let mut am: client::ActiveModel = existing.into();
    if let Some(v) = input.full_name {
        am.full_name = Set(v);
    }
    if let Some(v) = input.document_id {
        am.document_id = Set(v);
    }
    if let Some(v) = input.date_of_birth {
        am.date_of_birth = Set(v);
    }
    if let Some(v) = input.phone_number {
        am.phone_number = Set(v);
    }
    if let Some(v) = input.email {
        am.email = Set(v);
    }
    am.update(db).await.map_err(db_err)
}

/// Delete a client and all dependent rows. Returns whether it existed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    if client::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    let txn = db.begin().await.map_err(db_err)?;
    delete_dependents(&txn, id).await?;
    client::Entity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
    txn.commit().await.map_err(db_err)?;
    Ok(true)
}

async fn delete_dependents<C: ConnectionTrait>(conn: &C, client_id: i32) -> Result<(), ServiceError> {
    saved_view::Entity::delete_many()
        .filter(saved_view::Column::ClientId.eq(client_id))
        .exec(conn)
        .await
        .map_err(db_err)?;

    // passes and the consumption links that reference them
    let pass_ids: Vec<i32> = passes::Entity::find()
        .select_only()
        .column(passes::Column::Id)
        .filter(passes::Column::ClientId.eq(client_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_err)?;
    if !pass_ids.is_empty() {
        pass_lift_usage::Entity::delete_many()
            .filter(pass_lift_usage::Column::PassId.is_in(pass_ids.clone()))
            .exec(conn)
            .await
            .map_err(db_err)?;
        pass_rental_usage::Entity::delete_many()
            .filter(pass_rental_usage::Column::PassId.is_in(pass_ids))
            .exec(conn)
            .await
            .map_err(db_err)?;
    }
    passes::Entity::delete_many()
        .filter(passes::Column::ClientId.eq(client_id))
        .exec(conn)
        .await
        .map_err(db_err)?;

    // rentals and their equipment / pass links
    let rental_ids: Vec<i32> = rental::Entity::find()
        .select_only()
        .column(rental::Column::Id)
        .filter(rental::Column::ClientId.eq(client_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_err)?;
    if !rental_ids.is_empty() {
        rental_equipment::Entity::delete_many()
            .filter(rental_equipment::Column::RentalId.is_in(rental_ids.clone()))
            .exec(conn)
            .await
            .map_err(db_err)?;
        pass_rental_usage::Entity::delete_many()
            .filter(pass_rental_usage::Column::RentalId.is_in(rental_ids))
            .exec(conn)
            .await
            .map_err(db_err)?;
    }
    rental::Entity::delete_many()
        .filter(rental::Column::ClientId.eq(client_id))
        .exec(conn)
        .await
        .map_err(db_err)?;

    // lift usages and the pass links pointing at them
    let usage_ids: Vec<i32> = lift_usage::Entity::find()
        .select_only()
        .column(lift_usage::Column::Id)
        .filter(lift_usage::Column::ClientId.eq(client_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(db_err)?;
    if !usage_ids.is_empty() {
        pass_lift_usage::Entity::delete_many()
            .filter(pass_lift_usage::Column::LiftUsageId.is_in(usage_ids))
            .exec(conn)
            .await
            .map_err(db_err)?;
    }
    lift_usage::Entity::delete_many()
        .filter(lift_usage::Column::ClientId.eq(client_id))
        .exec(conn)
        .await
        .map_err(db_err)?;

    Ok(())
}
