//! Rental CRUD. Deleting a rental removes its equipment links and any pass
//! charge record; the hours already spent stay spent. A refund, when
//! wanted, is an explicit unlink through the pass-rental link service
//! before the rental goes away.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;

use models::{client, employee, pass_rental_usage, rental, rental_equipment};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreateRental {
    pub client_id: i32,
    pub employee_id: i32,
    pub rental_date: chrono::NaiveDate,
    pub start_time: chrono::NaiveTime,
    pub end_time: Option<chrono::NaiveTime>,
    pub rental_type: String,
    pub total_price: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRental {
    pub client_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub rental_date: Option<chrono::NaiveDate>,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<Option<chrono::NaiveTime>>,
    pub rental_type: Option<String>,
    pub total_price: Option<i32>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<rental::Model>, ServiceError> {
    query::apply(rental::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<rental::Model, ServiceError> {
    rental::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Rental", id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateRental,
) -> Result<rental::Model, ServiceError> {
    client::Entity::find_by_id(input.client_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Client", input.client_id))?;
    employee::Entity::find_by_id(input.employee_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Employee", input.employee_id))?;
    if let Some(end) = input.end_time {
        if end <= input.start_time {
            return Err(ServiceError::Validation("rental must end after it starts".into()));
        }
    }
    if input.total_price < 0 {
        return Err(ServiceError::Validation("total_price must be non-negative".into()));
    }
    rental::ActiveModel {
        client_id: Set(input.client_id),
        employee_id: Set(input.employee_id),
        rental_date: Set(input.rental_date),
        start_time: Set(input.start_time),
        end_time: Set(input.end_time),
        rental_type: Set(input.rental_type),
        total_price: Set(input.total_price),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateRental,
) -> Result<rental::Model, ServiceError> {
    let existing = get(db, id).await?;
    if let Some(client_id) = input.client_id {
        client::Entity::find_by_id(client_id)
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found("Client", client_id))?;
    }
    if let Some(employee_id) = input.employee_id {
        employee::Entity::find_by_id(employee_id)
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found("Employee", employee_id))?;
    }
    let start = input.start_time.unwrap_or(existing.start_time);
    let end = match input.end_time {
        Some(v) => v,
        None => existing.end_time,
    };
    if let Some(end) = end {
        if end <= start {
            return Err(ServiceError::Validation("rental must end after it starts".into()));
        }
    }
    let mut am: rental::ActiveModel = existing.into();
    if let Some(v) = input.client_id {
        am.client_id = Set(v);
    }
    if let Some(v) = input.employee_id {
        am.employee_id = Set(v);
    }
    if let Some(v) = input.rental_date {
        am.rental_date = Set(v);
    }
    am.start_time = Set(start);
    am.end_time = Set(end);
    if let Some(v) = input.rental_type {
        am.rental_type = Set(v);
    }
    if let Some(v) = input.total_price {
        if v < 0 {
            return Err(ServiceError::Validation("total_price must be non-negative".into()));
        }
        am.total_price = Set(v);
    }
    am.update(db).await.map_err(db_err)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    if rental::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    let txn = db.begin().await.map_err(db_err)?;
    rental_equipment::Entity::delete_many()
        .filter(rental_equipment::Column::RentalId.eq(id))
        .exec(&txn)
        .await
        .map_err(db_err)?;
    pass_rental_usage::Entity::delete_many()
        .filter(pass_rental_usage::Column::RentalId.eq(id))
        .exec(&txn)
        .await
        .map_err(db_err)?;
    rental::Entity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
    txn.commit().await.map_err(db_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db, time};

    async fn seed_rental(db: &DatabaseConnection) -> rental::Model {
        let c = test_support::seed_client(db).await;
        let e = test_support::seed_employee(db).await;
        create(
            db,
            CreateRental {
                client_id: c.id,
                employee_id: e.id,
                rental_date: test_support::date(2024, 1, 6),
                start_time: time(9, 0),
                end_time: Some(time(12, 0)),
                rental_type: "snowboard".into(),
                total_price: 450,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn open_rental_can_be_closed_later() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        let r = create(
            &db,
            CreateRental {
                client_id: c.id,
                employee_id: e.id,
                rental_date: test_support::date(2024, 1, 6),
                start_time: time(9, 0),
                end_time: None,
                rental_type: "ski".into(),
                total_price: 0,
            },
        )
        .await
        .unwrap();
        assert!(r.end_time.is_none());

        let r = update(
            &db,
            r.id,
            UpdateRental { end_time: Some(Some(time(13, 30))), ..Default::default() },
        )
        .await
        .unwrap();
        assert_eq!(r.end_time, Some(time(13, 30)));
    }

    #[tokio::test]
    async fn update_rejects_end_before_start() {
        let db = get_db().await.unwrap();
        let r = seed_rental(&db).await;
        let err = update(
            &db,
            r.id,
            UpdateRental { end_time: Some(Some(time(8, 0))), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_keeps_charge_spent() {
        let db = get_db().await.unwrap();
        let r = seed_rental(&db).await;
        let pt = test_support::seed_pass_type(&db, 0, 10).await;
        let p = test_support::seed_pass(&db, r.client_id, &pt).await;
        crate::pass_rental_usage_service::add(&db, p.id, r.id).await.unwrap();

        assert!(delete(&db, r.id).await.unwrap());
        let p = models::passes::Entity::find_by_id(p.id).one(&db).await.unwrap().unwrap();
        assert!((p.remaining_hours - 7.0).abs() < 1e-9);
        assert!(pass_rental_usage::Entity::find_by_id((p.id, r.id))
            .one(&db)
            .await
            .unwrap()
            .is_none());
    }
}
