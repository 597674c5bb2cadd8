use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;

use models::{client, lift, lift_usage, pass_lift_usage};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreateLiftUsage {
    pub client_id: i32,
    pub lift_id: i32,
    pub usage_date: chrono::NaiveDate,
    pub usage_time_start: chrono::NaiveTime,
    pub usage_time_end: chrono::NaiveTime,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLiftUsage {
    pub client_id: Option<i32>,
    pub lift_id: Option<i32>,
    pub usage_date: Option<chrono::NaiveDate>,
    pub usage_time_start: Option<chrono::NaiveTime>,
    pub usage_time_end: Option<chrono::NaiveTime>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<lift_usage::Model>, ServiceError> {
    query::apply(lift_usage::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<lift_usage::Model, ServiceError> {
    lift_usage::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("LiftUsage", id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateLiftUsage,
) -> Result<lift_usage::Model, ServiceError> {
    client::Entity::find_by_id(input.client_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Client", input.client_id))?;
    lift::Entity::find_by_id(input.lift_id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Lift", input.lift_id))?;
    if input.usage_time_end <= input.usage_time_start {
        return Err(ServiceError::Validation("usage must end after it starts".into()));
    }
    lift_usage::ActiveModel {
        client_id: Set(input.client_id),
        lift_id: Set(input.lift_id),
        usage_date: Set(input.usage_date),
        usage_time_start: Set(input.usage_time_start),
        usage_time_end: Set(input.usage_time_end),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateLiftUsage,
) -> Result<lift_usage::Model, ServiceError> {
    let existing = get(db, id).await?;
    if let Some(client_id) = input.client_id {
        client::Entity::find_by_id(client_id)
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found("Client", client_id))?;
    }
    if let Some(lift_id) = input.lift_id {
        lift::Entity::find_by_id(lift_id)
            .one(db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| ServiceError::not_found("Lift", lift_id))?;
    }
    let start = input.usage_time_start.unwrap_or(existing.usage_time_start);
    let end = input.usage_time_end.unwrap_or(existing.usage_time_end);
    if end <= start {
        return Err(ServiceError::Validation("usage must end after it starts".into()));
    }
    let mut am: lift_usage::ActiveModel = existing.into();
    if let Some(v) = input.client_id {
        am.client_id = Set(v);
    }
    if let Some(v) = input.lift_id {
        am.lift_id = Set(v);
    }
    if let Some(v) = input.usage_date {
        am.usage_date = Set(v);
    }
    am.usage_time_start = Set(start);
    am.usage_time_end = Set(end);
    am.update(db).await.map_err(db_err)
}

/// Removing a usage also drops any pass link pointing at it. The linked
/// pass keeps its spent lift; refunds go through the link service.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    if lift_usage::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    let txn = db.begin().await.map_err(db_err)?;
    pass_lift_usage::Entity::delete_many()
        .filter(pass_lift_usage::Column::LiftUsageId.eq(id))
        .exec(&txn)
        .await
        .map_err(db_err)?;
    lift_usage::Entity::delete_by_id(id).exec(&txn).await.map_err(db_err)?;
    txn.commit().await.map_err(db_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db, time};

    #[tokio::test]
    async fn create_rejects_inverted_times() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let l = test_support::seed_lift(&db).await;
        let err = create(
            &db,
            CreateLiftUsage {
                client_id: c.id,
                lift_id: l.id,
                usage_date: test_support::date(2024, 1, 3),
                usage_time_start: time(10, 0),
                usage_time_end: time(9, 0),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_drops_pass_link_without_refund() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let l = test_support::seed_lift(&db).await;
        let pt = test_support::seed_pass_type(&db, 5, 0).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let u = create(
            &db,
            CreateLiftUsage {
                client_id: c.id,
                lift_id: l.id,
                usage_date: test_support::date(2024, 1, 3),
                usage_time_start: time(9, 0),
                usage_time_end: time(9, 5),
            },
        )
        .await
        .unwrap();
        crate::pass_lift_usage_service::add(&db, p.id, u.id).await.unwrap();

        assert!(delete(&db, u.id).await.unwrap());
        let p = models::passes::Entity::find_by_id(p.id).one(&db).await.unwrap().unwrap();
        assert_eq!(p.remaining_lifts, 4);
    }
}
