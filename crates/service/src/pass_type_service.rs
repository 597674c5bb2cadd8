use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use models::{pass_type, passes};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreatePassType {
    pub name: String,
    #[serde(default)]
    pub limit_lifts: i32,
    #[serde(default)]
    pub limit_hours: i32,
    pub price: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePassType {
    pub name: Option<String>,
    pub limit_lifts: Option<i32>,
    pub limit_hours: Option<i32>,
    pub price: Option<i32>,
}

fn validate_limits(limit_lifts: i32, limit_hours: i32) -> Result<(), ServiceError> {
    if limit_lifts < 0 || limit_hours < 0 {
        return Err(ServiceError::Validation("limits must be non-negative".into()));
    }
    if limit_lifts == 0 && limit_hours == 0 {
        return Err(ServiceError::Validation(
            "a pass type must grant lifts, hours, or both".into(),
        ));
    }
    Ok(())
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<pass_type::Model>, ServiceError> {
    query::apply(pass_type::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<pass_type::Model, ServiceError> {
    pass_type::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("PassType", id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreatePassType,
) -> Result<pass_type::Model, ServiceError> {
    validate_limits(input.limit_lifts, input.limit_hours)?;
    if input.price < 0 {
        return Err(ServiceError::Validation("price must be non-negative".into()));
    }
    pass_type::ActiveModel {
        name: Set(input.name),
        limit_lifts: Set(input.limit_lifts),
        limit_hours: Set(input.limit_hours),
        price: Set(input.price),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)
}

/// Limit changes affect only passes purchased afterwards; existing balances
/// are never rewritten.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdatePassType,
) -> Result<pass_type::Model, ServiceError> {
    let existing = get(db, id).await?;
    let limit_lifts = input.limit_lifts.unwrap_or(existing.limit_lifts);
    let limit_hours = input.limit_hours.unwrap_or(existing.limit_hours);
    validate_limits(limit_lifts, limit_hours)?;

    let mut am: pass_type::ActiveModel = existing.into();
    if let Some(v) = input.name {
        am.name = Set(v);
    }
    am.limit_lifts = Set(limit_lifts);
    am.limit_hours = Set(limit_hours);
    if let Some(v) = input.price {
        if v < 0 {
            return Err(ServiceError::Validation("price must be non-negative".into()));
        }
        am.price = Set(v);
    }
    am.update(db).await.map_err(db_err)
}

/// A type with purchased passes cannot be removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    if pass_type::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    let in_use = passes::Entity::find()
        .filter(passes::Column::PassTypeId.eq(id))
        .one(db)
        .await
        .map_err(db_err)?;
    if in_use.is_some() {
        return Err(ServiceError::InvalidState(format!(
            "PassType {} has purchased passes and cannot be deleted",
            id
        )));
    }
    pass_type::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db};

    #[tokio::test]
    async fn rejects_type_granting_nothing() {
        let db = get_db().await.unwrap();
        let err = create(
            &db,
            CreatePassType { name: "Empty".into(), limit_lifts: 0, limit_hours: 0, price: 100 },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn limit_change_leaves_existing_pass_balance_alone() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let pt = test_support::seed_pass_type(&db, 10, 0).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;

        update(&db, pt.id, UpdatePassType { limit_lifts: Some(20), ..Default::default() })
            .await
            .unwrap();
        let p = passes::Entity::find_by_id(p.id).one(&db).await.unwrap().unwrap();
        assert_eq!(p.remaining_lifts, 10);
    }

    #[tokio::test]
    async fn delete_blocked_while_passes_exist() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let pt = test_support::seed_pass_type(&db, 5, 0).await;
        test_support::seed_pass(&db, c.id, &pt).await;
        let err = delete(&db, pt.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }
}
