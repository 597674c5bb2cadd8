//! Lift-count consumption accounting.
//!
//! A pass-to-lift-usage link charges the pass one remaining lift; removing
//! the link gives it back. All mutations run inside one transaction and the
//! balance write is a guarded check-and-set, so two concurrent charges
//! against a nearly exhausted pass cannot both succeed.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use models::{lift_usage, pass_lift_usage, pass_type, passes};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<pass_lift_usage::Model>, ServiceError> {
    query::apply(pass_lift_usage::Entity::find(), params)
        .all(db)
        .await
        .map_err(db_err)
}

pub async fn get(
    db: &DatabaseConnection,
    pass_id: i32,
    lift_usage_id: i32,
) -> Result<Option<pass_lift_usage::Model>, ServiceError> {
    pass_lift_usage::Entity::find_by_id((pass_id, lift_usage_id))
        .one(db)
        .await
        .map_err(db_err)
}

/// Link a lift usage to a pass, charging one lift.
pub async fn add(
    db: &DatabaseConnection,
    pass_id: i32,
    lift_usage_id: i32,
) -> Result<pass_lift_usage::Model, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    let created = add_in(&txn, pass_id, lift_usage_id).await?;
    txn.commit().await.map_err(db_err)?;
    Ok(created)
}

/// Unlink, restoring the lift if the pass still resolves to a lift-capable
/// type. A dangling link whose pass or type is gone is removed without any
/// balance change. Returns whether a link was removed.
pub async fn delete(
    db: &DatabaseConnection,
    pass_id: i32,
    lift_usage_id: i32,
) -> Result<bool, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    let removed = delete_in(&txn, pass_id, lift_usage_id).await?;
    txn.commit().await.map_err(db_err)?;
    Ok(removed)
}

/// Move the charge from one (pass, usage) pair to another. Runs as a single
/// transaction: if charging the new pair fails, the old link and its
/// balance survive untouched. Returns `None` when the old link is missing.
pub async fn update(
    db: &DatabaseConnection,
    old_pass_id: i32,
    old_lift_usage_id: i32,
    new_pass_id: i32,
    new_lift_usage_id: i32,
) -> Result<Option<pass_lift_usage::Model>, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    if !delete_in(&txn, old_pass_id, old_lift_usage_id).await? {
        return Ok(None);
    }
    let created = add_in(&txn, new_pass_id, new_lift_usage_id).await?;
    txn.commit().await.map_err(db_err)?;
    Ok(Some(created))
}

async fn add_in<C: ConnectionTrait>(
    conn: &C,
    pass_id: i32,
    lift_usage_id: i32,
) -> Result<pass_lift_usage::Model, ServiceError> {
    let pass = passes::Entity::find_by_id(pass_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Pass", pass_id))?;
    lift_usage::Entity::find_by_id(lift_usage_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("LiftUsage", lift_usage_id))?;
    let ptype = pass_type::Entity::find_by_id(pass.pass_type_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("PassType", pass.pass_type_id))?;

    if ptype.limit_lifts <= 0 {
        return Err(ServiceError::InvalidState(format!("Pass {} is not a lift pass", pass_id)));
    }
    if pass.remaining_lifts <= 0 {
        return Err(ServiceError::InvalidState(format!("Pass {} has no lifts remaining", pass_id)));
    }

    charge_one_lift(conn, pass_id).await?;

    let am = pass_lift_usage::ActiveModel {
        pass_id: Set(pass_id),
        lift_usage_id: Set(lift_usage_id),
    };
    am.insert(conn).await.map_err(db_err)
}

async fn delete_in<C: ConnectionTrait>(
    conn: &C,
    pass_id: i32,
    lift_usage_id: i32,
) -> Result<bool, ServiceError> {
    let entry = pass_lift_usage::Entity::find_by_id((pass_id, lift_usage_id))
        .one(conn)
        .await
        .map_err(db_err)?;
    if entry.is_none() {
        return Ok(false);
    }

    let pass = passes::Entity::find_by_id(pass_id).one(conn).await.map_err(db_err)?;
    if let Some(pass) = pass {
        let ptype =
            pass_type::Entity::find_by_id(pass.pass_type_id).one(conn).await.map_err(db_err)?;
        if ptype.map(|t| t.limit_lifts > 0).unwrap_or(false) {
            restore_one_lift(conn, pass_id).await?;
        }
    }

    pass_lift_usage::Entity::delete_by_id((pass_id, lift_usage_id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    Ok(true)
}

/// Guarded decrement: only succeeds while a lift is actually left, even if
/// a concurrent charge landed between our read and this write.
async fn charge_one_lift<C: ConnectionTrait>(conn: &C, pass_id: i32) -> Result<(), ServiceError> {
    let res = passes::Entity::update_many()
        .col_expr(
            passes::Column::RemainingLifts,
            Expr::col(passes::Column::RemainingLifts).sub(1),
        )
        .filter(passes::Column::Id.eq(pass_id))
        .filter(passes::Column::RemainingLifts.gt(0))
        .exec(conn)
        .await
        .map_err(db_err)?;
    if res.rows_affected == 0 {
        return Err(ServiceError::InvalidState(format!("Pass {} has no lifts remaining", pass_id)));
    }
    Ok(())
}

async fn restore_one_lift<C: ConnectionTrait>(conn: &C, pass_id: i32) -> Result<(), ServiceError> {
    passes::Entity::update_many()
        .col_expr(
            passes::Column::RemainingLifts,
            Expr::col(passes::Column::RemainingLifts).add(1),
        )
        .filter(passes::Column::Id.eq(pass_id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db, time};
    use sea_orm::EntityTrait;

    async fn seed_usage(db: &DatabaseConnection, client_id: i32, lift_id: i32) -> lift_usage::Model {
        use sea_orm::{ActiveModelTrait, Set};
        lift_usage::ActiveModel {
            client_id: Set(client_id),
            lift_id: Set(lift_id),
            usage_date: Set(test_support::date(2024, 1, 15)),
            usage_time_start: Set(time(10, 0)),
            usage_time_end: Set(time(10, 5)),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    async fn remaining_lifts(db: &DatabaseConnection, pass_id: i32) -> i32 {
        passes::Entity::find_by_id(pass_id).one(db).await.unwrap().unwrap().remaining_lifts
    }

    #[tokio::test]
    async fn link_create_then_delete_is_identity() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let l = test_support::seed_lift(&db).await;
        let pt = test_support::seed_pass_type(&db, 5, 0).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let u = seed_usage(&db, c.id, l.id).await;

        add(&db, p.id, u.id).await.unwrap();
        assert_eq!(remaining_lifts(&db, p.id).await, 4);

        assert!(delete(&db, p.id, u.id).await.unwrap());
        assert_eq!(remaining_lifts(&db, p.id).await, 5);
    }

    #[tokio::test]
    async fn ten_lift_pass_scenario() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let l = test_support::seed_lift(&db).await;
        let pt = test_support::seed_pass_type(&db, 10, 0).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        assert_eq!(p.remaining_lifts, 10);

        let u1 = seed_usage(&db, c.id, l.id).await;
        let u2 = seed_usage(&db, c.id, l.id).await;
        let u3 = seed_usage(&db, c.id, l.id).await;
        add(&db, p.id, u1.id).await.unwrap();
        add(&db, p.id, u2.id).await.unwrap();
        add(&db, p.id, u3.id).await.unwrap();
        assert_eq!(remaining_lifts(&db, p.id).await, 7);

        assert!(delete(&db, p.id, u2.id).await.unwrap());
        assert_eq!(remaining_lifts(&db, p.id).await, 8);
    }

    #[tokio::test]
    async fn exhausted_pass_rejects_link_without_mutation() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let l = test_support::seed_lift(&db).await;
        let pt = test_support::seed_pass_type(&db, 1, 0).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let u1 = seed_usage(&db, c.id, l.id).await;
        let u2 = seed_usage(&db, c.id, l.id).await;

        add(&db, p.id, u1.id).await.unwrap();
        assert_eq!(remaining_lifts(&db, p.id).await, 0);

        let err = add(&db, p.id, u2.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        assert_eq!(remaining_lifts(&db, p.id).await, 0);
        assert!(get(&db, p.id, u2.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn hourly_only_pass_is_wrong_kind() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let l = test_support::seed_lift(&db).await;
        let pt = test_support::seed_pass_type(&db, 0, 8).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let u = seed_usage(&db, c.id, l.id).await;

        let err = add(&db, p.id, u.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn missing_pass_or_usage_is_not_found() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let l = test_support::seed_lift(&db).await;
        let pt = test_support::seed_pass_type(&db, 5, 0).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let u = seed_usage(&db, c.id, l.id).await;

        let err = add(&db, 9999, u.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = add(&db, p.id, 9999).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn failed_update_preserves_original_link_and_balance() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let l = test_support::seed_lift(&db).await;
        let pt = test_support::seed_pass_type(&db, 5, 0).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let u = seed_usage(&db, c.id, l.id).await;

        add(&db, p.id, u.id).await.unwrap();
        assert_eq!(remaining_lifts(&db, p.id).await, 4);

        // new pass does not exist: the whole update rolls back
        let err = update(&db, p.id, u.id, 9999, u.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(get(&db, p.id, u.id).await.unwrap().is_some());
        assert_eq!(remaining_lifts(&db, p.id).await, 4);
    }

    #[tokio::test]
    async fn update_moves_charge_between_passes() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let l = test_support::seed_lift(&db).await;
        let pt = test_support::seed_pass_type(&db, 5, 0).await;
        let p1 = test_support::seed_pass(&db, c.id, &pt).await;
        let p2 = test_support::seed_pass(&db, c.id, &pt).await;
        let u = seed_usage(&db, c.id, l.id).await;

        add(&db, p1.id, u.id).await.unwrap();
        let moved = update(&db, p1.id, u.id, p2.id, u.id).await.unwrap();
        assert!(moved.is_some());
        assert_eq!(remaining_lifts(&db, p1.id).await, 5);
        assert_eq!(remaining_lifts(&db, p2.id).await, 4);
        assert!(get(&db, p1.id, u.id).await.unwrap().is_none());
        assert!(get(&db, p2.id, u.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_of_missing_link_returns_none() {
        let db = get_db().await.unwrap();
        let out = update(&db, 1, 2, 3, 4).await.unwrap();
        assert!(out.is_none());
    }
}
