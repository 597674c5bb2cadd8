//! Rental-hour consumption accounting.
//!
//! Linking a rental to an hourly pass charges the rental's duration against
//! `remaining_hours` and records the charged amount on the link itself.
//! Unlinking restores exactly that recorded amount, so the charge/refund
//! pair stays an identity even if the rental's times were edited in
//! between. A rental can be charged to at most one pass at a time.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use models::{pass_rental_usage, pass_type, passes, rental};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// Billable duration of a rental in fractional hours.
///
/// An open rental (no end time) or one whose end does not come strictly
/// after its start cannot be charged.
pub fn rental_duration_hours(rental: &rental::Model) -> Result<f64, ServiceError> {
    let end = rental.end_time.ok_or_else(|| {
        ServiceError::InvalidState(format!("Rental {} has no end time", rental.id))
    })?;
    if end <= rental.start_time {
        return Err(ServiceError::InvalidState(format!(
            "Rental {} has a non-positive duration",
            rental.id
        )));
    }
    let secs = (end - rental.start_time).num_seconds();
    Ok(secs as f64 / 3600.0)
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<pass_rental_usage::Model>, ServiceError> {
    query::apply(pass_rental_usage::Entity::find(), params)
        .all(db)
        .await
        .map_err(db_err)
}

pub async fn get(
    db: &DatabaseConnection,
    pass_id: i32,
    rental_id: i32,
) -> Result<Option<pass_rental_usage::Model>, ServiceError> {
    pass_rental_usage::Entity::find_by_id((pass_id, rental_id))
        .one(db)
        .await
        .map_err(db_err)
}

/// Link a rental to a pass, charging the rental's full duration.
pub async fn add(
    db: &DatabaseConnection,
    pass_id: i32,
    rental_id: i32,
) -> Result<pass_rental_usage::Model, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    let created = add_in(&txn, pass_id, rental_id).await?;
    txn.commit().await.map_err(db_err)?;
    Ok(created)
}

/// Unlink, restoring the hours recorded on the link. Returns whether a link
/// was removed.
pub async fn delete(
    db: &DatabaseConnection,
    pass_id: i32,
    rental_id: i32,
) -> Result<bool, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    let removed = delete_in(&txn, pass_id, rental_id).await?;
    txn.commit().await.map_err(db_err)?;
    Ok(removed)
}

/// Re-point a charge at a different (pass, rental) pair in one transaction.
/// If the new charge fails, the old link and balance are left as they were.
/// Returns `None` when the old link does not exist.
pub async fn update(
    db: &DatabaseConnection,
    old_pass_id: i32,
    old_rental_id: i32,
    new_pass_id: i32,
    new_rental_id: i32,
) -> Result<Option<pass_rental_usage::Model>, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    if !delete_in(&txn, old_pass_id, old_rental_id).await? {
        return Ok(None);
    }
    let created = add_in(&txn, new_pass_id, new_rental_id).await?;
    txn.commit().await.map_err(db_err)?;
    Ok(Some(created))
}

async fn add_in<C: ConnectionTrait>(
    conn: &C,
    pass_id: i32,
    rental_id: i32,
) -> Result<pass_rental_usage::Model, ServiceError> {
    let pass = passes::Entity::find_by_id(pass_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Pass", pass_id))?;
    let rental = rental::Entity::find_by_id(rental_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Rental", rental_id))?;
    let ptype = pass_type::Entity::find_by_id(pass.pass_type_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("PassType", pass.pass_type_id))?;

    if ptype.limit_hours <= 0 {
        return Err(ServiceError::InvalidState(format!(
            "Pass {} is not an hourly pass",
            pass_id
        )));
    }

    let already = pass_rental_usage::Entity::find()
        .filter(pass_rental_usage::Column::RentalId.eq(rental_id))
        .one(conn)
        .await
        .map_err(db_err)?;
    if already.is_some() {
        return Err(ServiceError::InvalidState(format!(
            "Rental {} is already charged to a pass",
            rental_id
        )));
    }

    let hours = rental_duration_hours(&rental)?;
    if pass.remaining_hours < hours {
        return Err(ServiceError::InvalidState(format!(
            "Pass {} has {:.2}h remaining, rental needs {:.2}h",
            pass_id, pass.remaining_hours, hours
        )));
    }

    charge_hours(conn, pass_id, hours).await?;

    let am = pass_rental_usage::ActiveModel {
        pass_id: Set(pass_id),
        rental_id: Set(rental_id),
        hours_deducted: Set(hours),
    };
    am.insert(conn).await.map_err(db_err)
}

async fn delete_in<C: ConnectionTrait>(
    conn: &C,
    pass_id: i32,
    rental_id: i32,
) -> Result<bool, ServiceError> {
    let entry = pass_rental_usage::Entity::find_by_id((pass_id, rental_id))
        .one(conn)
        .await
        .map_err(db_err)?;
    let Some(entry) = entry else {
        return Ok(false);
    };

    let pass = passes::Entity::find_by_id(pass_id).one(conn).await.map_err(db_err)?;
    if let Some(pass) = pass {
        let ptype =
            pass_type::Entity::find_by_id(pass.pass_type_id).one(conn).await.map_err(db_err)?;
        if ptype.map(|t| t.limit_hours > 0).unwrap_or(false) {
            restore_hours(conn, pass_id, entry.hours_deducted).await?;
        }
    }

    pass_rental_usage::Entity::delete_by_id((pass_id, rental_id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    Ok(true)
}

/// Guarded decrement: the balance row is only touched while it still covers
/// the charge, closing the race between the availability read and the write.
async fn charge_hours<C: ConnectionTrait>(
    conn: &C,
    pass_id: i32,
    hours: f64,
) -> Result<(), ServiceError> {
    let res = passes::Entity::update_many()
        .col_expr(
            passes::Column::RemainingHours,
            Expr::col(passes::Column::RemainingHours).sub(hours),
        )
        .filter(passes::Column::Id.eq(pass_id))
        .filter(passes::Column::RemainingHours.gte(hours))
        .exec(conn)
        .await
        .map_err(db_err)?;
    if res.rows_affected == 0 {
        return Err(ServiceError::InvalidState(format!(
            "Pass {} no longer covers a {:.2}h charge",
            pass_id, hours
        )));
    }
    Ok(())
}

async fn restore_hours<C: ConnectionTrait>(
    conn: &C,
    pass_id: i32,
    hours: f64,
) -> Result<(), ServiceError> {
    passes::Entity::update_many()
        .col_expr(
            passes::Column::RemainingHours,
            Expr::col(passes::Column::RemainingHours).add(hours),
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
    use chrono::NaiveTime;
    use sea_orm::EntityTrait;

    async fn seed_rental(
        db: &DatabaseConnection,
        client_id: i32,
        employee_id: i32,
        start: NaiveTime,
        end: Option<NaiveTime>,
    ) -> rental::Model {
        use sea_orm::{ActiveModelTrait, Set};
        rental::ActiveModel {
            client_id: Set(client_id),
            employee_id: Set(employee_id),
            rental_date: Set(test_support::date(2024, 1, 20)),
            start_time: Set(start),
            end_time: Set(end),
            rental_type: Set("ski".into()),
            total_price: Set(500),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    async fn remaining_hours(db: &DatabaseConnection, pass_id: i32) -> f64 {
        passes::Entity::find_by_id(pass_id).one(db).await.unwrap().unwrap().remaining_hours
    }

    #[tokio::test]
    async fn full_day_rental_charges_eight_hours() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        let pt = test_support::seed_pass_type(&db, 0, 20).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let r = seed_rental(&db, c.id, e.id, time(9, 0), Some(time(17, 0))).await;

        let link = add(&db, p.id, r.id).await.unwrap();
        assert!((link.hours_deducted - 8.0).abs() < 1e-9);
        assert!((remaining_hours(&db, p.id).await - 12.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn delete_restores_recorded_hours_even_after_rental_edit() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        let pt = test_support::seed_pass_type(&db, 0, 20).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let r = seed_rental(&db, c.id, e.id, time(10, 0), Some(time(12, 0))).await;

        add(&db, p.id, r.id).await.unwrap();
        assert!((remaining_hours(&db, p.id).await - 18.0).abs() < 1e-9);

        // stretch the rental after the fact; the refund must still be 2h
        use sea_orm::{ActiveModelTrait, ActiveValue};
        let rental_id = r.id;
        let mut am: rental::ActiveModel = r.into();
        am.end_time = ActiveValue::Set(Some(time(16, 0)));
        am.update(&db).await.unwrap();

        assert!(delete(&db, p.id, rental_id).await.unwrap());
        assert!((remaining_hours(&db, p.id).await - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn open_rental_cannot_be_charged() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        let pt = test_support::seed_pass_type(&db, 0, 20).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let r = seed_rental(&db, c.id, e.id, time(9, 0), None).await;

        let err = add(&db, p.id, r.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        assert!((remaining_hours(&db, p.id).await - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn insufficient_balance_rejected_without_mutation() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        let pt = test_support::seed_pass_type(&db, 0, 4).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let r = seed_rental(&db, c.id, e.id, time(9, 0), Some(time(17, 0))).await;

        let err = add(&db, p.id, r.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        assert!((remaining_hours(&db, p.id).await - 4.0).abs() < 1e-9);
        assert!(get(&db, p.id, r.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rental_charged_twice_is_rejected() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        let pt = test_support::seed_pass_type(&db, 0, 40).await;
        let p1 = test_support::seed_pass(&db, c.id, &pt).await;
        let p2 = test_support::seed_pass(&db, c.id, &pt).await;
        let r = seed_rental(&db, c.id, e.id, time(9, 0), Some(time(11, 0))).await;

        add(&db, p1.id, r.id).await.unwrap();
        let err = add(&db, p2.id, r.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        assert!((remaining_hours(&db, p2.id).await - 40.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn lift_only_pass_is_wrong_kind() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        let pt = test_support::seed_pass_type(&db, 10, 0).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let r = seed_rental(&db, c.id, e.id, time(9, 0), Some(time(10, 0))).await;

        let err = add(&db, p.id, r.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn failed_update_keeps_old_link() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        let pt = test_support::seed_pass_type(&db, 0, 10).await;
        let p = test_support::seed_pass(&db, c.id, &pt).await;
        let r = seed_rental(&db, c.id, e.id, time(9, 0), Some(time(12, 0))).await;

        add(&db, p.id, r.id).await.unwrap();
        let err = update(&db, p.id, r.id, 9999, r.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(get(&db, p.id, r.id).await.unwrap().is_some());
        assert!((remaining_hours(&db, p.id).await - 7.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn update_moves_charge_between_passes() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        let pt = test_support::seed_pass_type(&db, 0, 10).await;
        let p1 = test_support::seed_pass(&db, c.id, &pt).await;
        let p2 = test_support::seed_pass(&db, c.id, &pt).await;
        let r = seed_rental(&db, c.id, e.id, time(13, 0), Some(time(15, 30))).await;

        add(&db, p1.id, r.id).await.unwrap();
        let moved = update(&db, p1.id, r.id, p2.id, r.id).await.unwrap().unwrap();
        assert!((moved.hours_deducted - 2.5).abs() < 1e-9);
        assert!((remaining_hours(&db, p1.id).await - 10.0).abs() < 1e-9);
        assert!((remaining_hours(&db, p2.id).await - 7.5).abs() < 1e-9);
    }
}
