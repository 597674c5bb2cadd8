//! Rental-to-equipment links. Linking marks the unit unavailable, unlinking
//! frees it; an unavailable unit cannot be linked again. No balance math
//! here, but update still runs delete-then-add in one transaction so a bad
//! new pair never destroys the old link.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use sea_orm::sea_query::Expr;

use models::{equipment, rental, rental_equipment};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<rental_equipment::Model>, ServiceError> {
    query::apply(rental_equipment::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(
    db: &DatabaseConnection,
    rental_id: i32,
    equipment_id: i32,
) -> Result<Option<rental_equipment::Model>, ServiceError> {
    rental_equipment::Entity::find_by_id((rental_id, equipment_id))
        .one(db)
        .await
        .map_err(db_err)
}

pub async fn add(
    db: &DatabaseConnection,
    rental_id: i32,
    equipment_id: i32,
) -> Result<rental_equipment::Model, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    let created = add_in(&txn, rental_id, equipment_id).await?;
    txn.commit().await.map_err(db_err)?;
    Ok(created)
}

pub async fn delete(
    db: &DatabaseConnection,
    rental_id: i32,
    equipment_id: i32,
) -> Result<bool, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    let removed = delete_in(&txn, rental_id, equipment_id).await?;
    txn.commit().await.map_err(db_err)?;
    Ok(removed)
}

pub async fn update(
    db: &DatabaseConnection,
    old_rental_id: i32,
    old_equipment_id: i32,
    new_rental_id: i32,
    new_equipment_id: i32,
) -> Result<Option<rental_equipment::Model>, ServiceError> {
    let txn = db.begin().await.map_err(db_err)?;
    if !delete_in(&txn, old_rental_id, old_equipment_id).await? {
        return Ok(None);
    }
    let created = add_in(&txn, new_rental_id, new_equipment_id).await?;
    txn.commit().await.map_err(db_err)?;
    Ok(Some(created))
}

async fn add_in<C: ConnectionTrait>(
    conn: &C,
    rental_id: i32,
    equipment_id: i32,
) -> Result<rental_equipment::Model, ServiceError> {
    rental::Entity::find_by_id(rental_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Rental", rental_id))?;
    equipment::Entity::find_by_id(equipment_id)
        .one(conn)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Equipment", equipment_id))?;

    // guarded claim of the unit
    let res = equipment::Entity::update_many()
        .col_expr(equipment::Column::IsAvailable, Expr::value(false))
        .filter(equipment::Column::Id.eq(equipment_id))
        .filter(equipment::Column::IsAvailable.eq(true))
        .exec(conn)
        .await
        .map_err(db_err)?;
    if res.rows_affected == 0 {
        return Err(ServiceError::InvalidState(format!(
            "Equipment {} is not available",
            equipment_id
        )));
    }

    let am = rental_equipment::ActiveModel {
        rental_id: Set(rental_id),
        equipment_id: Set(equipment_id),
    };
    am.insert(conn).await.map_err(db_err)
}

async fn delete_in<C: ConnectionTrait>(
    conn: &C,
    rental_id: i32,
    equipment_id: i32,
) -> Result<bool, ServiceError> {
    let entry = rental_equipment::Entity::find_by_id((rental_id, equipment_id))
        .one(conn)
        .await
        .map_err(db_err)?;
    if entry.is_none() {
        return Ok(false);
    }
    equipment::Entity::update_many()
        .col_expr(equipment::Column::IsAvailable, Expr::value(true))
        .filter(equipment::Column::Id.eq(equipment_id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    rental_equipment::Entity::delete_by_id((rental_id, equipment_id))
        .exec(conn)
        .await
        .map_err(db_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db, time};

    async fn seed_rental(db: &DatabaseConnection) -> rental::Model {
        let c = test_support::seed_client(db).await;
        let e = test_support::seed_employee(db).await;
        use sea_orm::{ActiveModelTrait, Set};
        rental::ActiveModel {
            client_id: Set(c.id),
            employee_id: Set(e.id),
            rental_date: Set(test_support::date(2024, 1, 8)),
            start_time: Set(time(10, 0)),
            end_time: Set(Some(time(14, 0))),
            rental_type: Set("ski".into()),
            total_price: Set(600),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    async fn is_available(db: &DatabaseConnection, equipment_id: i32) -> bool {
        equipment::Entity::find_by_id(equipment_id).one(db).await.unwrap().unwrap().is_available
    }

    #[tokio::test]
    async fn link_claims_unit_and_unlink_frees_it() {
        let db = get_db().await.unwrap();
        let r = seed_rental(&db).await;
        let t = test_support::seed_equipment_type(&db, "Skis").await;
        let eq = test_support::seed_equipment(&db, t.id, "Head Kore 93", true).await;

        add(&db, r.id, eq.id).await.unwrap();
        assert!(!is_available(&db, eq.id).await);

        assert!(delete(&db, r.id, eq.id).await.unwrap());
        assert!(is_available(&db, eq.id).await);
    }

    #[tokio::test]
    async fn unavailable_unit_cannot_be_linked() {
        let db = get_db().await.unwrap();
        let r = seed_rental(&db).await;
        let t = test_support::seed_equipment_type(&db, "Skis").await;
        let eq = test_support::seed_equipment(&db, t.id, "Volkl M6", false).await;

        let err = add(&db, r.id, eq.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
        assert!(get(&db, r.id, eq.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_update_keeps_old_link() {
        let db = get_db().await.unwrap();
        let r = seed_rental(&db).await;
        let t = test_support::seed_equipment_type(&db, "Skis").await;
        let eq = test_support::seed_equipment(&db, t.id, "Elan Ripstick", true).await;

        add(&db, r.id, eq.id).await.unwrap();
        let err = update(&db, r.id, eq.id, 9999, eq.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(get(&db, r.id, eq.id).await.unwrap().is_some());
        assert!(!is_available(&db, eq.id).await);
    }
}
