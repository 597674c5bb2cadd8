use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use models::{employee, rental};

use crate::errors::ServiceError;
use crate::query::{self, ListParams};

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployee {
    pub full_name: String,
    pub position: String,
    pub salary: i32,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployee {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub salary: Option<i32>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &ListParams,
) -> Result<Vec<employee::Model>, ServiceError> {
    query::apply(employee::Entity::find(), params).all(db).await.map_err(db_err)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<employee::Model, ServiceError> {
    employee::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_err)?
        .ok_or_else(|| ServiceError::not_found("Employee", id))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateEmployee,
) -> Result<employee::Model, ServiceError> {
    if input.full_name.trim().is_empty() {
        return Err(ServiceError::Validation("full_name required".into()));
    }
    if input.salary < 0 {
        return Err(ServiceError::Validation("salary must be non-negative".into()));
    }
    employee::ActiveModel {
        full_name: Set(input.full_name),
        position: Set(input.position),
        salary: Set(input.salary),
        phone_number: Set(input.phone_number),
        email: Set(input.email),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(db_err)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateEmployee,
) -> Result<employee::Model, ServiceError> {
    let existing = get(db, id).await?;
    if let Some(salary) = input.salary {
        if salary < 0 {
            return Err(ServiceError::Validation("salary must be non-negative".into()));
        }
    }
    let mut am: employee::ActiveModel = existing.into();
    if let Some(v) = input.full_name {
        am.full_name = Set(v);
    }
    if let Some(v) = input.position {
        am.position = Set(v);
    }
    if let Some(v) = input.salary {
        am.salary = Set(v);
    }
    if let Some(v) = input.phone_number {
        am.phone_number = Set(v);
    }
    if let Some(v) = input.email {
        am.email = Set(v);
    }
    am.update(db).await.map_err(db_err)
}

/// An employee with rentals on record cannot be removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    if employee::Entity::find_by_id(id).one(db).await.map_err(db_err)?.is_none() {
        return Ok(false);
    }
    let in_use = rental::Entity::find()
        .filter(rental::Column::EmployeeId.eq(id))
        .one(db)
        .await
        .map_err(db_err)?;
    if in_use.is_some() {
        return Err(ServiceError::InvalidState(format!(
            "Employee {} has rentals and cannot be deleted",
            id
        )));
    }
    employee::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, get_db, time};

    #[tokio::test]
    async fn create_rejects_negative_salary() {
        let db = get_db().await.unwrap();
        let err = create(
            &db,
            CreateEmployee {
                full_name: "A".into(),
                position: "guide".into(),
                salary: -1,
                phone_number: "1".into(),
                email: "a@b".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_blocked_while_rentals_exist() {
        let db = get_db().await.unwrap();
        let c = test_support::seed_client(&db).await;
        let e = test_support::seed_employee(&db).await;
        use sea_orm::{ActiveModelTrait, Set};
        rental::ActiveModel {
            client_id: Set(c.id),
            employee_id: Set(e.id),
            rental_date: Set(test_support::date(2024, 1, 5)),
            start_time: Set(time(9, 0)),
            end_time: Set(Some(time(11, 0))),
            rental_type: Set("ski".into()),
            total_price: Set(300),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let err = delete(&db, e.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn delete_unreferenced_employee() {
        let db = get_db().await.unwrap();
        let e = test_support::seed_employee(&db).await;
        assert!(delete(&db, e.id).await.unwrap());
        assert!(!delete(&db, e.id).await.unwrap());
    }
}
