#![cfg(test)]
use chrono::{NaiveDate, NaiveTime};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use models::{client, employee, equipment, equipment_type, lift, pass_type, passes};

/// Fresh in-memory SQLite database with all migrations applied. Every test
/// gets its own; nothing leaks between tests.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub async fn seed_client(db: &DatabaseConnection) -> client::Model {
    client::create(db, "Test Client", "DOC0001", date(1990, 1, 1), "+380000000001", "client@example.com")
        .await
        .expect("seed client")
}

pub async fn seed_employee(db: &DatabaseConnection) -> employee::Model {
    employee::ActiveModel {
        full_name: Set("Test Employee".into()),
        position: Set("instructor".into()),
        salary: Set(20_000),
        phone_number: Set("+380000000002".into()),
        email: Set("employee@example.com".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed employee")
}

pub async fn seed_lift(db: &DatabaseConnection) -> lift::Model {
    lift::ActiveModel { name: Set("North Chair".into()), height: Set(1200), ..Default::default() }
        .insert(db)
        .await
        .expect("seed lift")
}

pub async fn seed_pass_type(db: &DatabaseConnection, limit_lifts: i32, limit_hours: i32) -> pass_type::Model {
    pass_type::ActiveModel {
        name: Set(format!("type-{}l-{}h", limit_lifts, limit_hours)),
        limit_lifts: Set(limit_lifts),
        limit_hours: Set(limit_hours),
        price: Set(1000),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed pass type")
}

pub async fn seed_pass(
    db: &DatabaseConnection,
    client_id: i32,
    pass_type: &pass_type::Model,
) -> passes::Model {
    let day = date(2024, 1, 10);
    passes::create(db, client_id, pass_type, day, day, date(2024, 3, 31))
        .await
        .expect("seed pass")
}

pub async fn seed_equipment_type(db: &DatabaseConnection, name: &str) -> equipment_type::Model {
    equipment_type::ActiveModel {
        name: Set(name.into()),
        description: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed equipment type")
}

pub async fn seed_equipment(
    db: &DatabaseConnection,
    type_id: i32,
    model: &str,
    is_available: bool,
) -> equipment::Model {
    equipment::ActiveModel {
        type_id: Set(type_id),
        model: Set(model.into()),
        is_available: Set(is_available),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed equipment")
}
