pub mod db;
pub mod errors;

pub mod access_key;
pub mod client;
pub mod employee;
pub mod equipment;
pub mod equipment_type;
pub mod lift;
pub mod lift_usage;
pub mod pass_lift_usage;
pub mod pass_rental_usage;
pub mod pass_type;
pub mod passes;
pub mod rental;
pub mod rental_equipment;
pub mod saved_view;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use migration::MigratorTrait;
    use sea_orm::{ActiveModelTrait, EntityTrait, Set};

    use crate::{client, pass_type, passes};

    async fn memory_db() -> sea_orm::DatabaseConnection {
        let db = crate::db::connect_memory().await.expect("connect sqlite memory");
        migration::Migrator::up(&db, None).await.expect("migrate up");
        db
    }

    #[tokio::test]
    async fn client_crud_roundtrip() {
        let db = memory_db().await;

        let created = client::create(
            &db,
            "Anna Kovalenko",
            "AB123456",
            NaiveDate::from_ymd_opt(1990, 5, 3).unwrap(),
            "+380501234567",
            "anna@example.com",
        )
        .await
        .expect("create client");
        assert!(created.id > 0);

        let found = client::Entity::find_by_id(created.id).one(&db).await.unwrap();
        assert_eq!(found.unwrap().full_name, "Anna Kovalenko");

        client::Entity::delete_by_id(created.id).exec(&db).await.unwrap();
        let after = client::Entity::find_by_id(created.id).one(&db).await.unwrap();
        assert!(after.is_none());
    }

    #[tokio::test]
    async fn pass_balances_seeded_from_type() {
        let db = memory_db().await;

        let c = client::create(
            &db,
            "Ivan Petrenko",
            "CD654321",
            NaiveDate::from_ymd_opt(1985, 1, 20).unwrap(),
            "+380671112233",
            "ivan@example.com",
        )
        .await
        .unwrap();

        let pt = pass_type::ActiveModel {
            name: Set("Day pass".into()),
            limit_lifts: Set(10),
            limit_hours: Set(0),
            price: Set(900),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let p = passes::create(&db, c.id, &pt, day, day, day).await.unwrap();
        assert_eq!(p.remaining_lifts, 10);
        assert_eq!(p.remaining_hours, 0.0);
    }

    #[tokio::test]
    async fn client_create_rejects_bad_email() {
        let db = memory_db().await;
        let err = client::create(
            &db,
            "No Email",
            "XX000000",
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            "+380000000000",
            "not-an-email",
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("email"));
    }
}
