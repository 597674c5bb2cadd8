//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_client;
mod m20240301_000002_create_employee;
mod m20240301_000003_create_access_key;
mod m20240301_000004_create_equipment_type;
mod m20240301_000005_create_equipment;
mod m20240301_000006_create_lift;
mod m20240301_000007_create_lift_usage;
mod m20240301_000008_create_pass_type;
mod m20240301_000009_create_pass;
mod m20240301_000010_create_rental;
mod m20240301_000011_create_rental_equipment;
mod m20240301_000012_create_pass_lift_usage;
mod m20240301_000013_create_pass_rental_usage;
mod m20240301_000014_create_saved_view;
mod m20240301_000015_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_client::Migration),
            Box::new(m20240301_000002_create_employee::Migration),
            Box::new(m20240301_000003_create_access_key::Migration),
            Box::new(m20240301_000004_create_equipment_type::Migration),
            Box::new(m20240301_000005_create_equipment::Migration),
            Box::new(m20240301_000006_create_lift::Migration),
            Box::new(m20240301_000007_create_lift_usage::Migration),
            Box::new(m20240301_000008_create_pass_type::Migration),
            Box::new(m20240301_000009_create_pass::Migration),
            Box::new(m20240301_000010_create_rental::Migration),
            Box::new(m20240301_000011_create_rental_equipment::Migration),
            Box::new(m20240301_000012_create_pass_lift_usage::Migration),
            Box::new(m20240301_000013_create_pass_rental_usage::Migration),
            Box::new(m20240301_000014_create_saved_view::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000015_add_indexes::Migration),
        ]
    }
}
