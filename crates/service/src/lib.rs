//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod auth;
pub mod errors;
pub mod query;

pub mod client_service;
pub mod employee_service;
pub mod equipment_service;
pub mod equipment_type_service;
pub mod lift_service;
pub mod lift_usage_service;
pub mod pass_lift_usage_service;
pub mod pass_rental_usage_service;
pub mod pass_service;
pub mod pass_type_service;
pub mod rental_equipment_service;
pub mod rental_service;
pub mod report_service;
pub mod saved_view_service;

#[cfg(test)]
pub mod test_support;
