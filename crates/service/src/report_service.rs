//! Read-only reporting queries. Each report is a single joined/aggregated
//! select materialized into a purpose-built row type.

use chrono::NaiveDate;
use sea_orm::sea_query::JoinType;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::Serialize;

use models::{client, equipment, pass_type, passes, rental, rental_equipment};

use crate::errors::ServiceError;

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// One pass with its owner and type flattened in.
#[derive(Debug, Serialize, FromQueryResult)]
pub struct ClientPassRow {
    pub pass_id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub pass_type_name: String,
    pub valid_from: chrono::NaiveDate,
    pub valid_to: chrono::NaiveDate,
    pub remaining_lifts: i32,
    pub remaining_hours: f64,
}

#[derive(Debug, Serialize, FromQueryResult)]
pub struct EquipmentRentalCountRow {
    pub equipment_id: i32,
    pub model: String,
    pub rental_count: i64,
}

#[derive(Debug, Serialize, FromQueryResult)]
pub struct PassSalesRow {
    pub purchase_date: chrono::NaiveDate,
    pub passes_sold: i64,
    pub revenue: i64,
}

/// Every pass joined with its client and type, newest validity first.
pub async fn client_passes(db: &DatabaseConnection) -> Result<Vec<ClientPassRow>, ServiceError> {
    passes::Entity::find()
        .select_only()
        .column_as(passes::Column::Id, "pass_id")
        .column(passes::Column::ClientId)
        .column_as(client::Column::FullName, "client_name")
        .column_as(pass_type::Column::Name, "pass_type_name")
        .column(passes::Column::ValidFrom)
        .column(passes::Column::ValidTo)
        .column(passes::Column::RemainingLifts)
        .column(passes::Column::RemainingHours)
        .join(JoinType::InnerJoin, passes::Relation::Client.def())
        .join(JoinType::InnerJoin, passes::Relation::PassType.def())
        .order_by_desc(passes::Column::ValidFrom)
        .into_model::<ClientPassRow>()
        .all(db)
        .await
        .map_err(db_err)
}

/// Equipment units ranked by how often they appear on rentals, optionally
/// restricted to a rental-date range (inclusive on both ends).
pub async fn most_rented_equipment(
    db: &DatabaseConnection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    limit: u64,
) -> Result<Vec<EquipmentRentalCountRow>, ServiceError> {
    let mut query = rental_equipment::Entity::find()
        .join(JoinType::InnerJoin, rental_equipment::Relation::Rental.def());
    if let Some(from) = from {
        query = query.filter(rental::Column::RentalDate.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(rental::Column::RentalDate.lte(to));
    }
    query
        .select_only()
        .column(rental_equipment::Column::EquipmentId)
        .column(equipment::Column::Model)
        .column_as(rental_equipment::Column::RentalId.count(), "rental_count")
        .join(JoinType::InnerJoin, rental_equipment::Relation::Equipment.def())
        .group_by(rental_equipment::Column::EquipmentId)
        .group_by(equipment::Column::Model)
        .order_by_desc(rental_equipment::Column::RentalId.count())
        .limit(limit)
        .into_model::<EquipmentRentalCountRow>()
        .all(db)
        .await
        .map_err(db_err)
}

/// Passes sold and revenue per purchase day, oldest first. Revenue is the
/// sum of the type's list price at query time.
pub async fn pass_sales_by_day(
    db: &DatabaseConnection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<PassSalesRow>, ServiceError> {
    let mut query = passes::Entity::find();
    if let Some(from) = from {
        query = query.filter(passes::Column::PurchaseDate.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(passes::Column::PurchaseDate.lte(to));
    }
    query
        .select_only()
        .column(passes::Column::PurchaseDate)
        .column_as(passes::Column::Id.count(), "passes_sold")
        .column_as(pass_type::Column::Price.sum(), "revenue")
        .join(JoinType::InnerJoin, passes::Relation::PassType.def())
        .group_by(passes::Column::PurchaseDate)
        .order_by_asc(passes::Column::PurchaseDate)
        .into_model::<PassSalesRow>()
        .all(db)
        .await
        .map_err(db_err)
}
