use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use service::report_service::{
    self, ClientPassRow, EquipmentRentalCountRow, PassSalesRow,
};

use crate::auth::ServerState;
use crate::errors::ApiError;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/reports/client-passes", get(client_passes))
        .route("/reports/most-rented-equipment", get(most_rented))
        .route("/reports/pass-sales", get(pass_sales))
}

#[derive(Debug, Default, Deserialize)]
struct RangeQuery {
    from: Option<chrono::NaiveDate>,
    to: Option<chrono::NaiveDate>,
    limit: Option<u64>,
}

async fn client_passes(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ClientPassRow>>, ApiError> {
    Ok(Json(report_service::client_passes(&state.db).await?))
}

async fn most_rented(
    State(state): State<ServerState>,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Vec<EquipmentRentalCountRow>>, ApiError> {
    let limit = q.limit.unwrap_or(10);
    Ok(Json(report_service::most_rented_equipment(&state.db, q.from, q.to, limit).await?))
}

async fn pass_sales(
    State(state): State<ServerState>,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Vec<PassSalesRow>>, ApiError> {
    Ok(Json(report_service::pass_sales_by_day(&state.db, q.from, q.to).await?))
}
