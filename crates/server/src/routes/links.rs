//! The three many-to-many link surfaces. Create and delete address a link
//! by its composite key; update takes the old and new pairs in the body and
//! runs as a single transaction service-side.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;

use models::{pass_lift_usage, pass_rental_usage, rental_equipment};
use service::{pass_lift_usage_service, pass_rental_usage_service, rental_equipment_service};

use crate::auth::ServerState;
use crate::errors::ApiError;

use super::{deleted, ListQuery};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/pass-lift-usages", get(list_lift_links).post(create_lift_link))
        .route("/pass-lift-usages/update", put(update_lift_link))
        .route(
            "/pass-lift-usages/:pass_id/:lift_usage_id",
            get(get_lift_link).delete(delete_lift_link),
        )
        .route("/pass-rental-usages", get(list_rental_links).post(create_rental_link))
        .route("/pass-rental-usages/update", put(update_rental_link))
        .route(
            "/pass-rental-usages/:pass_id/:rental_id",
            get(get_rental_link).delete(delete_rental_link),
        )
        .route("/rental-equipment", get(list_equipment_links).post(create_equipment_link))
        .route("/rental-equipment/update", put(update_equipment_link))
        .route(
            "/rental-equipment/:rental_id/:equipment_id",
            get(get_equipment_link).delete(delete_equipment_link),
        )
}

#[derive(Debug, Deserialize)]
struct LiftLinkInput {
    pass_id: i32,
    lift_usage_id: i32,
}

#[derive(Debug, Deserialize)]
struct LiftLinkUpdate {
    old_pass_id: i32,
    old_lift_usage_id: i32,
    new_pass_id: i32,
    new_lift_usage_id: i32,
}

async fn list_lift_links(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<pass_lift_usage::Model>>, ApiError> {
    Ok(Json(pass_lift_usage_service::list(&state.db, &q.into_params()).await?))
}

async fn get_lift_link(
    State(state): State<ServerState>,
    Path((pass_id, lift_usage_id)): Path<(i32, i32)>,
) -> Result<Json<pass_lift_usage::Model>, ApiError> {
    pass_lift_usage_service::get(&state.db, pass_id, lift_usage_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "link not found"))
}

async fn create_lift_link(
    State(state): State<ServerState>,
    Json(input): Json<LiftLinkInput>,
) -> Result<(StatusCode, Json<pass_lift_usage::Model>), ApiError> {
    let created =
        pass_lift_usage_service::add(&state.db, input.pass_id, input.lift_usage_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_lift_link(
    State(state): State<ServerState>,
    Json(input): Json<LiftLinkUpdate>,
) -> Result<Json<pass_lift_usage::Model>, ApiError> {
    pass_lift_usage_service::update(
        &state.db,
        input.old_pass_id,
        input.old_lift_usage_id,
        input.new_pass_id,
        input.new_lift_usage_id,
    )
    .await?
    .map(Json)
    .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "link not found"))
}

async fn delete_lift_link(
    State(state): State<ServerState>,
    Path((pass_id, lift_usage_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    deleted(
        pass_lift_usage_service::delete(&state.db, pass_id, lift_usage_id).await?,
        "PassLiftUsage",
    )
}

#[derive(Debug, Deserialize)]
struct RentalLinkInput {
    pass_id: i32,
    rental_id: i32,
}

#[derive(Debug, Deserialize)]
struct RentalLinkUpdate {
    old_pass_id: i32,
    old_rental_id: i32,
    new_pass_id: i32,
    new_rental_id: i32,
}

async fn list_rental_links(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<pass_rental_usage::Model>>, ApiError> {
    Ok(Json(pass_rental_usage_service::list(&state.db, &q.into_params()).await?))
}

async fn get_rental_link(
    State(state): State<ServerState>,
    Path((pass_id, rental_id)): Path<(i32, i32)>,
) -> Result<Json<pass_rental_usage::Model>, ApiError> {
    pass_rental_usage_service::get(&state.db, pass_id, rental_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "link not found"))
}

async fn create_rental_link(
    State(state): State<ServerState>,
    Json(input): Json<RentalLinkInput>,
) -> Result<(StatusCode, Json<pass_rental_usage::Model>), ApiError> {
    let created =
        pass_rental_usage_service::add(&state.db, input.pass_id, input.rental_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_rental_link(
    State(state): State<ServerState>,
    Json(input): Json<RentalLinkUpdate>,
) -> Result<Json<pass_rental_usage::Model>, ApiError> {
    pass_rental_usage_service::update(
        &state.db,
        input.old_pass_id,
        input.old_rental_id,
        input.new_pass_id,
        input.new_rental_id,
    )
    .await?
    .map(Json)
    .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "link not found"))
}

async fn delete_rental_link(
    State(state): State<ServerState>,
    Path((pass_id, rental_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    deleted(
        pass_rental_usage_service::delete(&state.db, pass_id, rental_id).await?,
        "PassRentalUsage",
    )
}

#[derive(Debug, Deserialize)]
struct EquipmentLinkInput {
    rental_id: i32,
    equipment_id: i32,
}

#[derive(Debug, Deserialize)]
struct EquipmentLinkUpdate {
    old_rental_id: i32,
    old_equipment_id: i32,
    new_rental_id: i32,
    new_equipment_id: i32,
}

async fn list_equipment_links(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<rental_equipment::Model>>, ApiError> {
    Ok(Json(rental_equipment_service::list(&state.db, &q.into_params()).await?))
}

async fn get_equipment_link(
    State(state): State<ServerState>,
    Path((rental_id, equipment_id)): Path<(i32, i32)>,
) -> Result<Json<rental_equipment::Model>, ApiError> {
    rental_equipment_service::get(&state.db, rental_id, equipment_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "link not found"))
}

async fn create_equipment_link(
    State(state): State<ServerState>,
    Json(input): Json<EquipmentLinkInput>,
) -> Result<(StatusCode, Json<rental_equipment::Model>), ApiError> {
    let created =
        rental_equipment_service::add(&state.db, input.rental_id, input.equipment_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_equipment_link(
    State(state): State<ServerState>,
    Json(input): Json<EquipmentLinkUpdate>,
) -> Result<Json<rental_equipment::Model>, ApiError> {
    rental_equipment_service::update(
        &state.db,
        input.old_rental_id,
        input.old_equipment_id,
        input.new_rental_id,
        input.new_equipment_id,
    )
    .await?
    .map(Json)
    .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "link not found"))
}

async fn delete_equipment_link(
    State(state): State<ServerState>,
    Path((rental_id, equipment_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    deleted(
        rental_equipment_service::delete(&state.db, rental_id, equipment_id).await?,
        "RentalEquipment",
    )
}
