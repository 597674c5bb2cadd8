//! Equipment catalogue: types and the physical units of each type.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use models::{equipment, equipment_type};
use service::equipment_service::{self, CreateEquipment, UpdateEquipment};
use service::equipment_type_service::{self, CreateEquipmentType, UpdateEquipmentType};

use crate::auth::ServerState;
use crate::errors::ApiError;

use super::{deleted, ListQuery};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/equipment-types", get(list_types).post(create_type))
        .route(
            "/equipment-types/:id",
            get(get_type).put(update_type).delete(delete_type),
        )
        .route("/equipment", get(list_units).post(create_unit))
        .route("/equipment/:id", get(get_unit).put(update_unit).delete(delete_unit))
}

async fn list_types(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<equipment_type::Model>>, ApiError> {
    Ok(Json(equipment_type_service::list(&state.db, &q.into_params()).await?))
}

async fn get_type(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<equipment_type::Model>, ApiError> {
    Ok(Json(equipment_type_service::get(&state.db, id).await?))
}

async fn create_type(
    State(state): State<ServerState>,
    Json(input): Json<CreateEquipmentType>,
) -> Result<(StatusCode, Json<equipment_type::Model>), ApiError> {
    let created = equipment_type_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_type(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateEquipmentType>,
) -> Result<Json<equipment_type::Model>, ApiError> {
    Ok(Json(equipment_type_service::update(&state.db, id, input).await?))
}

async fn delete_type(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(equipment_type_service::delete(&state.db, id).await?, "EquipmentType")
}

async fn list_units(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<equipment::Model>>, ApiError> {
    Ok(Json(equipment_service::list(&state.db, &q.into_params()).await?))
}

async fn get_unit(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<equipment::Model>, ApiError> {
    Ok(Json(equipment_service::get(&state.db, id).await?))
}

async fn create_unit(
    State(state): State<ServerState>,
    Json(input): Json<CreateEquipment>,
) -> Result<(StatusCode, Json<equipment::Model>), ApiError> {
    let created = equipment_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_unit(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateEquipment>,
) -> Result<Json<equipment::Model>, ApiError> {
    Ok(Json(equipment_service::update(&state.db, id, input).await?))
}

async fn delete_unit(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(equipment_service::delete(&state.db, id).await?, "Equipment")
}
