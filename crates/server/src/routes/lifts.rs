use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use models::{lift, lift_usage};
use service::lift_service::{self, CreateLift, UpdateLift};
use service::lift_usage_service::{self, CreateLiftUsage, UpdateLiftUsage};

use crate::auth::ServerState;
use crate::errors::ApiError;

use super::{deleted, ListQuery};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/lifts", get(list).post(create))
        .route("/lifts/:id", get(get_one).put(update).delete(delete_one))
        .route("/lift-usages", get(list_usages).post(create_usage))
        .route(
            "/lift-usages/:id",
            get(get_usage).put(update_usage).delete(delete_usage),
        )
}

async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<lift::Model>>, ApiError> {
    Ok(Json(lift_service::list(&state.db, &q.into_params()).await?))
}

async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<lift::Model>, ApiError> {
    Ok(Json(lift_service::get(&state.db, id).await?))
}

async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateLift>,
) -> Result<(StatusCode, Json<lift::Model>), ApiError> {
    let created = lift_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateLift>,
) -> Result<Json<lift::Model>, ApiError> {
    Ok(Json(lift_service::update(&state.db, id, input).await?))
}

async fn delete_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(lift_service::delete(&state.db, id).await?, "Lift")
}

async fn list_usages(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<lift_usage::Model>>, ApiError> {
    Ok(Json(lift_usage_service::list(&state.db, &q.into_params()).await?))
}

async fn get_usage(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<lift_usage::Model>, ApiError> {
    Ok(Json(lift_usage_service::get(&state.db, id).await?))
}

async fn create_usage(
    State(state): State<ServerState>,
    Json(input): Json<CreateLiftUsage>,
) -> Result<(StatusCode, Json<lift_usage::Model>), ApiError> {
    let created = lift_usage_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_usage(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateLiftUsage>,
) -> Result<Json<lift_usage::Model>, ApiError> {
    Ok(Json(lift_usage_service::update(&state.db, id, input).await?))
}

async fn delete_usage(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(lift_usage_service::delete(&state.db, id).await?, "LiftUsage")
}
