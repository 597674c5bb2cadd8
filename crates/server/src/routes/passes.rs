use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use models::{pass_type, passes};
use service::pass_service::{self, CreatePass, UpdatePass};
use service::pass_type_service::{self, CreatePassType, UpdatePassType};

use crate::auth::ServerState;
use crate::errors::ApiError;

use super::{deleted, ListQuery};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/pass-types", get(list_types).post(create_type))
        .route("/pass-types/:id", get(get_type).put(update_type).delete(delete_type))
        .route("/passes", get(list).post(create))
        .route("/passes/:id", get(get_one).put(update).delete(delete_one))
}

async fn list_types(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<pass_type::Model>>, ApiError> {
    Ok(Json(pass_type_service::list(&state.db, &q.into_params()).await?))
}

async fn get_type(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<pass_type::Model>, ApiError> {
    Ok(Json(pass_type_service::get(&state.db, id).await?))
}

async fn create_type(
    State(state): State<ServerState>,
    Json(input): Json<CreatePassType>,
) -> Result<(StatusCode, Json<pass_type::Model>), ApiError> {
    let created = pass_type_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_type(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdatePassType>,
) -> Result<Json<pass_type::Model>, ApiError> {
    Ok(Json(pass_type_service::update(&state.db, id, input).await?))
}

async fn delete_type(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(pass_type_service::delete(&state.db, id).await?, "PassType")
}

async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<passes::Model>>, ApiError> {
    Ok(Json(pass_service::list(&state.db, &q.into_params()).await?))
}

async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<passes::Model>, ApiError> {
    Ok(Json(pass_service::get(&state.db, id).await?))
}

async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreatePass>,
) -> Result<(StatusCode, Json<passes::Model>), ApiError> {
    let created = pass_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdatePass>,
) -> Result<Json<passes::Model>, ApiError> {
    Ok(Json(pass_service::update(&state.db, id, input).await?))
}

async fn delete_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(pass_service::delete(&state.db, id).await?, "Pass")
}
