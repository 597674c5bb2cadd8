use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use models::employee;
use service::employee_service::{self, CreateEmployee, UpdateEmployee};

use crate::auth::ServerState;
use crate::errors::ApiError;

use super::{deleted, ListQuery};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/employees", get(list).post(create))
        .route("/employees/:id", get(get_one).put(update).delete(delete_one))
}

async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<employee::Model>>, ApiError> {
    Ok(Json(employee_service::list(&state.db, &q.into_params()).await?))
}

async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<employee::Model>, ApiError> {
    Ok(Json(employee_service::get(&state.db, id).await?))
}

async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateEmployee>,
) -> Result<(StatusCode, Json<employee::Model>), ApiError> {
    let created = employee_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateEmployee>,
) -> Result<Json<employee::Model>, ApiError> {
    Ok(Json(employee_service::update(&state.db, id, input).await?))
}

async fn delete_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(employee_service::delete(&state.db, id).await?, "Employee")
}
