use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use models::{client, saved_view};
use service::client_service::{self, CreateClient, UpdateClient};
use service::saved_view_service::{self, CreateSavedView, UpdateSavedView};

use crate::auth::ServerState;
use crate::errors::ApiError;

use super::{deleted, ListQuery};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/clients", get(list).post(create))
        .route("/clients/:id", get(get_one).put(update).delete(delete_one))
        .route("/saved-views", get(list_views).post(create_view))
        .route("/saved-views/:id", get(get_view).put(update_view).delete(delete_view))
}

async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<client::Model>>, ApiError> {
    Ok(Json(client_service::list(&state.db, &q.into_params()).await?))
}

async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<client::Model>, ApiError> {
    Ok(Json(client_service::get(&state.db, id).await?))
}

async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateClient>,
) -> Result<(StatusCode, Json<client::Model>), ApiError> {
    let created = client_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateClient>,
) -> Result<Json<client::Model>, ApiError> {
    Ok(Json(client_service::update(&state.db, id, input).await?))
}

async fn delete_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(client_service::delete(&state.db, id).await?, "Client")
}

async fn list_views(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<saved_view::Model>>, ApiError> {
    Ok(Json(saved_view_service::list(&state.db, &q.into_params()).await?))
}

async fn get_view(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<saved_view::Model>, ApiError> {
    Ok(Json(saved_view_service::get(&state.db, id).await?))
}

async fn create_view(
    State(state): State<ServerState>,
    Json(input): Json<CreateSavedView>,
) -> Result<(StatusCode, Json<saved_view::Model>), ApiError> {
    let created = saved_view_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_view(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateSavedView>,
) -> Result<Json<saved_view::Model>, ApiError> {
    Ok(Json(saved_view_service::update(&state.db, id, input).await?))
}

async fn delete_view(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(saved_view_service::delete(&state.db, id).await?, "SavedView")
}
