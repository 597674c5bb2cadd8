use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use models::rental;
use service::rental_service::{self, CreateRental, UpdateRental};

use crate::auth::ServerState;
use crate::errors::ApiError;

use super::{deleted, ListQuery};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/rentals", get(list).post(create))
        .route("/rentals/:id", get(get_one).put(update).delete(delete_one))
}

async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<rental::Model>>, ApiError> {
    Ok(Json(rental_service::list(&state.db, &q.into_params()).await?))
}

async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<rental::Model>, ApiError> {
    Ok(Json(rental_service::get(&state.db, id).await?))
}

async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateRental>,
) -> Result<(StatusCode, Json<rental::Model>), ApiError> {
    let created = rental_service::create(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateRental>,
) -> Result<Json<rental::Model>, ApiError> {
    Ok(Json(rental_service::update(&state.db, id, input).await?))
}

async fn delete_one(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    deleted(rental_service::delete(&state.db, id).await?, "Rental")
}
