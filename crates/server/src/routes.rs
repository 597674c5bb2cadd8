use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use common::types::Health;
use service::query::ListParams;

use crate::auth::{self, ServerState};
use crate::errors::ApiError;

pub mod clients;
pub mod employees;
pub mod inventory;
pub mod lifts;
pub mod links;
pub mod passes;
pub mod rentals;
pub mod reports;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Wire shape of list-endpoint parameters. The filter lists arrive as
/// comma-separated strings (`?filter_cols=a,b&filter_ops=eq,gt&...`) and
/// are split here into the parallel lists the query builder takes.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub filter_cols: Option<String>,
    pub filter_ops: Option<String>,
    pub filter_vals: Option<String>,
    pub filter_by: Option<String>,
    pub filter_value: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn split_csv(raw: Option<String>) -> Vec<String> {
    raw.map(|s| s.split(',').map(|p| p.trim().to_string()).collect()).unwrap_or_default()
}

impl ListQuery {
    pub fn into_params(self) -> ListParams {
        ListParams {
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            filter_cols: split_csv(self.filter_cols),
            filter_ops: split_csv(self.filter_ops),
            filter_vals: split_csv(self.filter_vals),
            filter_by: self.filter_by,
            filter_value: self.filter_value,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// 204 on success, 404 when the row never existed.
pub fn deleted(existed: bool, entity: &str) -> Result<StatusCode, ApiError> {
    if existed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::new(StatusCode::NOT_FOUND, format!("{} not found", entity)))
    }
}

/// Build the full application router: public health and auth entry points,
/// session-gated data routes, admin-gated reports.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me));

    let api = Router::new()
        .merge(clients::router())
        .merge(employees::router())
        .merge(inventory::router())
        .merge(lifts::router())
        .merge(passes::router())
        .merge(rentals::router())
        .merge(links::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    let admin = Router::new()
        .merge(reports::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin));

    public
        .nest("/api", api)
        .nest("/admin", admin)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
