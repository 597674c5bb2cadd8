//! Session state and cookie-based auth. Login issues a JWT stored in an
//! http-only cookie; the middleware verifies it and exposes the claims to
//! handlers through request extensions.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use service::auth::{self, Claims};

use crate::errors::ApiError;

pub const SESSION_COOKIE: &str = "auth_token";
pub const ADMIN_ROLE: &str = "admin";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub session_ttl_secs: u64,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub login: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub access_right: String,
}

fn default_role() -> String {
    "staff".to_string()
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionOutput {
    pub login: String,
    pub access_right: String,
}

pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<SessionOutput>, ApiError> {
    let key =
        auth::register_key(&state.db, &input.login, &input.password, &input.access_right).await?;
    Ok(Json(SessionOutput { login: key.login, access_right: key.access_right }))
}

pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<SessionOutput>), ApiError> {
    let key = auth::login(&state.db, &input.login, &input.password).await?;
    let token = auth::issue_token(&state.auth.jwt_secret, &key, state.auth.session_ttl_secs)?;

    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    let jar = jar.add(cookie);
    Ok((jar, Json(SessionOutput { login: key.login, access_right: key.access_right })))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::from(SESSION_COOKIE));
    (jar, StatusCode::NO_CONTENT)
}

pub async fn me(jar: CookieJar, State(state): State<ServerState>) -> Result<Json<SessionOutput>, ApiError> {
    let claims = claims_from_jar(&state, &jar)?;
    Ok(Json(SessionOutput { login: claims.sub, access_right: claims.role }))
}

fn claims_from_jar(state: &ServerState, jar: &CookieJar) -> Result<Claims, ApiError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "not logged in"))?;
    Ok(auth::verify_token(&state.auth.jwt_secret, &token)?)
}

/// Require a valid session on every nested route.
pub async fn require_auth(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = claims_from_jar(&state, &jar)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Require an admin session. Applied on top of `require_auth`-free routes,
/// so it verifies the cookie itself.
pub async fn require_admin(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = claims_from_jar(&state, &jar)?;
    if claims.role != ADMIN_ROLE {
        return Err(ApiError::new(StatusCode::FORBIDDEN, "admin access required"));
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
