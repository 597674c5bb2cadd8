use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::{init_logging_default, init_logging_json};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::auth::{ServerAuthConfig, ServerState};
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Host/port from config.toml when present, env vars otherwise.
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => (cfg.server.host, cfg.server.port),
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

fn load_auth_config() -> ServerAuthConfig {
    let (mut jwt_secret, ttl) = match configs::load_default() {
        Ok(mut cfg) => {
            cfg.auth.normalize_from_env();
            (cfg.auth.jwt_secret, cfg.auth.session_ttl_secs)
        }
        Err(_) => (env::var("JWT_SECRET").unwrap_or_default(), 8 * 3600),
    };
    if jwt_secret.trim().is_empty() {
        warn!("JWT_SECRET not set, using an insecure development secret");
        jwt_secret = "dev-secret-change-me".to_string();
    }
    ServerAuthConfig { jwt_secret, session_ttl_secs: ttl }
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => init_logging_json(),
        _ => init_logging_default(),
    }

    let db = models::db::connect().await?;
    let state = ServerState { db, auth: load_auth_config() };

    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr()?;
    info!(%addr, "starting resort api server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
