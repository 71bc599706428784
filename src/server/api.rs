//! HTTP API server proxying to LibreTranslate

use axum::{
    extract::Json,
    http::Extensions,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use tracing::info;

use crate::core::client::LibreTranslate;
use crate::core::config::LibreTranslateConfig;
use crate::core::models::{Detection, Language, TranslationRequest, TranslationResult};
use crate::server::extension::{ApiFailure, LibreTranslateExt, Translate};
use crate::server::facade;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Detection request
#[derive(Deserialize)]
pub struct DetectRequest {
    /// Text to detect
    pub q: String,
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Detect handler
async fn detect(
    client: Translate,
    Json(payload): Json<DetectRequest>,
) -> Result<Json<Vec<Detection>>, ApiFailure> {
    Ok(Json(client.detect(&payload.q).await?))
}

/// Languages handler, resolves the client through the façade
async fn languages(extensions: Extensions) -> Result<Json<Vec<Language>>, ApiFailure> {
    Ok(Json(facade::languages(&extensions).await?))
}

/// Translate handler
async fn translate(
    client: Translate,
    Json(payload): Json<TranslationRequest>,
) -> Result<Json<TranslationResult>, ApiFailure> {
    Ok(Json(client.translate(&payload).await?))
}

/// Build the application router with `client` registered on it
pub fn router(client: LibreTranslate) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/detect", post(detect))
        .route("/languages", get(languages))
        .route("/translate", post(translate))
        .libretranslate(client)
}

/// Socket address for `host`, which may be IPv4 or IPv6
fn bind_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = host
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid host '{}': {}", host, e))?;
    Ok(SocketAddr::new(ip, port))
}

/// Run the HTTP server
pub async fn run_server(config: LibreTranslateConfig, host: String, port: u16) -> anyhow::Result<()> {
    let client = LibreTranslate::new(config)?;
    let app = router(client);

    let addr = bind_addr(&host, port)?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
