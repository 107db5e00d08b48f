// 🌐 HTTP Service - GET /fun-purchases
// Serves a pre-computed purchases.json, re-read on every request

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::{error, info};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const NOT_FOUND_MESSAGE: &str = "Purchases data not found";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    purchases_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(purchases_path: impl Into<PathBuf>) -> Self {
        AppState {
            purchases_path: Arc::new(purchases_path.into()),
        }
    }

    pub fn purchases_path(&self) -> &PathBuf {
        &self.purchases_path
    }
}

/// API Response wrapper
///
/// `{"status": "success", "data": ...}` or `{"status": "error", "message": ...}`
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success { data: T },
    Error { message: String },
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse::Success { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse::Error {
            message: message.into(),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /fun-purchases - Serve purchases.json wrapped in the envelope
async fn get_fun_purchases(State(state): State<AppState>) -> impl IntoResponse {
    let path = state.purchases_path();

    let content = match tokio::fs::read_to_string(path.as_path()).await {
        Ok(content) => content,
        Err(e) => {
            error!("Could not read {}: {}", path.display(), e);
            return not_found().into_response();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(purchases) => (StatusCode::OK, Json(ApiResponse::ok(purchases))).into_response(),
        Err(e) => {
            error!("{} is not valid JSON: {}", path.display(), e);
            not_found().into_response()
        }
    }
}

fn not_found() -> (StatusCode, Json<ApiResponse<Value>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(NOT_FOUND_MESSAGE)),
    )
}

/// Build the router: one route, permissive CORS
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/fun-purchases", get(get_fun_purchases))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process is stopped
pub async fn serve(addr: std::net::SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving {} on http://{}/fun-purchases", state.purchases_path().display(), addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
