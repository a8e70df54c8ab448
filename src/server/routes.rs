use super::AppState;
use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

pub const CHAINS_CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=600";

#[derive(Serialize)]
struct ChainsResponse<'a> {
    success: bool,
    data: &'a Value,
    cached: bool,
    timestamp: u64,
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: &'static str,
    message: String,
}

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

/// `GET /api/chains`
pub(crate) async fn get_chains(State(state): State<Arc<AppState>>) -> Response {
    match state.chains().await {
        Ok((entry, cached)) => {
            let body = ChainsResponse {
                success: true,
                data: &entry.data,
                cached,
                timestamp: entry.timestamp,
            };
            (
                [(header::CACHE_CONTROL, HeaderValue::from_static(CHAINS_CACHE_CONTROL))],
                Json(body),
            )
                .into_response()
        }
        Err(e) => {
            error!("failed to build chain list: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    success: false,
                    error: "Failed to fetch chain data",
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `GET /health`
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
