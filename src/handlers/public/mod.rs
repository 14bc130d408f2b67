// handlers/public/mod.rs - Public handlers (no API key required)
//
// Route Prefix: none (`/`, `/health`)

use axum::{extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET / - plain-text liveness banner
pub async fn root(State(state): State<AppState>) -> String {
    format!("Server is running on http://{}", state.config.bind_addr())
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_error: Option<String>,
}

/// GET /health - storage connectivity, 503 when the store is unreachable
pub async fn health(State(state): State<AppState>) -> ApiResponse<HealthStatus> {
    match state.clothing.ping().await {
        Ok(()) => ApiResponse::success(
            HealthStatus {
                status: "ok",
                timestamp: Utc::now(),
                database: "ok",
                database_error: None,
            },
            "Service is healthy.",
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ApiResponse::with_status(
                HealthStatus {
                    status: "degraded",
                    timestamp: Utc::now(),
                    database: "unavailable",
                    database_error: Some(e.to_string()),
                },
                "Service is degraded.",
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
