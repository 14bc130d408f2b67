use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::error::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared-secret check guarding everything under /api/v1.
///
/// Missing header is 401, a key that does not match the configured one is 403.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = extract_api_key_from_headers(request.headers())?;
    verify_api_key(state.config.security.api_key.as_deref(), presented).map_err(|e| {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid API key");
        e
    })?;

    Ok(next.run(request).await)
}

fn extract_api_key_from_headers(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(API_KEY_HEADER)
        .ok_or_else(|| ApiError::unauthorized("No API key, authorization denied."))?;

    // A non-ASCII value cannot equal any configured key
    let key = value.to_str().map_err(|_| ApiError::forbidden("Invalid API key."))?;
    if key.is_empty() {
        return Err(ApiError::unauthorized("No API key, authorization denied."));
    }
    Ok(key)
}

/// With no key configured every presented key is rejected
fn verify_api_key(expected: Option<&str>, presented: &str) -> Result<(), ApiError> {
    match expected {
        Some(expected) if Sha256::digest(expected.as_bytes()) == Sha256::digest(presented.as_bytes()) => Ok(()),
        _ => Err(ApiError::forbidden("Invalid API key.")),
    }
}
