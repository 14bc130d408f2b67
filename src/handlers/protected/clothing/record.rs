use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use super::utils::parse_id;
use crate::database::{ClothingItem, ClothingPatch};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/v1/clothing/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ClothingItem> {
    let id = parse_id(&id)?;
    let item = state
        .clothing
        .get_by_id(id)
        .await?
        .ok_or_else(ApiError::clothing_not_found)?;
    Ok(ApiResponse::success(item, "Fetching clothing by ID successful."))
}

/// PUT /api/v1/clothing/:id - partial update, absent fields are left unchanged
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ClothingPatch>, JsonRejection>,
) -> ApiResult<ClothingItem> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let item = state
        .clothing
        .update(id, patch)
        .await?
        .ok_or_else(ApiError::clothing_not_found)?;
    Ok(ApiResponse::success(item, "Clothing updated successfully."))
}

/// DELETE /api/v1/clothing/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let id = parse_id(&id)?;
    if !state.clothing.delete(id).await? {
        return Err(ApiError::clothing_not_found());
    }
    tracing::info!(%id, "Deleted clothing item");
    Ok(ApiResponse::message("Clothing deleted successfully."))
}
