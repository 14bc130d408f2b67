use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::database::{ClothingItem, NewClothing};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/v1/clothing - every item in creation order
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ClothingItem>> {
    let items = state.clothing.get_all().await?;
    Ok(ApiResponse::success(items, "Fetching all clothing successfully."))
}

/// POST /api/v1/clothing - create an item, missing fields default to empty/zero
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewClothing>, JsonRejection>,
) -> ApiResult<ClothingItem> {
    let Json(data) = payload?;
    let item = state.clothing.add(data).await?;
    tracing::info!(id = %item.id, "Created clothing item");
    Ok(ApiResponse::created(item, "Clothing added successfully."))
}

/// GET /api/v1/clothing/available - stock > 0
pub async fn available(State(state): State<AppState>) -> ApiResult<Vec<ClothingItem>> {
    let items = state.clothing.get_available().await?;
    Ok(ApiResponse::success(items, "Fetching all available clothing successfully."))
}

/// GET /api/v1/clothing/out-of-stock - stock <= 0
pub async fn out_of_stock(State(state): State<AppState>) -> ApiResult<Vec<ClothingItem>> {
    let items = state.clothing.get_out_of_stock().await?;
    Ok(ApiResponse::success(items, "Fetching out-of-stock clothing successfully."))
}

/// GET /api/v1/clothing/low-stock - stock below the low-stock threshold
pub async fn low_stock(State(state): State<AppState>) -> ApiResult<Vec<ClothingItem>> {
    let items = state.clothing.get_low_stock().await?;
    Ok(ApiResponse::success(items, "Fetching low-stock clothing successfully."))
}
