use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use super::utils::{parse_id, validate_quantity};
use crate::database::ClothingItem;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::StockDecrease;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StockAdjustment {
    pub id: String,
    pub quantity: i64,
}

/// PATCH /api/v1/clothing/increase-stock
pub async fn increase_stock(
    State(state): State<AppState>,
    payload: Result<Json<StockAdjustment>, JsonRejection>,
) -> ApiResult<ClothingItem> {
    let Json(request) = payload?;
    let quantity = validate_quantity(request.quantity)?;
    let id = parse_id(&request.id)?;

    let item = state
        .clothing
        .increase_stock(id, quantity)
        .await?
        .ok_or_else(ApiError::clothing_not_found)?;

    tracing::info!(%id, quantity, stock = item.stock, "Increased stock");
    Ok(ApiResponse::success(item, "Stock increased successfully."))
}

/// PATCH /api/v1/clothing/decrease-stock
///
/// Never takes stock below zero: the check and the write happen as one step in the store.
pub async fn decrease_stock(
    State(state): State<AppState>,
    payload: Result<Json<StockAdjustment>, JsonRejection>,
) -> ApiResult<ClothingItem> {
    let Json(request) = payload?;
    let quantity = validate_quantity(request.quantity)?;
    let id = parse_id(&request.id)?;

    match state.clothing.decrease_stock_checked(id, quantity).await? {
        StockDecrease::Decreased(item) => {
            tracing::info!(%id, quantity, stock = item.stock, "Decreased stock");
            Ok(ApiResponse::success(item, "Stock decreased successfully."))
        }
        StockDecrease::Insufficient { available } => {
            tracing::debug!(%id, quantity, available, "Insufficient stock");
            Err(ApiError::bad_request("Insufficient stock"))
        }
        StockDecrease::NotFound => Err(ApiError::clothing_not_found()),
    }
}
