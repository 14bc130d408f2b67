use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Deserialize;

use super::utils::required_param;
use crate::database::ClothingItem;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ColorQuery {
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SizeQuery {
    pub size: Option<String>,
}

/// GET /api/v1/clothing/search?search= - case-insensitive substring over color or size.
/// A missing term matches everything.
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<ClothingItem>> {
    let Query(query) = query?;
    let text = query.search.unwrap_or_default();
    let items = state.clothing.find_by_free_text(&text).await?;
    Ok(ApiResponse::success(items, "Clothing search successful."))
}

/// GET /api/v1/clothing/search/color?color=
pub async fn search_by_color(
    State(state): State<AppState>,
    query: Result<Query<ColorQuery>, QueryRejection>,
) -> ApiResult<Vec<ClothingItem>> {
    let Query(query) = query?;
    let color = required_param(query.color, "color")?;
    let items = state.clothing.find_by_color(&color).await?;
    Ok(ApiResponse::success(items, "Clothing search by color successful."))
}

/// GET /api/v1/clothing/search/size?size=
pub async fn search_by_size(
    State(state): State<AppState>,
    query: Result<Query<SizeQuery>, QueryRejection>,
) -> ApiResult<Vec<ClothingItem>> {
    let Query(query) = query?;
    let size = required_param(query.size, "size")?;
    let items = state.clothing.find_by_size(&size).await?;
    Ok(ApiResponse::success(items, "Clothing search by size successful."))
}
