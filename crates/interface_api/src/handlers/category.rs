//! Category handlers

use axum::{extract::{Path, State}, Json};
use infra_db::QueryFilters;

use crate::{AppState, error::ApiError};
use crate::dto::category::*;

/// Lists categories without their products
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.db.categories().list(QueryFilters::Apply).await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// Gets a category with its products
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CategoryWithProductsResponse>, ApiError> {
    state
        .db
        .categories()
        .get_with_products(id)
        .await?
        .map(|category| Json(category.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Category {}", id)))
}

/// Lists categories with their products, loaded by a split query
pub async fn list_with_products_split(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithProductsResponse>>, ApiError> {
    let categories = state.db.categories().list_with_products_split().await?;
    Ok(Json(
        categories
            .into_iter()
            .map(CategoryWithProductsResponse::from)
            .collect(),
    ))
}
