//! Product handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use core_kernel::{parse_instant, Price};
use domain_catalog::validation::{validate_changes, validate_new_product};
use domain_catalog::{NewProduct, ProductChanges};
use tracing::info;

use crate::{AppState, error::ApiError};
use crate::dto::MessageResponse;
use crate::dto::product::*;

/// Lists products with their category embedded
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductWithCategoryResponse>>, ApiError> {
    let products = state.db.products().list_with_category().await?;
    Ok(Json(products.into_iter().map(ProductWithCategoryResponse::from).collect()))
}

/// Lists products as a flat projection
pub async fn list_projected(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductSummaryResponse>>, ApiError> {
    let products = state.db.products().list_projected().await?;
    Ok(Json(products.into_iter().map(ProductSummaryResponse::from).collect()))
}

/// Finds products by the color stored in their specifications
pub async fn find_by_color(
    State(state): State<AppState>,
    Path(color): Path<String>,
) -> Result<Json<Vec<ColorMatchResponse>>, ApiError> {
    let products = state.db.products().find_by_color(&color).await?;
    Ok(Json(products.into_iter().map(ColorMatchResponse::from).collect()))
}

/// Creates a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = NewProduct::try_from(request)?;
    validate_new_product(&product)?;

    let created = state.db.products().insert(product).await?;
    let location = format!("/api/products/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ProductResponse::from(created)),
    ))
}

/// Gets a product projection by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductSummaryResponse>, ApiError> {
    state
        .db
        .products()
        .get_projected(id)
        .await?
        .map(|summary| Json(summary.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Product {}", id)))
}

/// Updates a product through the tracked save path
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let changes = ProductChanges::try_from(request)?;
    validate_changes(&changes)?;

    state
        .db
        .products()
        .update(id, changes)
        .await?
        .map(|product| Json(product.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Product {}", id)))
}

/// Adjusts every positive price by a percentage
pub async fn bulk_update_price(
    State(state): State<AppState>,
    Query(query): Query<BulkUpdatePriceQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state.db.products().bulk_update_price(query.percentage).await?;
    Ok(Json(MessageResponse::new(format!("Updated {} products", affected))))
}

/// Soft deletes every product priced at or below `maxPrice`
pub async fn bulk_delete(
    State(state): State<AppState>,
    Query(query): Query<BulkDeleteQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state.db.products().bulk_soft_delete(query.max_price).await?;
    Ok(Json(MessageResponse::new(format!("Soft deleted {} products", affected))))
}

/// Physically removes a product, including soft-deleted ones
pub async fn hard_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.db.products().hard_delete(id).await? {
        info!(id, "Product permanently deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Product {}", id)))
    }
}

/// Lists every recorded version of a product
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ProductVersionResponse>>, ApiError> {
    let history = state.db.products().history(id).await?;
    Ok(Json(history.into_iter().map(ProductVersionResponse::from).collect()))
}

/// Gets the version of a product current at the given point in time
pub async fn get_as_of(
    State(state): State<AppState>,
    Path((id, date)): Path<(i32, String)>,
) -> Result<Json<ProductResponse>, ApiError> {
    let instant = parse_instant(&date)?;

    state
        .db
        .products()
        .as_of(id, instant)
        .await?
        .map(|product| Json(product.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Product {} as of {}", id, instant)))
}

/// Inserts a product through the `sp_insert_product` procedure
pub async fn sp_insert(
    State(state): State<AppState>,
    Json(request): Json<ProcedureInsertRequest>,
) -> Result<Json<ProcedureInsertResponse>, ApiError> {
    let product = NewProduct {
        name: request.name,
        description: None,
        price: Price::new(request.price)?,
        category_id: request.category_id,
        specifications: request.specifications,
    };
    validate_new_product(&product)?;

    let id = state
        .db
        .procedures()
        .insert_product(
            &product.name,
            product.price.amount(),
            product.category_id,
            product.specifications.as_ref(),
        )
        .await?;

    Ok(Json(ProcedureInsertResponse {
        id,
        message: "Product inserted via stored procedure".to_string(),
    }))
}

/// Renames and reprices a product through the `sp_update_product` procedure
pub async fn sp_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ProcedureUpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let price = Price::new(request.price)?;
    validate_changes(&ProductChanges {
        name: Some(request.name.clone()),
        price: Some(price),
        ..Default::default()
    })?;

    let affected = state
        .db
        .procedures()
        .update_product(id, &request.name, price.amount())
        .await?;

    if affected > 0 {
        Ok(Json(MessageResponse::new("Product updated via stored procedure")))
    } else {
        Err(ApiError::NotFound(format!("Product {}", id)))
    }
}

/// Soft deletes a product through the `sp_delete_product` procedure
pub async fn sp_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state.db.procedures().delete_product(id).await?;

    if affected > 0 {
        Ok(Json(MessageResponse::new("Product deleted via stored procedure")))
    } else {
        Err(ApiError::NotFound(format!("Product {}", id)))
    }
}

/// Lists soft-deleted products
pub async fn list_deleted(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductSummaryResponse>>, ApiError> {
    let products = state.db.products().list_deleted().await?;
    Ok(Json(
        products
            .into_iter()
            .map(|summary| {
                let is_deleted = summary.product.is_deleted;
                ProductSummaryResponse::from(summary).with_deleted_flag(is_deleted)
            })
            .collect(),
    ))
}

/// Restores a soft-deleted product
pub async fn restore_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, ApiError> {
    state
        .db
        .products()
        .restore(id)
        .await?
        .map(|product| Json(product.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Product {}", id)))
}
