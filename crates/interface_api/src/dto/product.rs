//! Product DTOs

use chrono::{DateTime, Utc};
use core_kernel::{Price, TemporalVersion};
use domain_catalog::{NewProduct, Product, ProductChanges, ProductSpecifications};
use infra_db::repositories::{ProductSummary, ProductWithCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dto::category::CategoryResponse;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
    pub specifications: Option<ProductSpecifications>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ApiError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            name: request.name,
            description: request.description,
            price: Price::new(request.price)?,
            category_id: request.category_id,
            specifications: request.specifications,
        })
    }
}

/// Partial update; omitted fields keep their stored value
///
/// An explicit `"description": null` clears the description.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub category_id: Option<i32>,
    pub specifications: Option<ProductSpecifications>,
}

impl TryFrom<UpdateProductRequest> for ProductChanges {
    type Error = ApiError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductChanges {
            name: request.name,
            description: request.description,
            price: request.price.map(Price::new).transpose()?,
            category_id: request.category_id,
            specifications: request.specifications,
        })
    }
}

/// Marks a field as present in the body, even when its value is null
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of the stored procedure insert
#[derive(Debug, Deserialize)]
pub struct ProcedureInsertRequest {
    pub name: String,
    pub price: Decimal,
    pub category_id: i32,
    pub specifications: Option<ProductSpecifications>,
}

/// Body of the stored procedure update
#[derive(Debug, Deserialize)]
pub struct ProcedureUpdateRequest {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdatePriceQuery {
    pub percentage: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteQuery {
    #[serde(rename = "maxPrice")]
    pub max_price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    pub category_id: i32,
    pub specifications: ProductSpecifications,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub is_deleted: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category_id: product.category_id,
            specifications: product.specifications,
            created_date: product.created_date,
            modified_date: product.modified_date,
            is_deleted: product.is_deleted,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductWithCategoryResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub category: CategoryResponse,
}

impl From<ProductWithCategory> for ProductWithCategoryResponse {
    fn from(value: ProductWithCategory) -> Self {
        Self {
            product: value.product.into(),
            category: value.category.into(),
        }
    }
}

/// Flat projection naming the category instead of embedding it
#[derive(Debug, Serialize)]
pub struct ProductSummaryResponse {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    pub category_id: i32,
    pub category_name: String,
    pub specifications: ProductSpecifications,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    /// Only reported by the deleted listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

impl ProductSummaryResponse {
    /// Keeps the deleted flag in the body
    pub fn with_deleted_flag(mut self, is_deleted: bool) -> Self {
        self.is_deleted = Some(is_deleted);
        self
    }
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(summary: ProductSummary) -> Self {
        let product = summary.product;
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category_id: product.category_id,
            category_name: summary.category_name,
            specifications: product.specifications,
            created_date: product.created_date,
            modified_date: product.modified_date,
            is_deleted: None,
        }
    }
}

/// Result row of the color search
#[derive(Debug, Serialize)]
pub struct ColorMatchResponse {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    pub category_id: i32,
    pub specifications: ProductSpecifications,
}

impl From<Product> for ColorMatchResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category_id: product.category_id,
            specifications: product.specifications,
        }
    }
}

/// One entry of a product's history
#[derive(Debug, Serialize)]
pub struct ProductVersionResponse {
    pub id: i32,
    pub name: String,
    pub price: Price,
    pub period_start: DateTime<Utc>,
    /// Absent on the live version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_end: Option<DateTime<Utc>>,
}

impl From<TemporalVersion<Product>> for ProductVersionResponse {
    fn from(version: TemporalVersion<Product>) -> Self {
        Self {
            id: version.data.id,
            name: version.data.name,
            price: version.data.price,
            period_start: version.period.start,
            period_end: version.period.end,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProcedureInsertResponse {
    pub id: i32,
    pub message: String,
}
