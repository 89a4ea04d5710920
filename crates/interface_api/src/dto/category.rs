//! Category DTOs

use chrono::{DateTime, Utc};
use domain_catalog::{Category, CategoryWithProducts};
use serde::Serialize;

use crate::dto::product::ProductResponse;

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub is_deleted: bool,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_date: category.created_date,
            modified_date: category.modified_date,
            is_deleted: category.is_deleted,
        }
    }
}

/// A category with its products; the products do not repeat the category
#[derive(Debug, Serialize)]
pub struct CategoryWithProductsResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub products: Vec<ProductResponse>,
}

impl From<CategoryWithProducts> for CategoryWithProductsResponse {
    fn from(value: CategoryWithProducts) -> Self {
        Self {
            category: value.category.into(),
            products: value.products.into_iter().map(ProductResponse::from).collect(),
        }
    }
}
