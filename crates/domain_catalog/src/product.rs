//! Product entity
//!
//! A product belongs to exactly one category and embeds its
//! specifications as a JSON document. Mutations that go through the
//! tracked save path are expressed here so the before/after states can be
//! compared by the change tracker.

use chrono::{DateTime, Utc};
use core_kernel::Price;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::specifications::ProductSpecifications;

/// A priced catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub category_id: i32,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub is_deleted: bool,
    pub specifications: ProductSpecifications,
}

impl Product {
    /// Applies a partial update and stamps the modification time
    pub fn apply(&mut self, changes: ProductChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category_id) = changes.category_id {
            self.category_id = category_id;
        }
        if let Some(specifications) = changes.specifications {
            self.specifications = specifications;
        }
        self.modified_date = now;
    }

    /// Clears the deleted flag
    pub fn restore(&mut self, now: DateTime<Utc>) {
        self.is_deleted = false;
        self.modified_date = now;
    }
}

/// Data for inserting a product
#[derive(Debug, Clone, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    pub price: Price,
    pub category_id: i32,
    /// `None` persists an empty JSON document
    pub specifications: Option<ProductSpecifications>,
}

/// A partial product update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, Validate)]
pub struct ProductChanges {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: Option<String>,
    /// `Some(None)` clears the description
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<Option<String>>,
    pub price: Option<Price>,
    pub category_id: Option<i32>,
    pub specifications: Option<ProductSpecifications>,
}
