//! Product specifications value object
//!
//! Specifications are not mapped to relational columns. The whole object is
//! serialized into a single `JSONB` column on the product row, so adding an
//! attribute never needs a schema migration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptive attributes of a product, stored as a JSON document
///
/// Absent attributes are omitted from the document rather than written as
/// `null`. `custom_attributes` can be supplied by callers but is never
/// serialized, so it is neither persisted nor returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSpecifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_months: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing)]
    pub custom_attributes: HashMap<String, String>,
}

impl Default for ProductSpecifications {
    fn default() -> Self {
        Self {
            color: None,
            size: None,
            weight: None,
            brand: None,
            material: None,
            model: None,
            warranty_months: None,
            in_stock: Some(true),
            custom_attributes: HashMap::new(),
        }
    }
}

impl ProductSpecifications {
    /// Serializes the persisted part of the specifications
    pub fn to_document(&self) -> serde_json::Value {
        // Every field is a plain scalar, so serialization cannot fail.
        serde_json::to_value(self).unwrap_or_else(|_| empty_document())
    }

    /// Serializes optional specifications, falling back to `{}`
    pub fn document_or_empty(specifications: Option<&ProductSpecifications>) -> serde_json::Value {
        specifications.map_or_else(empty_document, ProductSpecifications::to_document)
    }
}

fn empty_document() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
