//! Pre-built Test Fixtures
//!
//! Provides ready-to-use catalog data with fixed values, for unit tests that
//! need predictable entities without a database.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::Price;
use domain_catalog::{Category, NewCategory, Product, ProductSpecifications};
use rust_decimal_macros::dec;

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Creation time of every fixture entity (Jan 1, 2024)
    pub fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }
}

/// Fixture for specifications documents
pub struct SpecificationFixtures;

impl SpecificationFixtures {
    /// Specifications with every persisted attribute set
    pub fn full() -> ProductSpecifications {
        ProductSpecifications {
            color: Some("Black".to_string()),
            size: Some("Standard".to_string()),
            weight: Some(0.25),
            brand: Some("Sonic".to_string()),
            material: Some("Aluminium".to_string()),
            model: Some("WH-100".to_string()),
            warranty_months: Some(24),
            in_stock: Some(true),
            custom_attributes: Default::default(),
        }
    }

    /// Specifications with only a color
    pub fn colored(color: &str) -> ProductSpecifications {
        ProductSpecifications {
            color: Some(color.to_string()),
            ..Default::default()
        }
    }
}

/// Fixture for catalog entities
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// The electronics category with id 1
    pub fn electronics() -> Category {
        Category {
            id: 1,
            name: "Electronics".to_string(),
            description: Some("Devices, gadgets and accessories".to_string()),
            created_date: TemporalFixtures::created(),
            modified_date: TemporalFixtures::created(),
            is_deleted: false,
        }
    }

    /// Insert payload for a category
    pub fn new_category(name: &str) -> NewCategory {
        NewCategory::new(name, format!("{} department", name))
    }

    /// A live product in the electronics category
    pub fn headphones() -> Product {
        Product {
            id: 1,
            name: "Wireless Headphones".to_string(),
            description: Some("Over-ear headphones with noise cancelling".to_string()),
            price: Price::new(dec!(199.99)).unwrap(),
            category_id: 1,
            created_date: TemporalFixtures::created(),
            modified_date: TemporalFixtures::created(),
            is_deleted: false,
            specifications: SpecificationFixtures::full(),
        }
    }
}
