//! Unit tests for the catalog domain
//!
//! Tests cover validation limits, the JSON shape of product specifications
//! and the mutations used by the tracked save path.

use chrono::{TimeZone, Utc};
use core_kernel::Price;
use domain_catalog::validation::{validate_changes, validate_new_product};
use domain_catalog::{CatalogError, NewCategory, NewProduct, Product, ProductChanges, ProductSpecifications};
use rust_decimal_macros::dec;
use serde_json::json;
use validator::Validate;

fn new_product(name: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: None,
        price: Price::new(dec!(10.00)).unwrap(),
        category_id: 1,
        specifications: None,
    }
}

fn stored_product() -> Product {
    Product {
        id: 7,
        name: "Desk Lamp".to_string(),
        description: Some("LED lamp".to_string()),
        price: Price::new(dec!(39.90)).unwrap(),
        category_id: 1,
        created_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        modified_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        is_deleted: false,
        specifications: ProductSpecifications::default(),
    }
}

mod validation {
    use super::*;

    #[test]
    fn test_valid_product_passes() {
        assert!(validate_new_product(&new_product("Keyboard")).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = validate_new_product(&new_product(""));
        assert!(matches!(result, Err(CatalogError::ValidationFailed(msg)) if msg.contains("name")));
    }

    #[test]
    fn test_name_limit_counts_characters() {
        assert!(validate_new_product(&new_product(&"é".repeat(100))).is_ok());
        assert!(validate_new_product(&new_product(&"é".repeat(101))).is_err());
    }

    #[test]
    fn test_long_description_rejected() {
        let mut product = new_product("Keyboard");
        product.description = Some("x".repeat(501));

        let err = validate_new_product(&product).unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_all_failures_reported() {
        let mut product = new_product("");
        product.description = Some("x".repeat(501));

        match validate_new_product(&product) {
            Err(CatalogError::ValidationFailed(msg)) => {
                assert!(msg.contains("name"));
                assert!(msg.contains("description"));
            }
            other => panic!("Expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_changes_are_valid() {
        assert!(validate_changes(&ProductChanges::default()).is_ok());
    }

    #[test]
    fn test_changes_with_blank_name_rejected() {
        let changes = ProductChanges {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_changes(&changes).is_err());
    }

    #[test]
    fn test_changes_with_long_description_rejected() {
        let changes = ProductChanges {
            description: Some(Some("x".repeat(501))),
            ..Default::default()
        };
        assert!(validate_changes(&changes).is_err());

        let cleared = ProductChanges {
            description: Some(None),
            ..Default::default()
        };
        assert!(validate_changes(&cleared).is_ok());
    }

    #[test]
    fn test_category_validation() {
        assert!(NewCategory::new("Books", "Printed matter").validate().is_ok());
        assert!(NewCategory::new("x".repeat(101), "").validate().is_err());
    }
}

mod specifications {
    use super::*;

    #[test]
    fn test_default_is_in_stock() {
        let specs = ProductSpecifications::default();
        assert_eq!(specs.in_stock, Some(true));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let specs: ProductSpecifications = serde_json::from_value(json!({ "color": "Red" })).unwrap();

        assert_eq!(specs.color.as_deref(), Some("Red"));
        assert_eq!(specs.in_stock, Some(true));
        assert!(specs.custom_attributes.is_empty());
    }

    #[test]
    fn test_null_fields_are_omitted() {
        let specs = ProductSpecifications {
            color: Some("Black".to_string()),
            warranty_months: Some(24),
            in_stock: None,
            ..Default::default()
        };

        assert_eq!(specs.to_document(), json!({ "color": "Black", "warranty_months": 24 }));
    }

    #[test]
    fn test_custom_attributes_accepted_but_never_serialized() {
        let specs: ProductSpecifications = serde_json::from_value(json!({
            "brand": "Acme",
            "custom_attributes": { "finish": "matte" }
        }))
        .unwrap();

        assert_eq!(specs.custom_attributes.get("finish").map(String::as_str), Some("matte"));
        let document = specs.to_document();
        assert!(document.get("custom_attributes").is_none());
        assert_eq!(document["brand"], "Acme");
    }

    #[test]
    fn test_missing_specifications_become_empty_document() {
        assert_eq!(ProductSpecifications::document_or_empty(None), json!({}));
    }

}

mod mutations {
    use super::*;

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut product = stored_product();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();

        product.apply(
            ProductChanges {
                price: Some(Price::new(dec!(44.50)).unwrap()),
                ..Default::default()
            },
            now,
        );

        assert_eq!(product.price.amount(), dec!(44.50));
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.description.as_deref(), Some("LED lamp"));
        assert_eq!(product.modified_date, now);
    }

    #[test]
    fn test_apply_clears_description() {
        let mut product = stored_product();
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();

        product.apply(
            ProductChanges {
                description: Some(None),
                ..Default::default()
            },
            now,
        );

        assert!(product.description.is_none());
        assert_eq!(product.name, "Desk Lamp");
    }

    #[test]
    fn test_restore_clears_deleted_flag() {
        let mut product = Product {
            is_deleted: true,
            ..stored_product()
        };
        let restored_at = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();

        product.restore(restored_at);
        assert!(!product.is_deleted);
        assert_eq!(product.modified_date, restored_at);
        assert_eq!(product.created_date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }
}
