//! Catalog Domain
//!
//! This crate holds the two persisted entities of the catalog and the value
//! object embedded in one of them:
//!
//! - **Category**: a named grouping of products
//! - **Product**: a priced item belonging to exactly one category
//! - **ProductSpecifications**: descriptive attributes stored as a JSON
//!   document on the owning product row
//!
//! Both entities carry a soft-delete flag. Storage concerns (temporal
//! history, query filters, change tracking) live in `infra_db`.
//!
//! # Examples
//!
//! ```rust
//! use domain_catalog::{NewProduct, ProductSpecifications};
//! use core_kernel::Price;
//! use rust_decimal::Decimal;
//!
//! let product = NewProduct {
//!     name: "Trail Runner".to_string(),
//!     description: Some("Lightweight running shoe".to_string()),
//!     price: Price::new(Decimal::new(8999, 2)).unwrap(),
//!     category_id: 2,
//!     specifications: Some(ProductSpecifications {
//!         color: Some("Blue".to_string()),
//!         size: Some("42".to_string()),
//!         ..Default::default()
//!     }),
//! };
//!
//! assert!(domain_catalog::validation::validate_new_product(&product).is_ok());
//! ```

pub mod category;
pub mod product;
pub mod specifications;
pub mod validation;
pub mod error;

pub use category::{Category, CategoryWithProducts, NewCategory};
pub use product::{NewProduct, Product, ProductChanges};
pub use specifications::ProductSpecifications;
pub use error::CatalogError;
