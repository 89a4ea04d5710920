//! Catalog validation rules
//!
//! Length limits follow the column types:
//! - names: required, at most 100 characters (`VARCHAR(100)`)
//! - descriptions: optional, at most 500 characters (`VARCHAR(500)`)
//!
//! The rules are declared with `validator` derives on the input types; the
//! functions here flatten the result into a `CatalogError`.

use validator::{Validate, ValidationErrors};

use crate::error::CatalogError;
use crate::product::{NewProduct, ProductChanges};

/// Validates a product before insertion
pub fn validate_new_product(product: &NewProduct) -> Result<(), CatalogError> {
    product.validate().map_err(into_catalog_error)
}

/// Validates a partial product update
pub fn validate_changes(changes: &ProductChanges) -> Result<(), CatalogError> {
    changes.validate().map_err(into_catalog_error)
}

/// Flattens field errors into sorted, human readable messages
pub fn messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid ({})", field, e.code))
            })
        })
        .collect();
    messages.sort();
    messages
}

fn into_catalog_error(errors: ValidationErrors) -> CatalogError {
    CatalogError::validation_failed(messages(&errors))
}
