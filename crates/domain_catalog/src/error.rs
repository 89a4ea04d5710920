//! Catalog domain errors

use core_kernel::PriceError;
use thiserror::Error;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Entity validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Price(#[from] PriceError),
}

impl CatalogError {
    /// Creates a ValidationFailed error from a list of messages
    pub fn validation_failed(errors: Vec<String>) -> Self {
        CatalogError::ValidationFailed(errors.join("; "))
    }
}
