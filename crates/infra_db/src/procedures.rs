//! Stored procedure wrappers
//!
//! The PL/pgSQL functions are installed by the migrations. They write
//! directly to the tables, so they bypass change tracking and the save
//! interceptors; the temporal history triggers still fire.

use domain_catalog::ProductSpecifications;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::error::DatabaseError;

/// Calls the product maintenance procedures
#[derive(Debug, Clone)]
pub struct StoredProcedures {
    pool: PgPool,
}

impl StoredProcedures {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a product via `sp_insert_product` and returns its id
    ///
    /// Missing specifications are sent as an empty JSON document.
    #[instrument(skip(self, specifications))]
    pub async fn insert_product(
        &self,
        name: &str,
        price: Decimal,
        category_id: i32,
        specifications: Option<&ProductSpecifications>,
    ) -> Result<i32, DatabaseError> {
        let document = ProductSpecifications::document_or_empty(specifications);

        let id = sqlx::query_scalar::<_, i32>("SELECT sp_insert_product($1, $2, $3, $4)")
            .bind(name)
            .bind(price)
            .bind(category_id)
            .bind(document)
            .fetch_one(&self.pool)
            .await?;

        debug!(id, "Product inserted by stored procedure");
        Ok(id)
    }

    /// Renames and reprices a live product via `sp_update_product`
    ///
    /// Returns the number of affected rows; zero when the product is
    /// missing or soft-deleted.
    #[instrument(skip(self))]
    pub async fn update_product(&self, id: i32, name: &str, price: Decimal) -> Result<u64, DatabaseError> {
        let affected = sqlx::query_scalar::<_, i32>("SELECT sp_update_product($1, $2, $3)")
            .bind(id)
            .bind(name)
            .bind(price)
            .fetch_one(&self.pool)
            .await?;

        Ok(affected.max(0) as u64)
    }

    /// Soft deletes a live product via `sp_delete_product`
    ///
    /// Returns the number of affected rows.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<u64, DatabaseError> {
        let affected = sqlx::query_scalar::<_, i32>("SELECT sp_delete_product($1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(affected.max(0) as u64)
    }
}
