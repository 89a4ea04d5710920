//! Product repository implementation
//!
//! This module provides database access for products: filtered reads and
//! projections, JSON-column queries, tracked point writes, set-based bulk
//! statements and temporal reads over the history table.

use chrono::{DateTime, Utc};
use core_kernel::{Price, TemporalVersion, ValidityPeriod};
use domain_catalog::{Category, NewProduct, Product, ProductChanges, ProductSpecifications};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use crate::error::DatabaseError;
use crate::filters::QueryFilters;
use crate::interceptors::Interceptors;
use crate::temporal::{TemporalQuery, TemporalTable};
use crate::tracking::{ChangeSet, EntityEntry};

/// Product columns, qualified with the `p` alias
pub(crate) const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.category_id, \
     p.created_date, p.modified_date, p.is_deleted, p.specifications";

/// Repository for products
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::CatalogContext;
///
/// let products = db.products();
/// let red = products.find_by_color("red").await?;
/// let updated = products.bulk_update_price(dec!(10)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
    interceptors: Interceptors,
}

impl ProductRepository {
    /// Creates a new ProductRepository
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    /// * `interceptors` - Hooks notified around tracked writes
    pub fn new(pool: PgPool, interceptors: Interceptors) -> Self {
        Self { pool, interceptors }
    }

    /// Lists products together with their category
    pub async fn list_with_category(&self) -> Result<Vec<ProductWithCategory>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            r#"
            SELECT {},
                c.name AS category_name,
                c.description AS category_description,
                c.created_date AS category_created_date,
                c.modified_date AS category_modified_date,
                c.is_deleted AS category_is_deleted
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE "#,
            PRODUCT_COLUMNS
        ));
        QueryFilters::Apply.push_predicate(&mut builder, "p");
        builder.push(" AND ");
        QueryFilters::Apply.push_predicate(&mut builder, "c");
        builder.push(" ORDER BY p.id");

        builder
            .build_query_as::<ProductCategoryRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(ProductWithCategory::try_from)
            .collect()
    }

    /// Lists products as a flat projection carrying the category name
    pub async fn list_projected(&self) -> Result<Vec<ProductSummary>, DatabaseError> {
        self.fetch_summaries(QueryFilters::Apply, None).await
    }

    /// Fetches the projection of a single product
    pub async fn get_projected(&self, id: i32) -> Result<Option<ProductSummary>, DatabaseError> {
        let mut summaries = self.fetch_summaries(QueryFilters::Apply, Some(id)).await?;
        Ok(summaries.pop())
    }

    /// Lists soft-deleted products only
    ///
    /// Bypasses the soft-delete filter for both the products and their
    /// categories.
    pub async fn list_deleted(&self) -> Result<Vec<ProductSummary>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {}, c.name AS category_name FROM products p JOIN categories c ON c.id = p.category_id WHERE ",
            PRODUCT_COLUMNS
        ));
        QueryFilters::Ignore.push_predicate(&mut builder, "p");
        builder.push(" AND p.is_deleted = TRUE ORDER BY p.id");

        builder
            .build_query_as::<ProductSummaryRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(ProductSummary::try_from)
            .collect()
    }

    async fn fetch_summaries(
        &self,
        filters: QueryFilters,
        id: Option<i32>,
    ) -> Result<Vec<ProductSummary>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {}, c.name AS category_name FROM products p JOIN categories c ON c.id = p.category_id WHERE ",
            PRODUCT_COLUMNS
        ));
        filters.push_predicate(&mut builder, "p");
        builder.push(" AND ");
        filters.push_predicate(&mut builder, "c");
        if let Some(id) = id {
            builder.push(" AND p.id = ").push_bind(id);
        }
        builder.push(" ORDER BY p.id");

        builder
            .build_query_as::<ProductSummaryRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(ProductSummary::try_from)
            .collect()
    }

    /// Finds products whose specifications carry the given color
    ///
    /// The comparison runs against the JSON document and ignores case.
    #[instrument(skip(self))]
    pub async fn find_by_color(&self, color: &str) -> Result<Vec<Product>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM products p WHERE ",
            PRODUCT_COLUMNS
        ));
        QueryFilters::Apply.push_predicate(&mut builder, "p");
        builder
            .push(" AND lower(p.specifications ->> 'color') = lower(")
            .push_bind(color.to_string())
            .push(") ORDER BY p.id");

        builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }

    /// Inserts a product through the tracked save path
    ///
    /// Missing specifications are persisted as an empty JSON document.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn insert(&self, product: NewProduct) -> Result<Product, DatabaseError> {
        let now = Utc::now();
        let document = ProductSpecifications::document_or_empty(product.specifications.as_ref());
        let pending = Product {
            id: 0,
            name: product.name,
            description: product.description,
            price: product.price,
            category_id: product.category_id,
            created_date: now,
            modified_date: now,
            is_deleted: false,
            specifications: product.specifications.unwrap_or_default(),
        };
        let change_set = ChangeSet::single(EntityEntry::added(&pending));

        self.interceptors
            .intercept(&change_set, async {
                let row = sqlx::query_as::<_, ProductRow>(&format!(
                    r#"
                    INSERT INTO products AS p
                        (name, description, price, category_id, created_date, modified_date, is_deleted, specifications)
                    VALUES ($1, $2, $3, $4, $5, $5, FALSE, $6)
                    RETURNING {}
                    "#,
                    PRODUCT_COLUMNS
                ))
                .bind(&pending.name)
                .bind(&pending.description)
                .bind(pending.price.amount())
                .bind(pending.category_id)
                .bind(pending.created_date)
                .bind(&document)
                .fetch_one(&self.pool)
                .await?;

                Ok::<_, DatabaseError>((Product::try_from(row)?, 1))
            })
            .await
    }

    /// Applies a partial update through the tracked save path
    ///
    /// The current row is locked for the duration of the transaction.
    /// Returns `None` if the product does not exist or is soft-deleted.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: ProductChanges) -> Result<Option<Product>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products p WHERE {} AND p.id = $1 FOR UPDATE",
            PRODUCT_COLUMNS,
            QueryFilters::Apply.predicate("p")
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original = Product::try_from(row)?;
        let mut current = original.clone();
        current.apply(changes, Utc::now());
        let change_set = ChangeSet::single(EntityEntry::modified(&original, &current));

        let updated = self
            .interceptors
            .intercept(&change_set, async move {
                let result = sqlx::query(
                    r#"
                    UPDATE products
                       SET name = $2,
                           description = $3,
                           price = $4,
                           category_id = $5,
                           modified_date = $6,
                           specifications = $7
                     WHERE id = $1
                    "#,
                )
                .bind(current.id)
                .bind(&current.name)
                .bind(&current.description)
                .bind(current.price.amount())
                .bind(current.category_id)
                .bind(current.modified_date)
                .bind(current.specifications.to_document())
                .execute(&mut *tx)
                .await?;

                tx.commit().await?;
                Ok::<_, DatabaseError>((current, result.rows_affected()))
            })
            .await?;

        Ok(Some(updated))
    }

    /// Raises or lowers every positive price by a percentage
    ///
    /// Runs as one UPDATE statement without loading any rows, so it is not
    /// tracked and interceptors are not notified. Returns the affected count.
    #[instrument(skip(self))]
    pub async fn bulk_update_price(&self, percentage: Decimal) -> Result<u64, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "UPDATE products AS p SET price = ROUND(p.price * (1 + ",
        );
        builder
            .push_bind(percentage)
            .push(" / 100), 2), modified_date = ")
            .push_bind(Utc::now())
            .push(" WHERE p.price > 0 AND ");
        QueryFilters::Apply.push_predicate(&mut builder, "p");

        let affected = builder.build().execute(&self.pool).await?.rows_affected();
        info!(affected, %percentage, "Bulk price update applied");
        Ok(affected)
    }

    /// Soft deletes every product priced at or below `max_price`
    ///
    /// Set-based like `bulk_update_price`. Already deleted rows are not
    /// counted again.
    #[instrument(skip(self))]
    pub async fn bulk_soft_delete(&self, max_price: Decimal) -> Result<u64, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "UPDATE products AS p SET is_deleted = TRUE, modified_date = ",
        );
        builder
            .push_bind(Utc::now())
            .push(" WHERE p.price <= ")
            .push_bind(max_price)
            .push(" AND ");
        QueryFilters::Apply.push_predicate(&mut builder, "p");

        let affected = builder.build().execute(&self.pool).await?.rows_affected();
        info!(affected, %max_price, "Bulk soft delete applied");
        Ok(affected)
    }

    /// Physically removes a product, deleted or not
    ///
    /// Returns `false` if no row with the id exists.
    #[instrument(skip(self))]
    pub async fn hard_delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let Some(product) = self.find(id, QueryFilters::Ignore).await? else {
            return Ok(false);
        };
        let change_set = ChangeSet::single(EntityEntry::deleted(&product));

        self.interceptors
            .intercept(&change_set, async {
                let affected = sqlx::query("DELETE FROM products WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
                    .rows_affected();

                Ok::<_, DatabaseError>((affected > 0, affected))
            })
            .await
    }

    /// Clears the deleted flag of a soft-deleted product
    ///
    /// The deleted row is locked until the flag is cleared, so concurrent
    /// restores of one product succeed once. Returns `None` unless the
    /// product exists and is currently deleted.
    #[instrument(skip(self))]
    pub async fn restore(&self, id: i32) -> Result<Option<Product>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products p WHERE {} AND p.id = $1 AND p.is_deleted = TRUE FOR UPDATE",
            PRODUCT_COLUMNS,
            QueryFilters::Ignore.predicate("p")
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original = Product::try_from(row)?;
        let mut current = original.clone();
        current.restore(Utc::now());
        let change_set = ChangeSet::single(EntityEntry::modified(&original, &current));

        let restored = self
            .interceptors
            .intercept(&change_set, async move {
                let affected = sqlx::query(
                    "UPDATE products SET is_deleted = FALSE, modified_date = $2 WHERE id = $1 AND is_deleted = TRUE",
                )
                .bind(current.id)
                .bind(current.modified_date)
                .execute(&mut *tx)
                .await?
                .rows_affected();

                tx.commit().await?;
                Ok::<_, DatabaseError>(((affected > 0).then_some(current), affected))
            })
            .await?;

        Ok(restored)
    }

    /// Every recorded version of a product, oldest first
    #[instrument(skip(self))]
    pub async fn history(&self, id: i32) -> Result<Vec<TemporalVersion<Product>>, DatabaseError> {
        let versions = self.fetch_versions(id, TemporalQuery::All).await?;
        debug!(versions = versions.len(), "Loaded product history");
        Ok(versions)
    }

    /// The version of a product that was current at `instant`
    ///
    /// Periods never overlap, so at most one row satisfies the predicate.
    #[instrument(skip(self))]
    pub async fn as_of(&self, id: i32, instant: DateTime<Utc>) -> Result<Option<Product>, DatabaseError> {
        let versions = self.fetch_versions(id, TemporalQuery::AsOf(instant)).await?;
        Ok(versions
            .into_iter()
            .rev()
            .find(|version| version.period.contains(instant))
            .map(|version| version.data))
    }

    async fn fetch_versions(
        &self,
        id: i32,
        query: TemporalQuery,
    ) -> Result<Vec<TemporalVersion<Product>>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {}, p.period_start, p.period_end FROM ",
            PRODUCT_COLUMNS
        ));
        query.push_source(&mut builder, TemporalTable::PRODUCTS, "p");
        builder.push(" WHERE ");
        QueryFilters::Apply.push_predicate(&mut builder, "p");
        builder.push(" AND p.id = ").push_bind(id);
        query.push_period_predicate(&mut builder, "p");
        builder.push(" ORDER BY p.period_start, p.period_end NULLS LAST");

        builder
            .build_query_as::<ProductVersionRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(TemporalVersion::try_from)
            .collect()
    }

    async fn find(&self, id: i32, filters: QueryFilters) -> Result<Option<Product>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM products p WHERE ",
            PRODUCT_COLUMNS
        ));
        filters.push_predicate(&mut builder, "p");
        builder.push(" AND p.id = ").push_bind(id);

        builder
            .build_query_as::<ProductRow>()
            .fetch_optional(&self.pool)
            .await?
            .map(Product::try_from)
            .transpose()
    }
}

/// Database row for products
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i32,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub is_deleted: bool,
    #[sqlx(json)]
    pub specifications: ProductSpecifications,
}

impl TryFrom<ProductRow> for Product {
    type Error = DatabaseError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: Price::new(row.price)?,
            category_id: row.category_id,
            created_date: row.created_date,
            modified_date: row.modified_date,
            is_deleted: row.is_deleted,
            specifications: row.specifications,
        })
    }
}

/// A product with its category, without a link back from the category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: Category,
}

#[derive(Debug, Clone, FromRow)]
struct ProductCategoryRow {
    #[sqlx(flatten)]
    product: ProductRow,
    category_name: String,
    category_description: Option<String>,
    category_created_date: DateTime<Utc>,
    category_modified_date: DateTime<Utc>,
    category_is_deleted: bool,
}

impl TryFrom<ProductCategoryRow> for ProductWithCategory {
    type Error = DatabaseError;

    fn try_from(row: ProductCategoryRow) -> Result<Self, Self::Error> {
        let category = Category {
            id: row.product.category_id,
            name: row.category_name,
            description: row.category_description,
            created_date: row.category_created_date,
            modified_date: row.category_modified_date,
            is_deleted: row.category_is_deleted,
        };

        Ok(ProductWithCategory {
            product: Product::try_from(row.product)?,
            category,
        })
    }
}

/// Flat product projection carrying the category name
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub product: Product,
    pub category_name: String,
}

#[derive(Debug, Clone, FromRow)]
struct ProductSummaryRow {
    #[sqlx(flatten)]
    product: ProductRow,
    category_name: String,
}

impl TryFrom<ProductSummaryRow> for ProductSummary {
    type Error = DatabaseError;

    fn try_from(row: ProductSummaryRow) -> Result<Self, Self::Error> {
        Ok(ProductSummary {
            product: Product::try_from(row.product)?,
            category_name: row.category_name,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
struct ProductVersionRow {
    #[sqlx(flatten)]
    product: ProductRow,
    period_start: DateTime<Utc>,
    period_end: Option<DateTime<Utc>>,
}

impl TryFrom<ProductVersionRow> for TemporalVersion<Product> {
    type Error = DatabaseError;

    fn try_from(row: ProductVersionRow) -> Result<Self, Self::Error> {
        let period = ValidityPeriod::new(row.period_start, row.period_end)?;
        Ok(TemporalVersion::new(Product::try_from(row.product)?, period))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn row(price: Decimal) -> ProductRow {
        ProductRow {
            id: 9,
            name: "Desk Lamp".to_string(),
            description: Some("LED".to_string()),
            price,
            category_id: 1,
            created_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            modified_date: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            is_deleted: false,
            specifications: ProductSpecifications::default(),
        }
    }

    #[test]
    fn test_row_converts_to_product() {
        let product = Product::try_from(row(dec!(24.50))).unwrap();
        assert_eq!(product.id, 9);
        assert_eq!(product.price.amount(), dec!(24.50));
        assert_eq!(product.specifications.in_stock, Some(true));
    }

    #[test]
    fn test_out_of_range_price_is_serialization_error() {
        let result = Product::try_from(row(dec!(100000000000000000)));
        assert!(matches!(result, Err(DatabaseError::SerializationError(_))));
    }

    #[test]
    fn test_version_row_period() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let version = TemporalVersion::try_from(ProductVersionRow {
            product: row(dec!(5)),
            period_start: start,
            period_end: Some(end),
        })
        .unwrap();

        assert!(version.period.contains(Utc.with_ymd_and_hms(2024, 5, 15, 0, 0, 0).unwrap()));
        assert!(!version.period.contains(end));
        assert_eq!(version.period.end, Some(end));
    }

    #[test]
    fn test_version_row_rejects_inverted_period() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let result = TemporalVersion::try_from(ProductVersionRow {
            product: row(dec!(5)),
            period_start: start,
            period_end: Some(end),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_product_with_category_serializes_flat() {
        let with_category = ProductWithCategory::try_from(ProductCategoryRow {
            product: row(dec!(12)),
            category_name: "Electronics".to_string(),
            category_description: None,
            category_created_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            category_modified_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            category_is_deleted: false,
        })
        .unwrap();

        let json = serde_json::to_value(&with_category).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["category"]["name"], "Electronics");
        assert!(json["category"].get("products").is_none());
    }
}
