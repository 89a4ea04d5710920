//! Category repository implementation
//!
//! Categories are read either on their own, with their products in one
//! joined statement, or with their products through a split query.

use chrono::{DateTime, Utc};
use core_kernel::Price;
use domain_catalog::{Category, CategoryWithProducts, NewCategory, Product, ProductSpecifications};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::error::DatabaseError;
use crate::filters::QueryFilters;
use crate::interceptors::Interceptors;
use crate::repositories::product::{ProductRow, PRODUCT_COLUMNS};
use crate::tracking::{ChangeSet, EntityEntry};

const CATEGORY_COLUMNS: &str = "c.id, c.name, c.description, c.created_date, c.modified_date, c.is_deleted";

/// Repository for categories and their product collections
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
    interceptors: Interceptors,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    /// * `interceptors` - Hooks notified around tracked inserts
    pub fn new(pool: PgPool, interceptors: Interceptors) -> Self {
        Self { pool, interceptors }
    }

    /// Lists categories without their products, ordered by id
    pub async fn list(&self, filters: QueryFilters) -> Result<Vec<Category>, DatabaseError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM categories c WHERE ",
            CATEGORY_COLUMNS
        ));
        filters.push_predicate(&mut builder, "c");
        builder.push(" ORDER BY c.id");

        let rows = builder
            .build_query_as::<CategoryRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Fetches a category with its products in a single joined statement
    ///
    /// Returns `None` if the category does not exist or is soft-deleted.
    /// Soft-deleted products are left out of the collection.
    #[instrument(skip(self))]
    pub async fn get_with_products(&self, id: i32) -> Result<Option<CategoryWithProducts>, DatabaseError> {
        let filters = QueryFilters::Apply;
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            r#"
            SELECT {},
                p.id AS product_id,
                p.name AS product_name,
                p.description AS product_description,
                p.price AS product_price,
                p.created_date AS product_created_date,
                p.modified_date AS product_modified_date,
                p.is_deleted AS product_is_deleted,
                p.specifications AS product_specifications
            FROM categories c
            LEFT JOIN products p ON p.category_id = c.id AND "#,
            CATEGORY_COLUMNS
        ));
        filters.push_predicate(&mut builder, "p");
        builder.push(" WHERE ");
        filters.push_predicate(&mut builder, "c");
        builder.push(" AND c.id = ").push_bind(id);
        builder.push(" ORDER BY p.id");

        let rows = builder
            .build_query_as::<CategoryProductRow>()
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), "Loaded category rows");
        group_joined_rows(rows)
    }

    /// Fetches all categories and their products with a split query
    ///
    /// One statement loads the categories, a second loads every product
    /// belonging to them; the two result sets are stitched in memory.
    #[instrument(skip(self))]
    pub async fn list_with_products_split(&self) -> Result<Vec<CategoryWithProducts>, DatabaseError> {
        let categories = self.list(QueryFilters::Apply).await?;
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM products p WHERE ",
            PRODUCT_COLUMNS
        ));
        QueryFilters::Apply.push_predicate(&mut builder, "p");
        builder.push(" AND p.category_id = ANY(").push_bind(ids).push(")");
        builder.push(" ORDER BY p.id");

        let products = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(attach_products(categories, products))
    }

    /// Counts categories including soft-deleted ones
    pub async fn count_all(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts a category through the tracked save path
    pub async fn insert(&self, category: NewCategory) -> Result<Category, DatabaseError> {
        let now = Utc::now();
        let pending = Category {
            id: 0,
            name: category.name,
            description: category.description,
            created_date: now,
            modified_date: now,
            is_deleted: false,
        };
        let change_set = ChangeSet::single(EntityEntry::added(&pending));

        self.interceptors
            .intercept(&change_set, async {
                let row = sqlx::query_as::<_, CategoryRow>(
                    r#"
                    INSERT INTO categories AS c (name, description, created_date, modified_date, is_deleted)
                    VALUES ($1, $2, $3, $3, FALSE)
                    RETURNING c.id, c.name, c.description, c.created_date, c.modified_date, c.is_deleted
                    "#,
                )
                .bind(&pending.name)
                .bind(&pending.description)
                .bind(pending.created_date)
                .fetch_one(&self.pool)
                .await?;

                Ok::<_, DatabaseError>((Category::from(row), 1))
            })
            .await
    }
}

/// Database row for categories
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    pub is_deleted: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            description: row.description,
            created_date: row.created_date,
            modified_date: row.modified_date,
            is_deleted: row.is_deleted,
        }
    }
}

/// A category row left-joined with one of its products
#[derive(Debug, Clone, FromRow)]
struct CategoryProductRow {
    #[sqlx(flatten)]
    category: CategoryRow,
    product_id: Option<i32>,
    product_name: Option<String>,
    product_description: Option<String>,
    product_price: Option<rust_decimal::Decimal>,
    product_created_date: Option<DateTime<Utc>>,
    product_modified_date: Option<DateTime<Utc>>,
    product_is_deleted: Option<bool>,
    product_specifications: Option<Json<ProductSpecifications>>,
}

impl CategoryProductRow {
    /// The joined product, or `None` for a category without products
    fn product(&self) -> Result<Option<Product>, DatabaseError> {
        let (Some(id), Some(name), Some(price), Some(created_date), Some(modified_date), Some(is_deleted)) = (
            self.product_id,
            self.product_name.clone(),
            self.product_price,
            self.product_created_date,
            self.product_modified_date,
            self.product_is_deleted,
        ) else {
            return Ok(None);
        };

        Ok(Some(Product {
            id,
            name,
            description: self.product_description.clone(),
            price: Price::new(price)?,
            category_id: self.category.id,
            created_date,
            modified_date,
            is_deleted,
            specifications: self
                .product_specifications
                .clone()
                .map(|Json(specifications)| specifications)
                .unwrap_or_default(),
        }))
    }
}

fn group_joined_rows(rows: Vec<CategoryProductRow>) -> Result<Option<CategoryWithProducts>, DatabaseError> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let category = Category::from(first.category.clone());
    let mut products = Vec::with_capacity(rows.len());
    for row in &rows {
        if let Some(product) = row.product()? {
            products.push(product);
        }
    }

    Ok(Some(CategoryWithProducts { category, products }))
}

/// Distributes products over their categories, keeping both orders
pub fn attach_products(categories: Vec<Category>, products: Vec<Product>) -> Vec<CategoryWithProducts> {
    let mut by_category: HashMap<i32, Vec<Product>> = HashMap::new();
    for product in products {
        by_category.entry(product.category_id).or_default().push(product);
    }

    categories
        .into_iter()
        .map(|category| {
            let products = by_category.remove(&category.id).unwrap_or_default();
            CategoryWithProducts { category, products }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn category_row(id: i32) -> CategoryRow {
        CategoryRow {
            id,
            name: format!("Category {}", id),
            description: None,
            created_date: at(),
            modified_date: at(),
            is_deleted: false,
        }
    }

    fn product(id: i32, category_id: i32) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: None,
            price: Price::new(dec!(10)).unwrap(),
            category_id,
            created_date: at(),
            modified_date: at(),
            is_deleted: false,
            specifications: ProductSpecifications::default(),
        }
    }

    fn joined(product_id: Option<i32>) -> CategoryProductRow {
        CategoryProductRow {
            category: category_row(1),
            product_id,
            product_name: product_id.map(|id| format!("Product {}", id)),
            product_description: None,
            product_price: product_id.map(|_| dec!(19.99)),
            product_created_date: product_id.map(|_| at()),
            product_modified_date: product_id.map(|_| at()),
            product_is_deleted: product_id.map(|_| false),
            product_specifications: product_id.map(|_| {
                Json(ProductSpecifications {
                    color: Some("Red".to_string()),
                    ..Default::default()
                })
            }),
        }
    }

    #[test]
    fn test_attach_products_groups_by_category() {
        let categories = vec![category_row(1).into(), category_row(2).into(), category_row(3).into()];
        let products = vec![product(10, 2), product(11, 1), product(12, 2)];

        let grouped = attach_products(categories, products);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![11]);
        assert_eq!(grouped[1].products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![10, 12]);
        assert!(grouped[2].products.is_empty());
    }

    #[test]
    fn test_group_joined_rows_without_products() {
        let grouped = group_joined_rows(vec![joined(None)]).unwrap().unwrap();
        assert_eq!(grouped.category.id, 1);
        assert!(grouped.products.is_empty());
    }

    #[test]
    fn test_group_joined_rows_collects_products() {
        let grouped = group_joined_rows(vec![joined(Some(4)), joined(Some(7))]).unwrap().unwrap();

        assert_eq!(grouped.products.len(), 2);
        assert_eq!(grouped.products[1].id, 7);
        assert_eq!(grouped.products[0].category_id, 1);
        assert_eq!(grouped.products[0].specifications.color.as_deref(), Some("Red"));
    }

    #[test]
    fn test_group_joined_rows_empty_is_none() {
        assert!(group_joined_rows(Vec::new()).unwrap().is_none());
    }
}
