//! Repository implementations for catalog entities
//!
//! Repositories encapsulate SQL and map between database rows and domain
//! types. Each one follows the same rules:
//! - every read builds its WHERE clause through `QueryFilters`
//! - tracked writes describe themselves as a `ChangeSet` and run inside
//!   `Interceptors::intercept`
//! - bulk statements run as a single UPDATE and bypass change tracking

pub mod category;
pub mod product;

pub use category::{CategoryRepository, CategoryRow};
pub use product::{ProductRepository, ProductRow, ProductSummary, ProductWithCategory};
