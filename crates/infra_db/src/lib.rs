//! Infrastructure Database Layer
//!
//! This crate provides the data-access gateway for the catalog service on
//! PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! `CatalogContext` is the single entry point. It hands out repositories
//! that share the connection pool and the registered save interceptors.
//!
//! - **Global query filter**: every query goes through `QueryFilters`, which
//!   excludes soft-deleted rows unless explicitly ignored
//! - **Temporal history**: `products` and `categories` are mirrored into
//!   `*_history` tables by triggers; `TemporalQuery` reads across both
//! - **Change tracking**: tracked writes describe themselves as a
//!   `ChangeSet`, which interceptors observe before and after commit
//! - **Bulk statements**: set-based updates run as one statement and are
//!   not tracked
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{AuditInterceptor, CatalogContext, DatabaseConfig, create_pool};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/catalog")).await?;
//! infra_db::run_migrations(&pool).await?;
//! let db = CatalogContext::new(pool).with_interceptor(AuditInterceptor);
//! let products = db.products().list_with_category().await?;
//! ```

pub mod pool;
pub mod error;
pub mod filters;
pub mod temporal;
pub mod tracking;
pub mod interceptors;
pub mod context;
pub mod repositories;
pub mod procedures;
pub mod seed;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, create_lazy_pool, run_migrations};
pub use error::DatabaseError;
pub use filters::QueryFilters;
pub use temporal::{TemporalQuery, TemporalTable};
pub use tracking::{ChangeSet, EntityEntry, EntityState, Tracked};
pub use interceptors::{AuditInterceptor, Interceptors, SaveChangesInterceptor};
pub use context::CatalogContext;
pub use procedures::StoredProcedures;
pub use seed::seed_catalog;
