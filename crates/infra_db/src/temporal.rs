//! Temporal data access patterns
//!
//! Each temporal table has a history twin maintained by a trigger:
//!
//! ```sql
//! CREATE TABLE products_history (LIKE products);
//! CREATE TRIGGER products_period_history
//!     BEFORE UPDATE OR DELETE ON products
//!     FOR EACH ROW EXECUTE FUNCTION record_period_history();
//! ```
//!
//! Live rows have `period_end IS NULL`; history rows carry the closed
//! `[period_start, period_end)` interval during which they were current.
//!
//! # Query Patterns
//!
//! - **All versions**: union of the live table and its history table
//! - **As-of**: `period_start <= $t AND (period_end IS NULL OR period_end > $t)`

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

/// A table whose prior row versions are kept in a history table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalTable {
    pub table: &'static str,
    pub history: &'static str,
}

impl TemporalTable {
    pub const PRODUCTS: TemporalTable = TemporalTable {
        table: "products",
        history: "products_history",
    };
}

/// Which row versions a temporal read covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalQuery {
    /// Every version, live and historical
    All,
    /// The version that was current at the given instant
    AsOf(DateTime<Utc>),
}

impl TemporalQuery {
    /// Appends the row source, aliased, covering live and history rows
    pub fn push_source(&self, builder: &mut QueryBuilder<'_, Postgres>, table: TemporalTable, alias: &str) {
        builder.push(format!(
            "(SELECT * FROM {} UNION ALL SELECT * FROM {}) AS {}",
            table.table, table.history, alias
        ));
    }

    /// Appends ` AND <period condition>` for as-of reads; nothing for `All`
    pub fn push_period_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        if let TemporalQuery::AsOf(instant) = self {
            builder
                .push(format!(" AND {}.period_start <= ", alias))
                .push_bind(*instant)
                .push(format!(" AND ({0}.period_end IS NULL OR {0}.period_end > ", alias))
                .push_bind(*instant)
                .push(")");
        }
    }
}
