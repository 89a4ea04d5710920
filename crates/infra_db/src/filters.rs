//! Global soft-delete query filter
//!
//! Soft-deleted rows stay in their tables with `is_deleted = TRUE`. Every
//! repository query builds its WHERE clause through `QueryFilters`, so the
//! exclusion is applied uniformly: to plain reads, to joined relations, to
//! temporal reads and to bulk statements. Callers opt out explicitly with
//! `QueryFilters::Ignore`.

use sqlx::{Postgres, QueryBuilder};

/// Whether the soft-delete filter applies to a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryFilters {
    /// Exclude soft-deleted rows
    #[default]
    Apply,
    /// Return rows regardless of their soft-delete flag
    Ignore,
}

impl QueryFilters {
    /// The filter predicate for a table alias
    ///
    /// Always yields a valid boolean expression so callers can write
    /// `WHERE <predicate> AND ...` unconditionally.
    pub fn predicate(&self, alias: &str) -> String {
        match self {
            QueryFilters::Apply => format!("{}.is_deleted = FALSE", alias),
            QueryFilters::Ignore => "TRUE".to_string(),
        }
    }

    /// Appends the filter predicate for a table alias
    pub fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        builder.push(self.predicate(alias));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_applies_filter() {
        assert_eq!(QueryFilters::default(), QueryFilters::Apply);
    }

    #[test]
    fn test_predicate_uses_alias() {
        assert_eq!(QueryFilters::Apply.predicate("p"), "p.is_deleted = FALSE");
        assert_eq!(QueryFilters::Ignore.predicate("p"), "TRUE");
    }

    #[test]
    fn test_push_predicate_into_where_clause() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM products p WHERE ");
        QueryFilters::Apply.push_predicate(&mut builder, "p");
        builder.push(" AND p.id = ").push_bind(5);

        assert_eq!(
            builder.sql(),
            "SELECT id FROM products p WHERE p.is_deleted = FALSE AND p.id = $1"
        );
    }
}
