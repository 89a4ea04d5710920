//! Catalog data-access context

use crate::interceptors::{Interceptors, SaveChangesInterceptor};
use crate::pool::DatabasePool;
use crate::procedures::StoredProcedures;
use crate::repositories::{CategoryRepository, ProductRepository};

/// Entry point to the catalog store
///
/// Cheap to clone; clones share the pool and the registered interceptors.
///
/// ```rust,ignore
/// let db = CatalogContext::new(pool).with_interceptor(AuditInterceptor);
/// let deleted = db.products().bulk_soft_delete(price).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogContext {
    pool: DatabasePool,
    interceptors: Interceptors,
}

impl CatalogContext {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            pool,
            interceptors: Interceptors::new(),
        }
    }

    /// Registers an interceptor for tracked saves
    pub fn with_interceptor(mut self, interceptor: impl SaveChangesInterceptor + 'static) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    pub fn categories(&self) -> CategoryRepository {
        CategoryRepository::new(self.pool.clone(), self.interceptors.clone())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone(), self.interceptors.clone())
    }

    pub fn procedures(&self) -> StoredProcedures {
        StoredProcedures::new(self.pool.clone())
    }
}
