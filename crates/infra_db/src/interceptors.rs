//! Save interceptors
//!
//! Interceptors observe tracked writes. Each one is told about a
//! `ChangeSet` before the write runs, and again once it either commits or
//! fails. They cannot alter the write itself.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::DatabaseError;
use crate::tracking::ChangeSet;

/// Hook invoked around every tracked save
#[async_trait]
pub trait SaveChangesInterceptor: Send + Sync {
    /// Called before the write is sent to the database
    async fn saving_changes(&self, _changes: &ChangeSet) {}

    /// Called after the write committed
    async fn saved_changes(&self, _changes: &ChangeSet, _affected: u64) {}

    /// Called when the write failed
    async fn save_changes_failed(&self, _changes: &ChangeSet, _error: &DatabaseError) {}
}

/// Writes the audit trail of every tracked save to the `audit` log target
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditInterceptor;

#[async_trait]
impl SaveChangesInterceptor for AuditInterceptor {
    async fn saving_changes(&self, changes: &ChangeSet) {
        for line in changes.audit_lines() {
            info!(target: "audit", change_set = %changes.id(), "{}", line);
        }
    }

    async fn saved_changes(&self, changes: &ChangeSet, affected: u64) {
        info!(
            target: "audit",
            change_set = %changes.id(),
            entries = changes.len(),
            affected,
            "Changes saved"
        );
    }

    async fn save_changes_failed(&self, changes: &ChangeSet, error: &DatabaseError) {
        warn!(target: "audit", change_set = %changes.id(), %error, "Saving changes failed");
    }
}

/// The interceptors registered on a context, run in registration order
#[derive(Clone, Default)]
pub struct Interceptors {
    registered: Vec<Arc<dyn SaveChangesInterceptor>>,
}

impl Interceptors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interceptor: impl SaveChangesInterceptor + 'static) {
        self.registered.push(Arc::new(interceptor));
    }

    /// Runs a tracked write between the interceptor callbacks
    ///
    /// `work` resolves to the write's result and the number of affected rows.
    /// The error, if any, is returned unchanged after the failure callbacks.
    pub async fn intercept<T, F>(&self, changes: &ChangeSet, work: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<(T, u64), DatabaseError>>,
    {
        for interceptor in &self.registered {
            interceptor.saving_changes(changes).await;
        }

        match work.await {
            Ok((value, affected)) => {
                for interceptor in &self.registered {
                    interceptor.saved_changes(changes, affected).await;
                }
                Ok(value)
            }
            Err(error) => {
                for interceptor in &self.registered {
                    interceptor.save_changes_failed(changes, &error).await;
                }
                Err(error)
            }
        }
    }
}

impl std::fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptors")
            .field("registered", &self.registered.len())
            .finish()
    }
}
