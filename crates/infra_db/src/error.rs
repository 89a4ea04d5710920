//! Database error types
//!
//! This module defines the error types that can occur during database
//! operations. SQLx errors are classified by PostgreSQL SQLSTATE code so
//! callers can tell constraint violations apart from infrastructure faults.

use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check or not-null constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Value too long for its column
    #[error("Value too long: {0}")]
    ValueTooLong(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be mapped to its domain type
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(sqlx::Error),
}

impl DatabaseError {
    /// Checks if this error means the database could not be reached
    ///
    /// Covers failed connects and acquire timeouts on an exhausted pool.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }

    /// Maps a PostgreSQL SQLSTATE code and message to an error variant
    ///
    /// https://www.postgresql.org/docs/current/errcodes-appendix.html
    pub fn from_sqlstate(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            "23505" => DatabaseError::DuplicateEntry(message),
            "23503" => DatabaseError::ForeignKeyViolation(message),
            "23502" | "23514" => DatabaseError::ConstraintViolation(message),
            "22001" => DatabaseError::ValueTooLong(message),
            _ => DatabaseError::QueryFailed(message),
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => DatabaseError::ConnectionFailed(error.to_string()),
            sqlx::Error::Database(db_err) => match db_err.code() {
                Some(code) => DatabaseError::from_sqlstate(code.as_ref(), db_err.message()),
                None => DatabaseError::QueryFailed(db_err.message().to_string()),
            },
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::SerializationError(error.to_string())
            }
            other => DatabaseError::SqlError(other),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

impl From<core_kernel::PriceError> for DatabaseError {
    fn from(error: core_kernel::PriceError) -> Self {
        DatabaseError::SerializationError(error.to_string())
    }
}

impl From<core_kernel::TemporalError> for DatabaseError {
    fn from(error: core_kernel::TemporalError) -> Self {
        DatabaseError::SerializationError(error.to_string())
    }
}
