//! Error types for em-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Migration error (D004)
    #[error("[D004] Warehouse migration failed: {0}")]
    MigrationError(String),

    /// Not implemented (D005)
    #[error("[D005] Feature not implemented for {backend}: {feature}")]
    NotImplemented { backend: String, feature: String },

    /// Mutex poisoned (D006)
    #[error("[D006] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// A row did not have the expected shape (D007)
    #[error("[D007] Unexpected result from {query}: {message}")]
    UnexpectedRow { query: String, message: String },

    /// Referenced record does not exist (D008)
    #[error("[D008] {kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// A grid row names a column mapping owned by another mapping (D009)
    #[error("[D009] Column mapping '{mapping_column_id}' does not belong to mapping '{mapping_id}'")]
    ForeignMappingColumn {
        mapping_column_id: String,
        mapping_id: String,
    },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error carries no structured variants for catalog errors
        let msg = err.to_string();
        if msg.contains("Table with name")
            || msg.contains("View with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
