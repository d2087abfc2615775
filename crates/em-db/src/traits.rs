//! Database trait definition

use crate::error::DbResult;
use crate::rows::RowSet;
use async_trait::async_trait;
use em_core::{DbType, Statement};

/// Warehouse abstraction used by every store
///
/// Implementations must be Send + Sync for async operation. All statements
/// carry their values as bound parameters.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a statement that modifies data, returns affected rows
    async fn execute(&self, stmt: &Statement) -> DbResult<usize>;

    /// Execute a statement that returns rows
    async fn query(&self, stmt: &Statement) -> DbResult<RowSet>;

    /// Execute multiple unparameterized SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Warehouse type, used to pick procedure and dialect variants
    fn db_type(&self) -> DbType;

    /// Start a transaction
    async fn begin(&self) -> DbResult<()> {
        self.execute_batch("BEGIN TRANSACTION").await
    }

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()> {
        self.execute_batch("COMMIT").await
    }

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()> {
        self.execute_batch("ROLLBACK").await
    }
}
