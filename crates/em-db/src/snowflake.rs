//! Snowflake database backend stub

use crate::error::{DbError, DbResult};
use crate::rows::RowSet;
use crate::traits::Database;
use async_trait::async_trait;
use em_core::config::DatabaseConfig;
use em_core::{DbType, Statement};

/// Snowflake database backend (stub implementation)
///
/// Statements for Snowflake are generated (procedure calls, previews) but
/// there is no driver behind this backend yet.
pub struct SnowflakeBackend {
    _private: (),
}

fn not_implemented(feature: &str) -> DbError {
    DbError::NotImplemented {
        backend: "snowflake".to_string(),
        feature: feature.to_string(),
    }
}

impl SnowflakeBackend {
    /// Create a new Snowflake backend (not yet implemented)
    pub fn connect(_config: &DatabaseConfig) -> DbResult<Self> {
        Err(not_implemented("connection"))
    }
}

#[async_trait]
impl Database for SnowflakeBackend {
    async fn execute(&self, _stmt: &Statement) -> DbResult<usize> {
        Err(not_implemented("execute"))
    }

    async fn query(&self, _stmt: &Statement) -> DbResult<RowSet> {
        Err(not_implemented("query"))
    }

    async fn execute_batch(&self, _sql: &str) -> DbResult<()> {
        Err(not_implemented("execute_batch"))
    }

    fn db_type(&self) -> DbType {
        DbType::Snowflake
    }
}
