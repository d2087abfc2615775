//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::migration::run_migrations;
use crate::rows::RowSet;
use crate::traits::Database;
use async_trait::async_trait;
use chrono::NaiveDate;
use duckdb::types::Value;
use duckdb::{params_from_iter, Connection};
use em_core::{DbType, SqlValue, Statement};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Days from 0001-01-01 to 1970-01-01, for `DATE` values.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Open the warehouse and apply any pending migrations
    pub fn open_migrated(path: &str) -> DbResult<Self> {
        let backend = Self::new(path)?;
        backend.migrate()?;
        Ok(backend)
    }

    /// Apply pending EDACONFIG / HRDEMO migrations
    pub fn migrate(&self) -> DbResult<()> {
        run_migrations(&*self.lock()?)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    fn execute_sync(&self, stmt: &Statement) -> DbResult<usize> {
        log::debug!("execute: {stmt}");
        let conn = self.lock()?;
        conn.execute(&stmt.sql, params_from_iter(stmt.params.iter().map(to_duckdb)))
            .map_err(|e| DbError::ExecutionError(format!("{e}: {}", stmt.sql)))
    }

    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        log::debug!("execute batch: {sql}");
        let conn = self.lock()?;
        conn.execute_batch(sql).map_err(DbError::from)
    }

    /// Run a query and collect every cell.
    ///
    /// Rows are collected before reading column metadata; DuckDB does not
    /// know the column count until the statement has run.
    fn query_sync(&self, stmt: &Statement) -> DbResult<RowSet> {
        log::debug!("query: {stmt}");
        let conn = self.lock()?;
        let mut prepared = conn.prepare(&stmt.sql)?;

        let rows: Vec<Vec<SqlValue>> = prepared
            .query_map(params_from_iter(stmt.params.iter().map(to_duckdb)), |row| {
                let column_count = row.as_ref().column_count();
                (0..column_count)
                    .map(|i| row.get::<_, Value>(i).map(from_duckdb))
                    .collect()
            })
            .map_err(|e| DbError::ExecutionError(format!("{e}: {}", stmt.sql)))?
            .collect::<Result<_, _>>()?;

        let columns = (0..prepared.column_count())
            .map(|i| {
                prepared
                    .column_name(i)
                    .map_or_else(|_| format!("column{i}"), |name| name.to_string())
            })
            .collect();

        Ok(RowSet::new(columns, rows))
    }
}

/// Convert a bound parameter to a DuckDB value.
fn to_duckdb(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Bool(b) => Value::Boolean(*b),
        SqlValue::Int(n) => Value::BigInt(*n),
        SqlValue::Float(f) => Value::Double(*f),
        SqlValue::Text(s) => Value::Text(s.clone()),
        SqlValue::Date(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
    }
}

/// Convert a fetched DuckDB value.
///
/// Types Edamap never selects directly fall back to their debug text.
fn from_duckdb(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Boolean(b) => SqlValue::Bool(b),
        Value::TinyInt(n) => SqlValue::Int(n.into()),
        Value::SmallInt(n) => SqlValue::Int(n.into()),
        Value::Int(n) => SqlValue::Int(n.into()),
        Value::BigInt(n) => SqlValue::Int(n),
        Value::HugeInt(n) => i64::try_from(n)
            .map(SqlValue::Int)
            .unwrap_or_else(|_| SqlValue::Text(n.to_string())),
        Value::UTinyInt(n) => SqlValue::Int(n.into()),
        Value::USmallInt(n) => SqlValue::Int(n.into()),
        Value::UInt(n) => SqlValue::Int(n.into()),
        Value::UBigInt(n) => i64::try_from(n)
            .map(SqlValue::Int)
            .unwrap_or_else(|_| SqlValue::Text(n.to_string())),
        Value::Float(f) => SqlValue::Float(f.into()),
        Value::Double(f) => SqlValue::Float(f),
        Value::Decimal(d) => d
            .to_string()
            .parse()
            .map(SqlValue::Float)
            .unwrap_or_else(|_| SqlValue::Text(d.to_string())),
        Value::Text(s) | Value::Enum(s) => SqlValue::Text(s),
        Value::Date32(days) => days
            .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map(SqlValue::Date)
            .unwrap_or(SqlValue::Null),
        other => SqlValue::Text(format!("{other:?}")),
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, stmt: &Statement) -> DbResult<usize> {
        self.execute_sync(stmt)
    }

    async fn query(&self, stmt: &Statement) -> DbResult<RowSet> {
        self.query_sync(stmt)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    fn db_type(&self) -> DbType {
        DbType::DuckDb
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
