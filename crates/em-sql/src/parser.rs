//! SQL parser wrapper

use crate::dialect::{for_db_type, SqlDialect};
use crate::error::{SqlError, SqlResult};
use em_core::DbType;
use sqlparser::ast::Statement;

/// SQL parser that wraps sqlparser-rs with the warehouse dialect
pub struct SqlParser {
    dialect: Box<dyn SqlDialect>,
}

impl SqlParser {
    /// Parser for the given warehouse
    pub fn for_db_type(db_type: DbType) -> Self {
        Self {
            dialect: for_db_type(db_type),
        }
    }

    /// Parser with the DuckDB dialect
    pub fn duckdb() -> Self {
        Self::for_db_type(DbType::DuckDb)
    }

    /// Parser with the Snowflake dialect
    pub fn snowflake() -> Self {
        Self::for_db_type(DbType::Snowflake)
    }

    /// Parse SQL into AST statements
    pub fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::EmptySql);
        }
        self.dialect.parse(sql)
    }

    /// Parse SQL that must contain exactly one statement
    pub fn parse_single(&self, sql: &str) -> SqlResult<Statement> {
        let mut stmts = self.parse(sql)?;
        match stmts.len() {
            0 => Err(SqlError::EmptySql),
            1 => Ok(stmts.remove(0)),
            n => Err(SqlError::ValidationError(format!(
                "expected one statement, found {n}"
            ))),
        }
    }

    /// Get the dialect name
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::duckdb()
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
