//! Warehouse SQL dialects

use em_core::DbType;
use sqlparser::ast::Statement;
use sqlparser::dialect::{
    Dialect, DuckDbDialect as SqlParserDuckDb, SnowflakeDialect as SqlParserSnowflake,
};
use sqlparser::parser::Parser;

use crate::error::{SqlError, SqlResult};

/// A warehouse dialect generated SQL is checked against
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect
    fn parser_dialect(&self) -> &dyn Dialect;

    /// Warehouse this dialect belongs to
    fn db_type(&self) -> DbType;

    /// Parse SQL into AST statements
    fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        Parser::parse_sql(self.parser_dialect(), sql).map_err(|e| {
            let message = e.to_string();
            let (line, column) = error_location(&message).unwrap_or((0, 0));
            SqlError::ParseError {
                message,
                line,
                column,
            }
        })
    }

    /// Get the dialect name
    fn name(&self) -> &'static str;
}

/// Dialect for a configured warehouse type
pub fn for_db_type(db_type: DbType) -> Box<dyn SqlDialect> {
    match db_type {
        DbType::DuckDb => Box::new(DuckDbDialect::default()),
        DbType::Snowflake => Box::new(SnowflakeDialect::default()),
    }
}

/// Pull `Line: N, Column: M` out of a sqlparser error message.
fn error_location(msg: &str) -> Option<(usize, usize)> {
    let after_line = &msg[msg.find("Line: ")? + "Line: ".len()..];
    let line = after_line[..after_line.find(',')?].trim().parse().ok()?;

    let after_col = &msg[msg.find("Column: ")? + "Column: ".len()..];
    let digits = after_col
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after_col.len());
    let column = after_col[..digits].parse().ok()?;
    Some((line, column))
}

/// DuckDB SQL dialect, used for the local warehouse
#[derive(Default)]
pub struct DuckDbDialect {
    dialect: SqlParserDuckDb,
}

impl SqlDialect for DuckDbDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn db_type(&self) -> DbType {
        DbType::DuckDb
    }

    fn name(&self) -> &'static str {
        "duckdb"
    }
}

/// Snowflake SQL dialect
#[derive(Default)]
pub struct SnowflakeDialect {
    dialect: SqlParserSnowflake,
}

impl SqlDialect for SnowflakeDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn db_type(&self) -> DbType {
        DbType::Snowflake
    }

    fn name(&self) -> &'static str {
        "snowflake"
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
