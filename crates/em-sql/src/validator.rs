//! Parser-backed checks for generated SELECT bodies

use crate::error::{SqlError, SqlResult};
use crate::parser::SqlParser;
use em_core::DbType;
use sqlparser::ast::{SelectItem, SetExpr, Statement, TableFactor};

/// Shape of a validated mapping SELECT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectSummary {
    /// Output column names, in select-list order.
    pub columns: Vec<String>,
    /// The single source relation, as written.
    pub source: String,
}

/// Parse a generated SELECT with the warehouse dialect and check its shape.
///
/// The body must be a single plain SELECT over one table, and every select
/// item must carry an explicit alias.
pub fn validate_select(sql: &str, db_type: DbType) -> SqlResult<SelectSummary> {
    let parser = SqlParser::for_db_type(db_type);
    let statement = parser.parse_single(sql)?;

    let query = match statement {
        Statement::Query(query) => query,
        other => {
            return Err(SqlError::UnsupportedStatement(
                other.to_string().split_whitespace().take(3).collect::<Vec<_>>().join(" "),
            ))
        }
    };
    let select = match query.body.as_ref() {
        SetExpr::Select(select) => select,
        _ => {
            return Err(SqlError::ValidationError(
                "expected a plain SELECT".to_string(),
            ))
        }
    };

    let mut columns = Vec::with_capacity(select.projection.len());
    for item in &select.projection {
        match item {
            SelectItem::ExprWithAlias { alias, .. } => columns.push(alias.value.clone()),
            other => {
                return Err(SqlError::ValidationError(format!(
                    "select item '{other}' has no alias"
                )))
            }
        }
    }

    let source = match select.from.as_slice() {
        [only] if only.joins.is_empty() => match &only.relation {
            TableFactor::Table { name, .. } => name.to_string(),
            other => {
                return Err(SqlError::ValidationError(format!(
                    "unexpected source '{other}'"
                )))
            }
        },
        _ => {
            return Err(SqlError::ValidationError(
                "expected exactly one source table".to_string(),
            ))
        }
    };

    Ok(SelectSummary { columns, source })
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
