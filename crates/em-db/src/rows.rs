//! Fetched result sets.
//!
//! Backends return every query as a [`RowSet`] of [`SqlValue`] cells. Stores
//! read cells by column name, case-insensitively, since Snowflake folds
//! unquoted identifiers to upper case and DuckDB preserves them.

use crate::error::{DbError, DbResult};
use em_core::SqlValue;
use std::str::FromStr;

/// Column names plus rows of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl RowSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn first(&self) -> Option<Row<'_>> {
        self.iter().next()
    }
}

/// A borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [SqlValue],
}

impl<'a> Row<'a> {
    /// Cell for `column`, if the result has such a column.
    pub fn get(&self, column: &str) -> Option<&'a SqlValue> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
            .and_then(|idx| self.values.get(idx))
    }

    /// Cell as text; missing columns and `NULL` read as "".
    pub fn text(&self, column: &str) -> String {
        self.get(column).map(SqlValue::as_text).unwrap_or_default()
    }

    /// Cell as text, `None` when missing, `NULL` or blank.
    pub fn opt_text(&self, column: &str) -> Option<String> {
        let text = self.text(column);
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Cell as a boolean flag, `default` when missing or unrecognised.
    pub fn flag(&self, column: &str, default: bool) -> bool {
        self.get(column)
            .and_then(SqlValue::as_bool)
            .unwrap_or(default)
    }

    /// Cell as an integer, `default` when missing or not numeric.
    pub fn int(&self, column: &str, default: i64) -> i64 {
        self.get(column).and_then(SqlValue::as_i64).unwrap_or(default)
    }

    /// Parse a non-empty cell, e.g. an identifier newtype.
    pub fn parse<T: FromStr>(&self, column: &str) -> DbResult<T> {
        self.text(column)
            .parse()
            .map_err(|_| DbError::UnexpectedRow {
                query: column.to_string(),
                message: format!("column {column} is missing or empty"),
            })
    }

    /// Parse a cell that may be empty.
    pub fn parse_opt<T: FromStr>(&self, column: &str) -> Option<T> {
        self.opt_text(column).and_then(|s| s.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use em_core::EmployeeId;

    fn sample() -> RowSet {
        RowSet::new(
            vec!["EMPLOYEE_ID".to_string(), "active".to_string(), "VERSION_NUMBER".to_string()],
            vec![
                vec![SqlValue::Text("E1".to_string()), SqlValue::Bool(false), SqlValue::Int(3)],
                vec![SqlValue::Null, SqlValue::Null, SqlValue::Text("x".to_string())],
            ],
        )
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let rows = sample();
        let first = rows.first().unwrap();
        assert_eq!(first.text("employee_id"), "E1");
        assert!(!first.flag("ACTIVE", true));
        assert_eq!(first.int("version_number", 1), 3);
    }

    #[test]
    fn test_defaults_for_null_and_missing() {
        let rows = sample();
        let second = rows.iter().nth(1).unwrap();
        assert_eq!(second.text("EMPLOYEE_ID"), "");
        assert_eq!(second.opt_text("EMPLOYEE_ID"), None);
        assert!(second.flag("ACTIVE", true));
        assert_eq!(second.int("VERSION_NUMBER", 1), 1);
        assert_eq!(second.text("NOPE"), "");
    }

    #[test]
    fn test_parse_ids() {
        let rows = sample();
        let id: EmployeeId = rows.first().unwrap().parse("EMPLOYEE_ID").unwrap();
        assert_eq!(id, "E1");

        let second = rows.iter().nth(1).unwrap();
        assert!(second.parse::<EmployeeId>("EMPLOYEE_ID").is_err());
        assert_eq!(second.parse_opt::<EmployeeId>("EMPLOYEE_ID"), None);
    }
}
