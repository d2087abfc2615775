//! Catalog entities the mapping accelerator browses.
//!
//! The hierarchy is project (scoping mappings) and system → database →
//! schema → table (locating a source table).

use crate::ids::{DatabaseId, ProjectId, SchemaId, SystemId, TableId};
use crate::sql_utils::render_qualified;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A project that owns mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A source system (an application or platform feeding the warehouse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSystem {
    pub id: SystemId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A database registered under a source system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDatabase {
    pub id: DatabaseId,
    pub system_id: SystemId,
    pub name: String,
}

/// A schema inside a source database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSchema {
    pub schema_id: SchemaId,
    pub database_id: DatabaseId,
    pub name: String,
}

/// A table inside a source schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTable {
    pub id: TableId,
    pub schema_id: SchemaId,
    pub name: String,
}

/// Fully-qualified location of a source table, resolved through the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub database: String,
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_qualified(&[
            self.database.as_str(),
            self.schema.as_str(),
            self.table.as_str(),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ref_display_plain() {
        assert_eq!(TableRef::new("db", "schema", "table").to_string(), "db.schema.table");
    }

    #[test]
    fn test_table_ref_display_quotes_odd_names() {
        let r = TableRef::new("RAW", "hr data", "EMP");
        assert_eq!(r.to_string(), r#"RAW."hr data".EMP"#);
    }
}
