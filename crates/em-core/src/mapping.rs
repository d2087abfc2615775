//! Mapping, column mapping and value translation types.

use crate::error::{CoreError, CoreResult};
use crate::ids::{MappingColumnId, MappingId, ProjectId, TableId};
use crate::serde_helpers::lenient_flag;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of object a mapping materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectType {
    /// `CREATE OR REPLACE VIEW`
    #[default]
    View,
    /// `CREATE OR REPLACE DYNAMIC TABLE`
    DynamicTable,
}

impl ObjectType {
    /// SQL keyword(s) used after `CREATE OR REPLACE`.
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            ObjectType::View => "VIEW",
            ObjectType::DynamicTable => "DYNAMIC TABLE",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_keyword())
    }
}

impl FromStr for ObjectType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "view" => Ok(ObjectType::View),
            "dynamictable" => Ok(ObjectType::DynamicTable),
            _ => Err(CoreError::UnknownObjectType {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for ObjectType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.sql_keyword())
    }
}

impl<'de> Deserialize<'de> for ObjectType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A configured correspondence from one source table to one target object.
///
/// Target fields stay empty until the user saves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub mapping_id: MappingId,
    pub project_id: ProjectId,
    pub source_table_id: TableId,
    /// Display name of the source table.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target_db: Option<String>,
    #[serde(default)]
    pub target_schema: Option<String>,
    #[serde(default)]
    pub target_object: Option<String>,
    #[serde(default)]
    pub target_type: Option<ObjectType>,
}

impl Mapping {
    /// `db.schema.object` of the target, if every part is set.
    pub fn target_display(&self) -> Option<String> {
        match (&self.target_db, &self.target_schema, &self.target_object) {
            (Some(db), Some(schema), Some(object)) => Some(format!("{db}.{schema}.{object}")),
            _ => None,
        }
    }
}

/// One row of the column-mapping grid.
///
/// Rows without `mapping_column_id` are source columns that have never been
/// saved as part of the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(rename = "MAPPING_COLUMN_ID", default)]
    pub mapping_column_id: Option<MappingColumnId>,
    #[serde(rename = "IS_MAPPED", deserialize_with = "lenient_flag", default)]
    pub is_mapped: bool,
    #[serde(rename = "SOURCECOLUMN")]
    pub source_column: String,
    #[serde(rename = "TARGETCOLUMN", default)]
    pub target_column: String,
    #[serde(rename = "DESCRIPTION", default)]
    pub description: String,
}

impl ColumnMapping {
    /// Target column name, falling back to the source column when blank.
    pub fn effective_target(&self) -> &str {
        let target = self.target_column.trim();
        if target.is_empty() {
            self.source_column.trim()
        } else {
            target
        }
    }
}

/// A value rewrite rule scoped to one column mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueTranslation {
    #[serde(rename = "MAPPING_COLUMN_ID")]
    pub mapping_column_id: MappingColumnId,
    #[serde(rename = "FROMVALUE")]
    pub from_value: String,
    #[serde(rename = "TOVALUE")]
    pub to_value: String,
}

/// A persistence action derived from one edited column-mapping row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnChange {
    Insert {
        mapping_id: MappingId,
        source_column: String,
        target_column: String,
        description: String,
    },
    Update {
        mapping_id: MappingId,
        mapping_column_id: MappingColumnId,
        target_column: String,
        description: String,
    },
    Delete {
        mapping_id: MappingId,
        mapping_column_id: MappingColumnId,
    },
}

/// Classify edited column-mapping rows into persistence actions.
///
/// - included, never saved → insert
/// - saved, now excluded → delete
/// - saved, still included → update
/// - excluded, never saved → nothing
pub fn plan_column_changes(mapping_id: &MappingId, rows: &[ColumnMapping]) -> Vec<ColumnChange> {
    rows.iter()
        .filter_map(|row| match (&row.mapping_column_id, row.is_mapped) {
            (None, true) => Some(ColumnChange::Insert {
                mapping_id: mapping_id.clone(),
                source_column: row.source_column.trim().to_string(),
                target_column: row.effective_target().to_string(),
                description: row.description.trim().to_string(),
            }),
            (Some(id), false) => Some(ColumnChange::Delete {
                mapping_id: mapping_id.clone(),
                mapping_column_id: id.clone(),
            }),
            (Some(id), true) => Some(ColumnChange::Update {
                mapping_id: mapping_id.clone(),
                mapping_column_id: id.clone(),
                target_column: row.effective_target().to_string(),
                description: row.description.trim().to_string(),
            }),
            (None, false) => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
