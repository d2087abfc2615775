//! Mapping preview generation.
//!
//! Turns a mapping, its column mappings and value translations into the
//! `CREATE OR REPLACE` statement that would materialize the target:
//!
//! ```text
//! CREATE OR REPLACE VIEW DW.HR.EMPLOYEES AS
//! SELECT
//! EMP_ID AS EMPLOYEE_ID,
//! CASE
//!     WHEN STATUS = 'A' THEN 'Active'
//!     ELSE STATUS
//! END AS EMPLOYEE_STATUS
//! FROM RAW.HR.EMP;
//! ```
//!
//! Identifiers that are plain stay verbatim, anything else is double-quoted.
//! Translation values are emitted as escaped string literals.

use crate::error::GenerateError;
use em_core::config::DynamicTableConfig;
use em_core::sql_utils::{render_ident, render_qualified, string_literal};
use em_core::{ColumnMapping, Mapping, ObjectType, TableRef, ValueTranslation};

/// A generated preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSql {
    /// Object type the statement creates.
    pub object_type: ObjectType,
    /// The full `CREATE OR REPLACE ...;` statement.
    pub statement: String,
    /// The `SELECT ... FROM source` body, without the trailing semicolon.
    pub select: String,
}

/// Generate the preview statement for a mapping.
///
/// Only columns with `is_mapped` participate, in input order. A missing
/// target type is treated as a view.
pub fn generate_preview(
    mapping: &Mapping,
    columns: &[ColumnMapping],
    translations: &[ValueTranslation],
    source: &TableRef,
    dynamic_table: Option<&DynamicTableConfig>,
) -> Result<PreviewSql, GenerateError> {
    let missing = |field| GenerateError::MissingTarget {
        mapping_id: mapping.mapping_id.to_string(),
        field,
    };
    let target_db = non_blank(&mapping.target_db).ok_or_else(|| missing("database"))?;
    let target_schema = non_blank(&mapping.target_schema).ok_or_else(|| missing("schema"))?;
    let target_object = non_blank(&mapping.target_object).ok_or_else(|| missing("object"))?;
    let object_type = mapping.target_type.unwrap_or_default();

    let select_list: Vec<String> = columns
        .iter()
        .filter(|c| c.is_mapped)
        .map(|column| select_item(column, translations))
        .collect();
    if select_list.is_empty() {
        return Err(GenerateError::NoMappedColumns {
            mapping_id: mapping.mapping_id.to_string(),
        });
    }

    let select = format!(
        "SELECT\n{}\nFROM {}",
        select_list.join(",\n"),
        source
    );

    let mut header = format!(
        "CREATE OR REPLACE {} {}",
        object_type.sql_keyword(),
        render_qualified(&[target_db, target_schema, target_object])
    );
    if object_type == ObjectType::DynamicTable {
        if let Some(config) = dynamic_table {
            if let Some(lag) = config.target_lag.as_deref() {
                header.push_str(&format!(" TARGET_LAG = {}", string_literal(lag)));
            }
            if let Some(warehouse) = config.warehouse.as_deref() {
                header.push_str(&format!(" WAREHOUSE = {}", render_ident(warehouse)));
            }
        }
    }

    let statement = format!("{header} AS\n{select};");
    log::debug!(
        "Generated {} preview for mapping {}",
        object_type,
        mapping.mapping_id
    );

    Ok(PreviewSql {
        object_type,
        statement,
        select,
    })
}

/// One entry of the select list.
fn select_item(column: &ColumnMapping, translations: &[ValueTranslation]) -> String {
    let source = render_ident(column.source_column.trim());
    let target = render_ident(column.effective_target());

    let rules: Vec<&ValueTranslation> = match &column.mapping_column_id {
        Some(id) => translations
            .iter()
            .filter(|t| &t.mapping_column_id == id)
            .collect(),
        None => Vec::new(),
    };
    if rules.is_empty() {
        return format!("{source} AS {target}");
    }

    let mut case = String::from("CASE\n");
    for rule in rules {
        case.push_str(&format!(
            "    WHEN {source} = {} THEN {}\n",
            string_literal(&rule.from_value),
            string_literal(&rule.to_value)
        ));
    }
    case.push_str(&format!("    ELSE {source}\nEND AS {target}"));
    case
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;
