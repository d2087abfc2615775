//! CSV grids edited outside the CLI.
//!
//! An exported employee grid is written twice: the file the user edits and
//! a `<file>.snapshot` copy that `save` diffs against. Grids always carry a
//! header row, even when empty, so rows can be added in any editor.

use anyhow::{Context, Result};
use em_core::{ColumnMapping, EmployeeRow, MappingColumnId, ValueTranslation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const COLUMN_GRID_HEADERS: &[&str] = &[
    "MAPPING_COLUMN_ID",
    "IS_MAPPED",
    "SOURCECOLUMN",
    "TARGETCOLUMN",
    "DESCRIPTION",
];

pub(crate) const TRANSLATION_GRID_HEADERS: &[&str] = &["MAPPING_COLUMN_ID", "FROMVALUE", "TOVALUE"];

/// One edited translation row; the owning column comes from the command.
#[derive(Debug, Clone, Deserialize)]
struct TranslationRecord {
    #[serde(rename = "FROMVALUE", default)]
    from_value: String,
    #[serde(rename = "TOVALUE", default)]
    to_value: String,
}

/// Path of the snapshot written next to an exported grid.
pub(crate) fn snapshot_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".snapshot");
    PathBuf::from(name)
}

/// Write rows as CSV with an explicit header row.
pub(crate) fn write_grid<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(headers)?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Read every row of a CSV grid.
pub(crate) fn read_grid<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(idx, row)| row.with_context(|| format!("{}: bad row {}", path.display(), idx + 1)))
        .collect()
}

pub(crate) fn write_employees(path: &Path, rows: &[EmployeeRow]) -> Result<()> {
    write_grid(path, em_core::employee::EMPLOYEE_COLUMNS, rows)
}

/// Write an employee grid together with its snapshot.
pub(crate) fn export_employees(path: &Path, rows: &[EmployeeRow]) -> Result<()> {
    write_employees(path, rows)?;
    write_employees(&snapshot_path(path), rows)
}

/// Read an edited employee grid and the snapshot it was exported with.
pub(crate) fn read_employees(path: &Path) -> Result<(Vec<EmployeeRow>, Vec<EmployeeRow>)> {
    let snapshot = snapshot_path(path);
    if !snapshot.exists() {
        anyhow::bail!(
            "Snapshot {} not found. Run `em employees export {}` before editing.",
            snapshot.display(),
            path.display()
        );
    }
    let original = read_grid(&snapshot)?;
    let edited = read_grid(path)?;
    Ok((original, edited))
}

pub(crate) fn write_columns(path: &Path, rows: &[ColumnMapping]) -> Result<()> {
    write_grid(path, COLUMN_GRID_HEADERS, rows)
}

pub(crate) fn read_columns(path: &Path) -> Result<Vec<ColumnMapping>> {
    read_grid(path)
}

pub(crate) fn write_translations(path: &Path, rows: &[ValueTranslation]) -> Result<()> {
    write_grid(path, TRANSLATION_GRID_HEADERS, rows)
}

/// Read edited translations, assigning them to `column`.
pub(crate) fn read_translations(path: &Path, column: &MappingColumnId) -> Result<Vec<ValueTranslation>> {
    let records: Vec<TranslationRecord> = read_grid(path)?;
    Ok(records
        .into_iter()
        .map(|r| ValueTranslation {
            mapping_column_id: column.clone(),
            from_value: r.from_value,
            to_value: r.to_value,
        })
        .collect())
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod tests;
