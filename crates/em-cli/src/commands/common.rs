//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use em_core::{MappingColumnId, MappingId, SessionState};
use serde::Serialize;
use std::fmt;

use crate::cli::{ColumnSelector, MappingSelector};

/// Widest bar drawn by [`bar_chart`].
const MAX_BAR_WIDTH: usize = 40;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run before the process ends.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; details were already printed
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Calculate column widths for a table.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Render a left-aligned table: header, dashed separator, rows.
///
/// Columns are separated by two spaces and trailing padding is trimmed.
pub(crate) fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = calculate_column_widths(headers, rows);
    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![
        line(headers.iter().map(|h| h.to_string()).collect()),
        line(widths.iter().map(|&w| "-".repeat(w)).collect()),
    ];
    lines.extend(rows.iter().map(|row| line(row.clone())));
    lines.join("\n")
}

/// Print a formatted table to stdout.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", format_table(headers, rows));
}

/// Print a value as pretty JSON to stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Render `(label, count)` pairs as a horizontal text bar chart.
///
/// Bars are scaled so the largest count spans the full width; every
/// non-zero count gets at least one block.
pub(crate) fn bar_chart(title: &str, items: &[(String, usize)]) -> String {
    let mut out = format!("{title}\n");
    if items.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    let label_width = items
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = items.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);

    for (label, count) in items {
        let width = (count * MAX_BAR_WIDTH).div_ceil(max);
        out.push_str(&format!(
            "  {label:<label_width$}  {} {count}\n",
            "█".repeat(width)
        ));
    }
    out
}

/// Optional text cell for tables.
pub(crate) fn cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Mapping id from `--mapping` or the session.
pub(crate) fn resolve_mapping(selector: &MappingSelector, session: &SessionState) -> Result<MappingId> {
    if let Some(raw) = &selector.mapping_id {
        return MappingId::try_new(raw.as_str()).context("Mapping id must not be empty");
    }
    session.mapping.clone().context(
        "No mapping selected. Run `em select mapping <ID>` or `em mapping create`, or pass --mapping",
    )
}

/// Column mapping id from `--column` or the session.
pub(crate) fn resolve_column(
    selector: &ColumnSelector,
    session: &SessionState,
) -> Result<MappingColumnId> {
    if let Some(raw) = &selector.column_id {
        return MappingColumnId::try_new(raw.as_str()).context("Column id must not be empty");
    }
    session
        .column
        .clone()
        .context("No column selected. Run `em select column <ID>` or pass --column")
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
