//! Versioned employee write-back.
//!
//! Saving an edited grid validates it, diffs it against the snapshot it was
//! exported from and applies the result in one transaction:
//!
//! 1. deleted rows are archived,
//! 2. updated rows are retired and succeeded by version + 1,
//! 3. new rows are inserted as version 1.
//!
//! Every retire matches the snapshot's `VERSION_NUMBER`. A row that changed
//! underneath the editor affects nothing and aborts the save with
//! [`WriteError::Conflict`].

use crate::error::DbError;
use crate::traits::Database;
use em_core::{diff_rows, validate_rows, Diffable, EmployeeId, EmployeeRow, RowDiff, RowError, Statement};
use em_sql::writeback::{archive, insert_version, retire};
use thiserror::Error;

/// Rows written by a save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteCounts {
    pub deleted: usize,
    pub updated: usize,
    pub inserted: usize,
}

impl WriteCounts {
    /// True when the save wrote nothing.
    pub fn is_empty(&self) -> bool {
        self.deleted + self.updated + self.inserted == 0
    }
}

/// Write-back errors
#[derive(Error, Debug)]
pub enum WriteError {
    /// W001: The grid failed validation
    #[error("[W001] {} validation error(s):\n{}", .0.len(), render_row_errors(.0))]
    Validation(Vec<RowError>),

    /// W002: Edited rows carry ids that are not in the snapshot
    #[error("[W002] Unknown EMPLOYEE_ID(s) in editor: {}", .0.join(", "))]
    UnknownIdentities(Vec<String>),

    /// W003: The current version no longer matches the snapshot
    #[error("[W003] Employee {employee_id} changed since it was loaded; reload and retry")]
    Conflict { employee_id: String },

    /// W004: Archive requested for a row that was never saved
    #[error("[W004] '{label}' has not been saved yet")]
    NotPersisted { label: String },

    /// W005: Warehouse failure; the transaction was rolled back
    #[error("[W005] {0}")]
    Db(#[from] DbError),
}

fn render_row_errors(errors: &[RowError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Persist an edited employee grid.
///
/// `original` is the snapshot the grid was exported from. Blank new rows are
/// ignored. On any error the warehouse is left unchanged.
pub async fn save_employees(
    db: &dyn Database,
    original: &[EmployeeRow],
    edited: &[EmployeeRow],
    actor: &str,
) -> Result<WriteCounts, WriteError> {
    let errors = validate_rows(edited);
    if !errors.is_empty() {
        return Err(WriteError::Validation(errors));
    }

    let edited: Vec<EmployeeRow> = edited
        .iter()
        .filter(|row| row.identity().is_some() || row.has_content())
        .cloned()
        .collect();

    let diff = diff_rows(original, &edited);
    if !diff.unmatched.is_empty() {
        let ids = diff
            .unmatched
            .iter()
            .filter_map(|r| r.employee_id.as_ref())
            .map(|id| id.to_string())
            .collect();
        return Err(WriteError::UnknownIdentities(ids));
    }
    if diff.is_empty() {
        log::info!("No employee changes to save");
        return Ok(WriteCounts::default());
    }

    db.begin().await?;
    match apply_diff(db, &diff, actor).await {
        Ok(counts) => {
            db.commit().await?;
            log::info!(
                "Saved employees: {} deleted, {} updated, {} inserted",
                counts.deleted,
                counts.updated,
                counts.inserted
            );
            Ok(counts)
        }
        Err(e) => {
            if let Err(rollback_err) = db.rollback().await {
                log::warn!("Rollback failed: {rollback_err}");
            }
            Err(e)
        }
    }
}

async fn apply_diff(
    db: &dyn Database,
    diff: &RowDiff<EmployeeRow>,
    actor: &str,
) -> Result<WriteCounts, WriteError> {
    let mut counts = WriteCounts::default();

    for row in &diff.deletes {
        let id = persisted_id(row)?;
        expect_one(db, &archive(id, row.version_number, actor), id).await?;
        counts.deleted += 1;
    }

    for update in &diff.updates {
        let id = persisted_id(&update.before)?;
        expect_one(db, &retire(id, update.before.version_number, actor), id).await?;

        let uid = update.before.employee_uid.trim();
        let uid = if uid.is_empty() {
            log::warn!("Employee {id} has no EMPLOYEE_UID; its new version starts a new identity");
            None
        } else {
            Some(uid)
        };
        let next_version = update.before.version_number + 1;
        db.execute(&insert_version(&update.after, uid, next_version, actor))
            .await?;
        counts.updated += 1;
    }

    for row in &diff.inserts {
        db.execute(&insert_version(row, None, 1, actor)).await?;
        counts.inserted += 1;
    }

    Ok(counts)
}

fn persisted_id(row: &EmployeeRow) -> Result<&EmployeeId, WriteError> {
    row.employee_id
        .as_ref()
        .ok_or_else(|| WriteError::NotPersisted { label: row.label() })
}

async fn expect_one(db: &dyn Database, stmt: &Statement, id: &EmployeeId) -> Result<(), WriteError> {
    match db.execute(stmt).await? {
        0 => Err(WriteError::Conflict {
            employee_id: id.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Archive one employee ("Delete selected").
pub async fn archive_employee(
    db: &dyn Database,
    row: &EmployeeRow,
    actor: &str,
) -> Result<(), WriteError> {
    let id = persisted_id(row)?;
    expect_one(db, &archive(id, row.version_number, actor), id).await?;
    log::info!("Archived employee {id}");
    Ok(())
}
