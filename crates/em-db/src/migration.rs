//! Schema migration runner for the local warehouse.
//!
//! Tracks applied migration versions in `EDACONFIG.SCHEMA_VERSION` and runs
//! any unapplied migrations on open.

use crate::ddl::MIGRATIONS;
use crate::error::{DbError, DbResult};
use duckdb::Connection;

/// Ensure the `EDACONFIG` schema and `SCHEMA_VERSION` table exist.
fn ensure_version_table(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "CREATE SCHEMA IF NOT EXISTS EDACONFIG;
         CREATE TABLE IF NOT EXISTS EDACONFIG.SCHEMA_VERSION (
             VERSION    INTEGER NOT NULL,
             APPLIED_AT TIMESTAMP NOT NULL DEFAULT now()
         );",
    )
    .map_err(|e| DbError::MigrationError(format!("failed to create SCHEMA_VERSION: {e}")))
}

/// Highest applied migration version, or 0 if none.
pub fn current_version(conn: &Connection) -> DbResult<i32> {
    conn.query_row(
        "SELECT COALESCE(MAX(VERSION), 0) FROM EDACONFIG.SCHEMA_VERSION",
        [],
        |row| row.get(0),
    )
    .map_err(|e| DbError::MigrationError(format!("failed to read schema version: {e}")))
}

/// Run all unapplied migrations against `conn`.
///
/// Each migration and its version record run in one transaction.
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    ensure_version_table(conn)?;
    let current = current_version(conn)?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        log::debug!("Applying warehouse migration v{:03}", migration.version);

        let script = format!(
            "BEGIN TRANSACTION;\n{}\nINSERT INTO EDACONFIG.SCHEMA_VERSION (VERSION) VALUES ({});\nCOMMIT;",
            migration.sql, migration.version
        );
        if let Err(e) = conn.execute_batch(&script) {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(DbError::MigrationError(format!(
                "migration v{:03} failed: {e}",
                migration.version
            )));
        }
    }
    Ok(())
}
