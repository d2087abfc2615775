//! Catalog lookups: projects, systems, databases, schemas, tables.
//!
//! Every lookup returns an empty vector when nothing matches.

use crate::error::{DbError, DbResult};
use crate::rows::RowSet;
use crate::traits::Database;
use em_core::{
    DatabaseId, Project, SchemaId, SourceDatabase, SourceSchema, SourceSystem, SourceTable,
    Statement, SystemId, TableId, TableRef,
};

/// Ids of the database and schema that own a source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLocation {
    pub database_id: DatabaseId,
    pub schema_id: SchemaId,
    pub table: TableRef,
}

pub async fn projects(db: &dyn Database) -> DbResult<Vec<Project>> {
    let rows = db
        .query(&Statement::raw(
            "SELECT ID, NAME, DESCRIPTION FROM EDACONFIG.ST_EDA_VW_PROJECTS ORDER BY NAME, ID",
        ))
        .await?;
    rows.iter()
        .map(|row| -> DbResult<Project> {
            Ok(Project {
                id: row.parse("ID")?,
                name: row.text("NAME"),
                description: row.opt_text("DESCRIPTION"),
            })
        })
        .collect()
}

pub async fn systems(db: &dyn Database) -> DbResult<Vec<SourceSystem>> {
    let rows = db
        .query(&Statement::raw(
            "SELECT ID, NAME, DESCRIPTION FROM EDACONFIG.ST_EDA_VW_SYSTEMS ORDER BY NAME, ID",
        ))
        .await?;
    rows.iter()
        .map(|row| -> DbResult<SourceSystem> {
            Ok(SourceSystem {
                id: row.parse("ID")?,
                name: row.text("NAME"),
                description: row.opt_text("DESCRIPTION"),
            })
        })
        .collect()
}

/// Databases of one source system.
pub async fn databases(db: &dyn Database, system_id: &SystemId) -> DbResult<Vec<SourceDatabase>> {
    let rows = db
        .query(&Statement::new(
            "SELECT ID, SYSTEM_ID, NAME FROM EDACONFIG.ST_EDA_VW_DATABASES \
             WHERE SYSTEM_ID = ? ORDER BY NAME, ID",
            vec![system_id.as_str().into()],
        ))
        .await?;
    rows.iter()
        .map(|row| -> DbResult<SourceDatabase> {
            Ok(SourceDatabase {
                id: row.parse("ID")?,
                system_id: row.parse("SYSTEM_ID")?,
                name: row.text("NAME"),
            })
        })
        .collect()
}

/// Schemas of one source database.
pub async fn schemas(db: &dyn Database, database_id: &DatabaseId) -> DbResult<Vec<SourceSchema>> {
    let rows = db
        .query(&Statement::new(
            "SELECT SCHEMA_ID, DATABASE_ID, NAME FROM EDACONFIG.SCHEMAS \
             WHERE DATABASE_ID = ? ORDER BY NAME, SCHEMA_ID",
            vec![database_id.as_str().into()],
        ))
        .await?;
    rows.iter()
        .map(|row| -> DbResult<SourceSchema> {
            Ok(SourceSchema {
                schema_id: row.parse("SCHEMA_ID")?,
                database_id: row.parse("DATABASE_ID")?,
                name: row.text("NAME"),
            })
        })
        .collect()
}

/// Tables of one source schema.
pub async fn tables(db: &dyn Database, schema_id: &SchemaId) -> DbResult<Vec<SourceTable>> {
    let rows = db
        .query(&Statement::new(
            "SELECT ID, SCHEMA_ID, NAME FROM EDACONFIG.ST_EDA_VW_GET_TABLES \
             WHERE SCHEMA_ID = ? ORDER BY NAME, ID",
            vec![schema_id.as_str().into()],
        ))
        .await?;
    rows.iter()
        .map(|row| -> DbResult<SourceTable> {
            Ok(SourceTable {
                id: row.parse("ID")?,
                schema_id: row.parse("SCHEMA_ID")?,
                name: row.text("NAME"),
            })
        })
        .collect()
}

/// Resolve `db.schema.table` and the owning ids of a source table.
///
/// Returns `None` when the table id is unknown.
pub async fn locate_table(db: &dyn Database, table_id: &TableId) -> DbResult<Option<TableLocation>> {
    let rows = db
        .query(&Statement::new(
            "SELECT D.DATABASE_ID, S.SCHEMA_ID, D.NAME AS DATABASE_NAME, \
             S.NAME AS SCHEMA_NAME, T.NAME AS TABLE_NAME \
             FROM EDACONFIG.TABLES T \
             JOIN EDACONFIG.SCHEMAS S ON S.SCHEMA_ID = T.SCHEMA_ID \
             JOIN EDACONFIG.DATABASES D ON D.DATABASE_ID = S.DATABASE_ID \
             WHERE T.TABLE_ID = ?",
            vec![table_id.as_str().into()],
        ))
        .await?;
    single_location(&rows, table_id)
}

fn single_location(rows: &RowSet, table_id: &TableId) -> DbResult<Option<TableLocation>> {
    if rows.len() > 1 {
        return Err(DbError::UnexpectedRow {
            query: "locate_table".to_string(),
            message: format!("table {table_id} resolves to {} locations", rows.len()),
        });
    }
    rows.first()
        .map(|row| -> DbResult<TableLocation> {
            Ok(TableLocation {
                database_id: row.parse("DATABASE_ID")?,
                schema_id: row.parse("SCHEMA_ID")?,
                table: TableRef::new(
                    row.text("DATABASE_NAME"),
                    row.text("SCHEMA_NAME"),
                    row.text("TABLE_NAME"),
                ),
            })
        })
        .transpose()
}

/// Source table reference for SQL generation.
pub async fn resolve_table_ref(db: &dyn Database, table_id: &TableId) -> DbResult<Option<TableRef>> {
    Ok(locate_table(db, table_id).await?.map(|loc| loc.table))
}
