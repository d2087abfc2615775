//! Mapping persistence: mapping masters, column mappings, value translations.
//!
//! Writes go through [`MappingProcedure`], which issues stored procedure
//! calls on Snowflake and equivalent DML on DuckDB. Multi-statement saves
//! run inside one transaction.

use crate::catalog_store::{locate_table, resolve_table_ref};
use crate::error::{DbError, DbResult};
use crate::rows::Row;
use crate::traits::Database;
use em_core::config::DynamicTableConfig;
use em_core::{
    plan_column_changes, ColumnChange, ColumnMapping, Mapping, MappingColumnId, MappingId,
    ObjectType, ProjectId, SqlValue, Statement, TableId, ValueTranslation,
};
use em_sql::procedure::replace_translations;
use em_sql::{generate_preview, MappingProcedure, PreviewSql};
use std::collections::HashSet;

const MAPPING_COLUMNS: &str = "MAPPING_ID, PROJECT_ID, SOURCE_TABLE_ID, SOURCE, \
     TARGETDB, TARGETSCHEMA, TARGETOBJECT, TARGETTYPE";

/// Number of column mappings written by a save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnSaveCounts {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

/// Failure to build a preview: the warehouse lookup or the generation itself.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Generate(#[from] em_sql::GenerateError),
}

/// New target fields for a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTarget {
    pub database: String,
    pub schema: String,
    pub object: String,
    pub object_type: ObjectType,
}

fn mapping_from_row(row: Row<'_>) -> DbResult<Mapping> {
    let target_type = match row.opt_text("TARGETTYPE") {
        Some(raw) => match raw.parse() {
            Ok(object_type) => Some(object_type),
            Err(e) => {
                log::warn!("Ignoring target type of mapping {}: {e}", row.text("MAPPING_ID"));
                None
            }
        },
        None => None,
    };
    Ok(Mapping {
        mapping_id: row.parse("MAPPING_ID")?,
        project_id: row.parse("PROJECT_ID")?,
        source_table_id: row.parse("SOURCE_TABLE_ID")?,
        source: row.opt_text("SOURCE"),
        target_db: row.opt_text("TARGETDB"),
        target_schema: row.opt_text("TARGETSCHEMA"),
        target_object: row.opt_text("TARGETOBJECT"),
        target_type,
    })
}

/// Mappings of a project, optionally narrowed to one source table.
pub async fn list_mappings(
    db: &dyn Database,
    project_id: &ProjectId,
    table_id: Option<&TableId>,
) -> DbResult<Vec<Mapping>> {
    let mut sql = format!(
        "SELECT {MAPPING_COLUMNS} FROM EDACONFIG.ST_EDA_VW_MAPPING_MASTER WHERE PROJECT_ID = ?"
    );
    let mut params: Vec<SqlValue> = vec![project_id.as_str().into()];
    if let Some(table_id) = table_id {
        sql.push_str(" AND SOURCE_TABLE_ID = ?");
        params.push(table_id.as_str().into());
    }
    sql.push_str(" ORDER BY MAPPING_ID");

    let rows = db.query(&Statement::new(sql, params)).await?;
    rows.iter().map(mapping_from_row).collect()
}

pub async fn get_mapping(db: &dyn Database, mapping_id: &MappingId) -> DbResult<Option<Mapping>> {
    let rows = db
        .query(&Statement::new(
            format!(
                "SELECT {MAPPING_COLUMNS} FROM EDACONFIG.ST_EDA_VW_MAPPING_MASTER \
                 WHERE MAPPING_ID = ?"
            ),
            vec![mapping_id.as_str().into()],
        ))
        .await?;
    rows.first().map(mapping_from_row).transpose()
}

async fn require_mapping(db: &dyn Database, mapping_id: &MappingId) -> DbResult<Mapping> {
    get_mapping(db, mapping_id)
        .await?
        .ok_or_else(|| DbError::NotFound {
            kind: "Mapping",
            id: mapping_id.to_string(),
        })
}

/// Run every statement of a procedure, returning the rows of the last one
/// when the procedure yields an id.
async fn run_procedure(db: &dyn Database, procedure: &MappingProcedure) -> DbResult<Option<String>> {
    log::debug!("Running {}", procedure.name());
    let mut returned = None;
    for stmt in procedure.statements(db.db_type()) {
        if procedure.returns_id() {
            let rows = db.query(&stmt).await?;
            returned = rows
                .rows
                .first()
                .and_then(|cells| cells.first())
                .map(SqlValue::as_text);
        } else {
            db.execute(&stmt).await?;
        }
    }
    Ok(returned)
}

/// Create a mapping for a source table and return its id.
pub async fn create_mapping(
    db: &dyn Database,
    project_id: &ProjectId,
    table_id: &TableId,
) -> DbResult<MappingId> {
    let location = locate_table(db, table_id)
        .await?
        .ok_or_else(|| DbError::NotFound {
            kind: "Table",
            id: table_id.to_string(),
        })?;

    let procedure = MappingProcedure::CreateMappingMaster {
        project_id: project_id.clone(),
        table_id: table_id.clone(),
        database_id: location.database_id,
        schema_id: location.schema_id,
    };
    let returned = run_procedure(db, &procedure).await?;
    let mapping_id = returned
        .and_then(MappingId::try_new)
        .ok_or_else(|| DbError::UnexpectedRow {
            query: procedure.name().to_string(),
            message: "no mapping id returned".to_string(),
        })?;
    log::info!("Created mapping {mapping_id} for {}", location.table);
    Ok(mapping_id)
}

/// Save the target fields of a mapping.
pub async fn set_target(
    db: &dyn Database,
    mapping_id: &MappingId,
    target: &MappingTarget,
) -> DbResult<()> {
    require_mapping(db, mapping_id).await?;
    let procedure = MappingProcedure::UpdateMappingMaster {
        mapping_id: mapping_id.clone(),
        target_db: target.database.clone(),
        target_schema: target.schema.clone(),
        target_object: target.object.clone(),
        target_type: target.object_type,
    };
    run_procedure(db, &procedure).await?;
    Ok(())
}

/// Column-mapping grid: every source column of the mapped table, with the
/// saved mapping (if any) merged in.
pub async fn column_grid(db: &dyn Database, mapping_id: &MappingId) -> DbResult<Vec<ColumnMapping>> {
    let rows = db
        .query(&Statement::new(
            "SELECT MAPPING_COLUMN_ID, IS_MAPPED, SOURCECOLUMN, TARGETCOLUMN, DESCRIPTION \
             FROM EDACONFIG.ST_EDA_GET_COLUMN_MAPPING \
             WHERE MAPPING_ID = ? ORDER BY ORDINAL, SOURCECOLUMN",
            vec![mapping_id.as_str().into()],
        ))
        .await?;
    Ok(rows
        .iter()
        .map(|row| ColumnMapping {
            mapping_column_id: row.parse_opt("MAPPING_COLUMN_ID"),
            is_mapped: row.flag("IS_MAPPED", false),
            source_column: row.text("SOURCECOLUMN"),
            target_column: row.text("TARGETCOLUMN"),
            description: row.text("DESCRIPTION"),
        })
        .collect())
}

async fn run_in_transaction(db: &dyn Database, procedures: &[MappingProcedure]) -> DbResult<()> {
    db.begin().await?;
    for procedure in procedures {
        if let Err(e) = run_procedure(db, procedure).await {
            if let Err(rollback_err) = db.rollback().await {
                log::warn!("Rollback failed: {rollback_err}");
            }
            return Err(e);
        }
    }
    db.commit().await
}

/// Persist an edited column-mapping grid.
pub async fn save_columns(
    db: &dyn Database,
    mapping_id: &MappingId,
    rows: &[ColumnMapping],
) -> DbResult<ColumnSaveCounts> {
    require_mapping(db, mapping_id).await?;

    let owned: HashSet<MappingColumnId> = column_grid(db, mapping_id)
        .await?
        .into_iter()
        .filter_map(|c| c.mapping_column_id)
        .collect();
    if let Some(foreign) = rows
        .iter()
        .filter_map(|r| r.mapping_column_id.as_ref())
        .find(|id| !owned.contains(*id))
    {
        return Err(DbError::ForeignMappingColumn {
            mapping_column_id: foreign.to_string(),
            mapping_id: mapping_id.to_string(),
        });
    }

    let changes = plan_column_changes(mapping_id, rows);
    let mut counts = ColumnSaveCounts::default();
    for change in &changes {
        match change {
            ColumnChange::Insert { .. } => counts.inserted += 1,
            ColumnChange::Update { .. } => counts.updated += 1,
            ColumnChange::Delete { .. } => counts.deleted += 1,
        }
    }
    if changes.is_empty() {
        return Ok(counts);
    }

    let procedures: Vec<MappingProcedure> = changes.into_iter().map(Into::into).collect();
    run_in_transaction(db, &procedures).await?;
    log::info!(
        "Saved columns of mapping {mapping_id}: {} inserted, {} updated, {} deleted",
        counts.inserted,
        counts.updated,
        counts.deleted
    );
    Ok(counts)
}

fn translation_from_row(row: Row<'_>) -> DbResult<ValueTranslation> {
    Ok(ValueTranslation {
        mapping_column_id: row.parse("MAPPING_COLUMN_ID")?,
        from_value: row.text("FROMVALUE"),
        to_value: row.text("TOVALUE"),
    })
}

/// Value translations of one column mapping, in insertion order.
pub async fn column_translations(
    db: &dyn Database,
    mapping_column_id: &MappingColumnId,
) -> DbResult<Vec<ValueTranslation>> {
    let rows = db
        .query(&Statement::new(
            "SELECT MAPPING_COLUMN_ID, FROMVALUE, TOVALUE \
             FROM EDACONFIG.ST_EDA_GET_TRANSLATION_VALUES \
             WHERE MAPPING_COLUMN_ID = ? ORDER BY TRANSLATION_ID",
            vec![mapping_column_id.as_str().into()],
        ))
        .await?;
    rows.iter().map(translation_from_row).collect()
}

/// Value translations of every column of a mapping, in insertion order.
pub async fn mapping_translations(
    db: &dyn Database,
    mapping_id: &MappingId,
) -> DbResult<Vec<ValueTranslation>> {
    let rows = db
        .query(&Statement::new(
            "SELECT MAPPING_COLUMN_ID, FROMVALUE, TOVALUE \
             FROM EDACONFIG.ST_EDA_GET_TRANSLATION_VALUES \
             WHERE MAPPING_ID = ? ORDER BY TRANSLATION_ID",
            vec![mapping_id.as_str().into()],
        ))
        .await?;
    rows.iter().map(translation_from_row).collect()
}

async fn require_mapping_column(db: &dyn Database, mapping_column_id: &MappingColumnId) -> DbResult<()> {
    let rows = db
        .query(&Statement::new(
            "SELECT MAPPING_COLUMN_ID FROM EDACONFIG.MAPPING_COLUMN WHERE MAPPING_COLUMN_ID = ?",
            vec![mapping_column_id.as_str().into()],
        ))
        .await?;
    if rows.is_empty() {
        return Err(DbError::NotFound {
            kind: "Mapping column",
            id: mapping_column_id.to_string(),
        });
    }
    Ok(())
}

/// Replace the translation set of a column mapping.
///
/// Rows with a blank from-value are dropped. Returns the number of
/// translations stored.
pub async fn save_translations(
    db: &dyn Database,
    mapping_column_id: &MappingColumnId,
    translations: &[ValueTranslation],
) -> DbResult<usize> {
    require_mapping_column(db, mapping_column_id).await?;

    let kept: Vec<ValueTranslation> = translations
        .iter()
        .filter(|t| !t.from_value.trim().is_empty())
        .cloned()
        .collect();

    db.begin().await?;
    for stmt in replace_translations(mapping_column_id, &kept) {
        if let Err(e) = db.execute(&stmt).await {
            if let Err(rollback_err) = db.rollback().await {
                log::warn!("Rollback failed: {rollback_err}");
            }
            return Err(e);
        }
    }
    db.commit().await?;

    log::info!(
        "Saved {} translation(s) for column mapping {mapping_column_id}",
        kept.len()
    );
    Ok(kept.len())
}

/// Generate the preview SQL of a saved mapping.
pub async fn preview(
    db: &dyn Database,
    mapping_id: &MappingId,
    dynamic_table: Option<&DynamicTableConfig>,
) -> Result<PreviewSql, PreviewError> {
    let mapping = require_mapping(db, mapping_id).await?;
    let source = resolve_table_ref(db, &mapping.source_table_id)
        .await?
        .ok_or_else(|| DbError::NotFound {
            kind: "Table",
            id: mapping.source_table_id.to_string(),
        })?;
    let columns = column_grid(db, mapping_id).await?;
    let translations = mapping_translations(db, mapping_id).await?;

    Ok(generate_preview(
        &mapping,
        &columns,
        &translations,
        &source,
        dynamic_table,
    )?)
}
