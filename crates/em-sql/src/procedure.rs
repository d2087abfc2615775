//! Mapping maintenance procedures.
//!
//! Snowflake exposes these as stored procedures in `EDACONFIG`. The local
//! DuckDB warehouse has no procedures, so the same operations are emitted as
//! plain DML against the underlying tables.

use em_core::{
    ColumnChange, DatabaseId, DbType, MappingColumnId, MappingId, ObjectType, ProjectId, SchemaId,
    SqlValue, Statement, TableId, ValueTranslation,
};

/// A mapping procedure call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingProcedure {
    CreateMappingMaster {
        project_id: ProjectId,
        table_id: TableId,
        database_id: DatabaseId,
        schema_id: SchemaId,
    },
    UpdateMappingMaster {
        mapping_id: MappingId,
        target_db: String,
        target_schema: String,
        target_object: String,
        target_type: ObjectType,
    },
    InsertMappingColumn {
        mapping_id: MappingId,
        source_column: String,
        target_column: String,
        description: String,
    },
    UpdateMappingColumn {
        mapping_id: MappingId,
        mapping_column_id: MappingColumnId,
        target_column: String,
        description: String,
    },
    DeleteMappingColumn {
        mapping_id: MappingId,
        mapping_column_id: MappingColumnId,
    },
}

impl From<ColumnChange> for MappingProcedure {
    fn from(change: ColumnChange) -> Self {
        match change {
            ColumnChange::Insert {
                mapping_id,
                source_column,
                target_column,
                description,
            } => MappingProcedure::InsertMappingColumn {
                mapping_id,
                source_column,
                target_column,
                description,
            },
            ColumnChange::Update {
                mapping_id,
                mapping_column_id,
                target_column,
                description,
            } => MappingProcedure::UpdateMappingColumn {
                mapping_id,
                mapping_column_id,
                target_column,
                description,
            },
            ColumnChange::Delete {
                mapping_id,
                mapping_column_id,
            } => MappingProcedure::DeleteMappingColumn {
                mapping_id,
                mapping_column_id,
            },
        }
    }
}

impl MappingProcedure {
    /// Procedure name in `EDACONFIG`.
    pub fn name(&self) -> &'static str {
        match self {
            MappingProcedure::CreateMappingMaster { .. } => "CREATE_MAPPING_MASTER",
            MappingProcedure::UpdateMappingMaster { .. } => "UPDATE_MAPPING_MASTER",
            MappingProcedure::InsertMappingColumn { .. } => "INSERT_MAPPING_COLUMN",
            MappingProcedure::UpdateMappingColumn { .. } => "UPDATE_MAPPING_COLUMN",
            MappingProcedure::DeleteMappingColumn { .. } => "DELETE_MAPPING_COLUMN",
        }
    }

    /// Procedure arguments, in call order.
    ///
    /// Column updates and deletes are keyed by the column id alone; the
    /// owning mapping is only added to the DuckDB DML.
    pub fn args(&self) -> Vec<SqlValue> {
        match self {
            MappingProcedure::CreateMappingMaster {
                project_id,
                table_id,
                database_id,
                schema_id,
            } => vec![
                project_id.as_str().into(),
                table_id.as_str().into(),
                database_id.as_str().into(),
                schema_id.as_str().into(),
            ],
            MappingProcedure::UpdateMappingMaster {
                mapping_id,
                target_db,
                target_schema,
                target_object,
                target_type,
            } => vec![
                mapping_id.as_str().into(),
                target_db.trim().into(),
                target_schema.trim().into(),
                target_object.trim().into(),
                target_type.sql_keyword().into(),
            ],
            MappingProcedure::InsertMappingColumn {
                mapping_id,
                source_column,
                target_column,
                description,
            } => vec![
                mapping_id.as_str().into(),
                source_column.trim().into(),
                target_column.trim().into(),
                description.trim().into(),
            ],
            MappingProcedure::UpdateMappingColumn {
                mapping_column_id,
                target_column,
                description,
                ..
            } => vec![
                mapping_column_id.as_str().into(),
                target_column.trim().into(),
                description.trim().into(),
            ],
            MappingProcedure::DeleteMappingColumn {
                mapping_column_id, ..
            } => vec![mapping_column_id.as_str().into()],
        }
    }

    /// Whether the call yields a row (the new mapping id).
    pub fn returns_id(&self) -> bool {
        matches!(self, MappingProcedure::CreateMappingMaster { .. })
    }

    /// Statements implementing the procedure on `db_type`, in order.
    pub fn statements(&self, db_type: DbType) -> Vec<Statement> {
        match db_type {
            DbType::Snowflake => vec![self.call()],
            DbType::DuckDb => self.dml(),
        }
    }

    fn call(&self) -> Statement {
        let args = self.args();
        let placeholders = vec!["?"; args.len()].join(", ");
        Statement::new(
            format!("CALL EDACONFIG.{}({placeholders})", self.name()),
            args,
        )
    }

    fn dml(&self) -> Vec<Statement> {
        let args = self.args();
        match self {
            MappingProcedure::CreateMappingMaster { .. } => vec![Statement::new(
                "INSERT INTO EDACONFIG.MAPPING_MASTER \
                 (PROJECT_ID, SOURCE_TABLE_ID, SOURCE_DATABASE_ID, SOURCE_SCHEMA_ID) \
                 VALUES (?, ?, ?, ?) RETURNING MAPPING_ID",
                args,
            )],
            MappingProcedure::UpdateMappingMaster { .. } => {
                let mut args = args;
                let mapping_id = args.remove(0);
                args.push(mapping_id);
                vec![Statement::new(
                    "UPDATE EDACONFIG.MAPPING_MASTER \
                     SET TARGETDB = ?, TARGETSCHEMA = ?, TARGETOBJECT = ?, TARGETTYPE = ? \
                     WHERE MAPPING_ID = ?",
                    args,
                )]
            }
            MappingProcedure::InsertMappingColumn { .. } => vec![Statement::new(
                "INSERT INTO EDACONFIG.MAPPING_COLUMN \
                 (MAPPING_ID, SOURCECOLUMN, TARGETCOLUMN, DESCRIPTION) VALUES (?, ?, ?, ?)",
                args,
            )],
            MappingProcedure::UpdateMappingColumn { mapping_id, .. } => {
                let mut args = args;
                let mapping_column_id = args.remove(0);
                args.push(mapping_column_id);
                args.push(mapping_id.as_str().into());
                vec![Statement::new(
                    "UPDATE EDACONFIG.MAPPING_COLUMN SET TARGETCOLUMN = ?, DESCRIPTION = ? \
                     WHERE MAPPING_COLUMN_ID = ? AND MAPPING_ID = ?",
                    args,
                )]
            }
            MappingProcedure::DeleteMappingColumn {
                mapping_id,
                mapping_column_id,
            } => {
                let keys: Vec<SqlValue> = vec![
                    mapping_column_id.as_str().into(),
                    mapping_id.as_str().into(),
                ];
                vec![
                    Statement::new(
                        "DELETE FROM EDACONFIG.TRANSLATION_VALUES WHERE MAPPING_COLUMN_ID IN \
                         (SELECT MAPPING_COLUMN_ID FROM EDACONFIG.MAPPING_COLUMN \
                          WHERE MAPPING_COLUMN_ID = ? AND MAPPING_ID = ?)",
                        keys.clone(),
                    ),
                    Statement::new(
                        "DELETE FROM EDACONFIG.MAPPING_COLUMN \
                         WHERE MAPPING_COLUMN_ID = ? AND MAPPING_ID = ?",
                        keys,
                    ),
                ]
            }
        }
    }
}

/// Replace every translation of one column mapping, keeping input order.
pub fn replace_translations(
    mapping_column_id: &MappingColumnId,
    translations: &[ValueTranslation],
) -> Vec<Statement> {
    let mut statements = vec![Statement::new(
        "DELETE FROM EDACONFIG.TRANSLATION_VALUES WHERE MAPPING_COLUMN_ID = ?",
        vec![mapping_column_id.as_str().into()],
    )];
    statements.extend(translations.iter().map(|t| {
        Statement::new(
            "INSERT INTO EDACONFIG.TRANSLATION_VALUES (MAPPING_COLUMN_ID, FROMVALUE, TOVALUE) \
             VALUES (?, ?, ?)",
            vec![
                mapping_column_id.as_str().into(),
                t.from_value.as_str().into(),
                t.to_value.as_str().into(),
            ],
        )
    }));
    statements
}

#[cfg(test)]
#[path = "procedure_test.rs"]
mod tests;
