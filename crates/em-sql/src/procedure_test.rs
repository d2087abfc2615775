use super::*;
use crate::parser::SqlParser;

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

fn update_master() -> MappingProcedure {
    MappingProcedure::UpdateMappingMaster {
        mapping_id: MappingId::try_new("M1").unwrap(),
        target_db: " DW ".to_string(),
        target_schema: "HR".to_string(),
        target_object: "EMPLOYEES".to_string(),
        target_type: ObjectType::DynamicTable,
    }
}

fn all_procedures() -> Vec<MappingProcedure> {
    let column_id = MappingColumnId::try_new("C1").unwrap();
    vec![
        MappingProcedure::CreateMappingMaster {
            project_id: ProjectId::try_new("P1").unwrap(),
            table_id: TableId::try_new("T1").unwrap(),
            database_id: DatabaseId::try_new("D1").unwrap(),
            schema_id: SchemaId::try_new("S1").unwrap(),
        },
        update_master(),
        MappingProcedure::InsertMappingColumn {
            mapping_id: MappingId::try_new("M1").unwrap(),
            source_column: "EMP_ID".to_string(),
            target_column: "EMPLOYEE_ID".to_string(),
            description: String::new(),
        },
        MappingProcedure::UpdateMappingColumn {
            mapping_id: MappingId::try_new("M1").unwrap(),
            mapping_column_id: column_id.clone(),
            target_column: "EMPLOYEE_ID".to_string(),
            description: "Key".to_string(),
        },
        MappingProcedure::DeleteMappingColumn {
            mapping_id: MappingId::try_new("M1").unwrap(),
            mapping_column_id: column_id,
        },
    ]
}

#[test]
fn test_snowflake_emits_call() {
    let stmts = update_master().statements(DbType::Snowflake);
    assert_eq!(stmts.len(), 1);
    assert_eq!(
        stmts[0].sql,
        "CALL EDACONFIG.UPDATE_MAPPING_MASTER(?, ?, ?, ?, ?)"
    );
    assert_eq!(
        stmts[0].params,
        vec![
            text("M1"),
            text("DW"),
            text("HR"),
            text("EMPLOYEES"),
            text("DYNAMIC TABLE"),
        ]
    );
}

#[test]
fn test_duckdb_update_master_moves_key_last() {
    let stmts = update_master().statements(DbType::DuckDb);
    assert_eq!(stmts.len(), 1);
    assert!(stmts[0].sql.ends_with("WHERE MAPPING_ID = ?"));
    assert_eq!(stmts[0].params.first(), Some(&text("DW")));
    assert_eq!(stmts[0].params.last(), Some(&text("M1")));
}

#[test]
fn test_duckdb_delete_column_removes_translations_first() {
    let stmts = MappingProcedure::DeleteMappingColumn {
        mapping_id: MappingId::try_new("M1").unwrap(),
        mapping_column_id: MappingColumnId::try_new("C1").unwrap(),
    }
    .statements(DbType::DuckDb);
    assert_eq!(stmts.len(), 2);
    assert!(stmts[0].sql.contains("TRANSLATION_VALUES"));
    assert!(stmts[1].sql.contains("MAPPING_COLUMN WHERE"));
    for stmt in &stmts {
        assert!(stmt.sql.contains("MAPPING_COLUMN_ID = ? AND MAPPING_ID = ?"));
        assert_eq!(stmt.params, vec![text("C1"), text("M1")]);
    }
}

#[test]
fn test_duckdb_column_writes_are_scoped_to_mapping() {
    let update = MappingProcedure::UpdateMappingColumn {
        mapping_id: MappingId::try_new("M1").unwrap(),
        mapping_column_id: MappingColumnId::try_new("C1").unwrap(),
        target_column: "EMPLOYEE_ID".to_string(),
        description: String::new(),
    };
    let stmts = update.statements(DbType::DuckDb);
    assert!(stmts[0].sql.ends_with("WHERE MAPPING_COLUMN_ID = ? AND MAPPING_ID = ?"));
    assert_eq!(
        stmts[0].params,
        vec![text("EMPLOYEE_ID"), text(""), text("C1"), text("M1")]
    );

    let call = update.statements(DbType::Snowflake);
    assert_eq!(call[0].sql, "CALL EDACONFIG.UPDATE_MAPPING_COLUMN(?, ?, ?)");
}

#[test]
fn test_column_changes_convert_to_procedures() {
    let change = ColumnChange::Delete {
        mapping_id: MappingId::try_new("M1").unwrap(),
        mapping_column_id: MappingColumnId::try_new("C7").unwrap(),
    };
    let procedure = MappingProcedure::from(change);
    assert_eq!(procedure.name(), "DELETE_MAPPING_COLUMN");
    assert_eq!(procedure.args(), vec![text("C7")]);
}

#[test]
fn test_only_create_returns_id() {
    let returning: Vec<&str> = all_procedures()
        .iter()
        .filter(|p| p.returns_id())
        .map(|p| p.name())
        .collect();
    assert_eq!(returning, vec!["CREATE_MAPPING_MASTER"]);
}

#[test]
fn test_every_statement_binds_all_placeholders_and_parses() {
    let parser = SqlParser::duckdb();
    for procedure in all_procedures() {
        for db_type in [DbType::DuckDb, DbType::Snowflake] {
            for stmt in procedure.statements(db_type) {
                assert_eq!(
                    stmt.sql.matches('?').count(),
                    stmt.params.len(),
                    "{}",
                    stmt.sql
                );
                parser.parse_single(&stmt.sql).unwrap();
            }
        }
    }
}

#[test]
fn test_replace_translations() {
    let id = MappingColumnId::try_new("C1").unwrap();
    let rules = vec![
        ValueTranslation {
            mapping_column_id: id.clone(),
            from_value: "A".to_string(),
            to_value: "Active".to_string(),
        },
        ValueTranslation {
            mapping_column_id: id.clone(),
            from_value: "T".to_string(),
            to_value: "Terminated".to_string(),
        },
    ];
    let stmts = replace_translations(&id, &rules);
    assert_eq!(stmts.len(), 3);
    assert!(stmts[0].sql.starts_with("DELETE"));
    assert_eq!(stmts[1].params, vec![text("C1"), text("A"), text("Active")]);
    assert_eq!(stmts[2].params[1], text("T"));

    assert_eq!(replace_translations(&id, &[]).len(), 1);
}
