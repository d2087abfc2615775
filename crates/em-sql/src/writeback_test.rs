use super::*;
use crate::parser::SqlParser;

fn row() -> EmployeeRow {
    EmployeeRow {
        employee_id: EmployeeId::try_new("E1"),
        first_name: " Ann ".to_string(),
        last_name: "Lee".to_string(),
        email: " Ann.Lee@Example.COM ".to_string(),
        function: "Ops".to_string(),
        manager_email: "BOSS@example.com".to_string(),
        hire_date: "01/15/2020".to_string(),
        active: false,
        ..Default::default()
    }
}

fn placeholders(stmt: &Statement) -> usize {
    stmt.sql.matches('?').count()
}

#[test]
fn test_archive_sets_delete_metadata_and_checks_version() {
    let id = EmployeeId::try_new("E1").unwrap();
    let stmt = archive(&id, 3, "analyst");
    assert!(stmt.sql.starts_with("UPDATE HRDEMO.EMPLOYEES SET IS_CURRENT = FALSE"));
    assert!(stmt.sql.contains("DELETE_USER = ?"));
    assert!(stmt.sql.contains("DELETE_DATE_TIME = CURRENT_TIMESTAMP"));
    assert!(stmt.sql.ends_with("AND VERSION_NUMBER = ?"));
    assert_eq!(
        stmt.params,
        vec![
            SqlValue::Text("analyst".to_string()),
            SqlValue::Text("analyst".to_string()),
            SqlValue::Text("E1".to_string()),
            SqlValue::Int(3),
        ]
    );
}

#[test]
fn test_retire_does_not_set_delete_metadata() {
    let id = EmployeeId::try_new("E1").unwrap();
    let stmt = retire(&id, 1, "analyst");
    assert!(!stmt.sql.contains("DELETE_USER"));
    assert_eq!(placeholders(&stmt), stmt.params.len());
}

#[test]
fn test_insert_version_with_uid() {
    let stmt = insert_version(&row(), Some("U-1"), 4, "analyst");
    assert!(stmt.sql.contains("(EMPLOYEE_UID, VERSION_NUMBER, IS_CURRENT, FIRST_NAME"));
    assert_eq!(placeholders(&stmt), stmt.params.len());
    assert_eq!(stmt.params[0], SqlValue::Text("U-1".to_string()));
    assert_eq!(stmt.params[1], SqlValue::Int(4));
    assert_eq!(stmt.params[2], SqlValue::Text("Ann".to_string()));
    assert_eq!(
        stmt.params[4],
        SqlValue::Text("ann.lee@example.com".to_string())
    );
    assert_eq!(
        stmt.params[9],
        SqlValue::Text("boss@example.com".to_string())
    );
    assert_eq!(stmt.params[10], SqlValue::Text("2020-01-15".to_string()));
    assert_eq!(stmt.params[11], SqlValue::Bool(false));
    assert_eq!(
        stmt.params.last(),
        Some(&SqlValue::Text("analyst".to_string()))
    );
}

#[test]
fn test_insert_version_without_uid() {
    let mut new_row = row();
    new_row.hire_date = String::new();
    let stmt = insert_version(&new_row, None, 1, "analyst");
    assert!(stmt.sql.contains("(VERSION_NUMBER, IS_CURRENT, FIRST_NAME"));
    assert!(!stmt.sql.contains("EMPLOYEE_UID"));
    assert_eq!(placeholders(&stmt), stmt.params.len());
    assert_eq!(stmt.params[0], SqlValue::Int(1));
    assert_eq!(stmt.params[9], SqlValue::Null);
}

#[test]
fn test_statements_parse() {
    let parser = SqlParser::duckdb();
    let id = EmployeeId::try_new("E1").unwrap();
    for stmt in [
        select_current(),
        archive(&id, 1, "a"),
        retire(&id, 1, "a"),
        insert_version(&row(), Some("U-1"), 2, "a"),
        insert_version(&row(), None, 1, "a"),
    ] {
        parser.parse_single(&stmt.sql).unwrap();
    }
}
