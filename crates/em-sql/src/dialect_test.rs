use super::*;

#[test]
fn test_for_db_type() {
    assert_eq!(for_db_type(DbType::DuckDb).name(), "duckdb");
    assert_eq!(for_db_type(DbType::Snowflake).name(), "snowflake");
    assert_eq!(for_db_type(DbType::Snowflake).db_type(), DbType::Snowflake);
}

#[test]
fn test_both_dialects_parse_a_mapping_select() {
    let sql = "SELECT\nCUST_ID AS CUSTOMER_ID\nFROM RAW.SALES.CUSTOMERS";
    for db_type in [DbType::DuckDb, DbType::Snowflake] {
        let stmts = for_db_type(db_type).parse(sql).unwrap();
        assert_eq!(stmts.len(), 1);
    }
}

#[test]
fn test_parse_error_location() {
    let result = DuckDbDialect::default().parse("SELECT\nFROM users");
    match result {
        Err(SqlError::ParseError { line, message, .. }) => {
            assert_eq!(line, 2, "unexpected location in: {message}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_error_location_extraction() {
    assert_eq!(
        error_location("Expected: an expression, found: FROM at Line: 3, Column: 14"),
        Some((3, 14))
    );
    assert_eq!(error_location("no location here"), None);
}
