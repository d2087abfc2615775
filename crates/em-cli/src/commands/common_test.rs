use super::*;

#[test]
fn test_format_table_aligns_columns() {
    let table = format_table(
        &["ID", "NAME"],
        &[
            vec!["P1".to_string(), "HR Consolidation".to_string()],
            vec!["P22".to_string(), "Ops".to_string()],
        ],
    );
    assert_eq!(
        table,
        "ID   NAME\n\
         ---  ----------------\n\
         P1   HR Consolidation\n\
         P22  Ops"
    );
}

#[test]
fn test_format_table_without_rows() {
    assert_eq!(format_table(&["ID"], &[]), "ID\n--");
}

#[test]
fn test_bar_chart_scales_to_largest() {
    let chart = bar_chart(
        "Employees by location",
        &[("London".to_string(), 2), ("Leeds".to_string(), 1)],
    );
    let lines: Vec<&str> = chart.lines().collect();
    assert_eq!(lines[0], "Employees by location");
    assert_eq!(lines[1], format!("  London  {} 2", "█".repeat(40)));
    assert_eq!(lines[2], format!("  Leeds   {} 1", "█".repeat(20)));
}

#[test]
fn test_bar_chart_small_counts_still_visible() {
    let chart = bar_chart("X", &[("a".to_string(), 100), ("b".to_string(), 1)]);
    assert!(chart.lines().nth(2).unwrap().contains("█ 1"));
}

#[test]
fn test_bar_chart_empty() {
    assert_eq!(bar_chart("Skills", &[]), "Skills\n  (none)\n");
}

#[test]
fn test_resolve_mapping_prefers_flag() {
    let session = SessionState {
        mapping: MappingId::try_new("7"),
        ..Default::default()
    };
    let flag = MappingSelector {
        mapping_id: Some("3".to_string()),
    };
    assert_eq!(resolve_mapping(&flag, &session).unwrap(), "3");

    let none = MappingSelector { mapping_id: None };
    assert_eq!(resolve_mapping(&none, &session).unwrap(), "7");
    assert!(resolve_mapping(&none, &SessionState::default()).is_err());
}

#[test]
fn test_resolve_column_requires_selection() {
    let selector = ColumnSelector { column_id: None };
    let err = resolve_column(&selector, &SessionState::default()).unwrap_err();
    assert!(err.to_string().contains("No column selected"));
}
