use super::*;

fn col(id: Option<&str>, mapped: bool, source: &str, target: &str) -> ColumnMapping {
    ColumnMapping {
        mapping_column_id: id.and_then(MappingColumnId::try_new),
        is_mapped: mapped,
        source_column: source.to_string(),
        target_column: target.to_string(),
        description: String::new(),
    }
}

#[test]
fn test_object_type_parsing() {
    assert_eq!("View".parse::<ObjectType>().unwrap(), ObjectType::View);
    assert_eq!(
        "Dynamic Table".parse::<ObjectType>().unwrap(),
        ObjectType::DynamicTable
    );
    assert_eq!(
        "dynamic_table".parse::<ObjectType>().unwrap(),
        ObjectType::DynamicTable
    );
    assert_eq!(
        "DYNAMIC TABLE".parse::<ObjectType>().unwrap(),
        ObjectType::DynamicTable
    );
    assert!("materialized view".parse::<ObjectType>().is_err());
}

#[test]
fn test_object_type_display() {
    assert_eq!(ObjectType::View.to_string(), "VIEW");
    assert_eq!(ObjectType::DynamicTable.to_string(), "DYNAMIC TABLE");
}

#[test]
fn test_plan_column_changes_classifies_rows() {
    let mapping = MappingId::try_new("M1").unwrap();
    let rows = vec![
        col(None, true, "CUST_ID", "CUSTOMER_ID"),
        col(Some("C1"), false, "OLD_COL", "OLD"),
        col(Some("C2"), true, "NAME", "FULL_NAME"),
        col(None, false, "IGNORED", ""),
    ];

    let changes = plan_column_changes(&mapping, &rows);
    assert_eq!(changes.len(), 3);
    assert!(matches!(
        &changes[0],
        ColumnChange::Insert { source_column, target_column, .. }
            if source_column == "CUST_ID" && target_column == "CUSTOMER_ID"
    ));
    assert!(matches!(
        &changes[1],
        ColumnChange::Delete { mapping_id, mapping_column_id }
            if mapping_column_id == "C1" && mapping_id == "M1"
    ));
    assert!(matches!(
        &changes[2],
        ColumnChange::Update { mapping_column_id, target_column, .. }
            if mapping_column_id == "C2" && target_column == "FULL_NAME"
    ));
}

#[test]
fn test_blank_target_falls_back_to_source() {
    let mapping = MappingId::try_new("M1").unwrap();
    let changes = plan_column_changes(&mapping, &[col(None, true, "STATUS", "  ")]);
    assert!(matches!(
        &changes[0],
        ColumnChange::Insert { target_column, .. } if target_column == "STATUS"
    ));
}

#[test]
fn test_target_display_requires_all_parts() {
    let mut mapping = Mapping {
        mapping_id: MappingId::try_new("M1").unwrap(),
        project_id: ProjectId::try_new("P1").unwrap(),
        source_table_id: TableId::try_new("T1").unwrap(),
        source: Some("ORDERS".into()),
        target_db: Some("ANALYTICS".into()),
        target_schema: Some("SALES".into()),
        target_object: None,
        target_type: None,
    };
    assert_eq!(mapping.target_display(), None);
    mapping.target_object = Some("ORDERS_V".into());
    assert_eq!(
        mapping.target_display().as_deref(),
        Some("ANALYTICS.SALES.ORDERS_V")
    );
}
