use super::*;

fn emp(id: Option<&str>, first: &str, last: &str, active: bool) -> EmployeeRow {
    EmployeeRow {
        employee_id: id.and_then(EmployeeId::try_new),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        active,
        ..Default::default()
    }
}

fn ids<'a>(rows: impl IntoIterator<Item = &'a EmployeeId>) -> Vec<&'a str> {
    rows.into_iter().map(|id| id.as_str()).collect()
}

#[test]
fn test_boolean_change_alone_is_an_update() {
    let original = vec![emp(Some("E1"), "Ann", "Lee", true)];
    let edited = vec![emp(Some("E1"), "Ann", "Lee", false)];

    let diff = diff_rows(&original, &edited);
    assert_eq!(diff.updates.len(), 1);
    assert!(!diff.updates[0].after.active);
    assert!(diff.deletes.is_empty());
    assert!(diff.inserts.is_empty());
}

#[test]
fn test_missing_identity_is_deleted_once() {
    let original = vec![
        emp(Some("E1"), "Ann", "Lee", true),
        emp(Some("E2"), "Bo", "Kim", true),
    ];
    let edited = vec![emp(Some("E2"), "Bo", "Kim", true)];

    let diff = diff_rows(&original, &edited);
    assert_eq!(ids(diff.delete_ids()), vec!["E1"]);
    assert!(diff.updates.is_empty());
}

#[test]
fn test_reformatted_date_is_not_an_update() {
    let mut before = emp(Some("E1"), "Ann", "Lee", true);
    before.hire_date = "2020-01-15".to_string();
    let mut after = before.clone();
    after.hire_date = "2020-01-15 00:00:00".to_string();

    let diff = diff_rows(&[before.clone()], &[after]);
    assert!(diff.is_empty());

    let mut slashed = before.clone();
    slashed.hire_date = "01/15/2020".to_string();
    assert!(diff_rows(&[before], &[slashed]).is_empty());
}

#[test]
fn test_changed_date_is_an_update() {
    let mut before = emp(Some("E1"), "Ann", "Lee", true);
    before.hire_date = "2020-01-15".to_string();
    let mut after = before.clone();
    after.hire_date = "2020-01-16".to_string();

    assert_eq!(diff_rows(&[before], &[after]).updates.len(), 1);
}

#[test]
fn test_whitespace_only_edit_is_not_an_update() {
    let before = emp(Some("E1"), "Ann", "Lee", true);
    let mut after = before.clone();
    after.first_name = "  Ann ".to_string();
    after.title = " ".to_string();

    assert!(diff_rows(&[before], &[after]).is_empty());
}

#[test]
fn test_email_case_change_is_not_an_update() {
    let mut before = emp(Some("E1"), "Ann", "Lee", true);
    before.email = "Ann.Lee@Example.com".to_string();
    before.manager_email = "Cy.Park@Example.com".to_string();
    let mut after = before.clone();
    after.email = " ann.lee@example.com".to_string();
    after.manager_email = "cy.park@example.com".to_string();

    assert!(diff_rows(&[before.clone()], &[after.clone()]).is_empty());

    after.manager_email = "dee.ng@example.com".to_string();
    assert_eq!(diff_rows(&[before], &[after]).updates.len(), 1);
}

#[test]
fn test_unparseable_date_edit_is_an_update() {
    let mut before = emp(Some("E1"), "Ann", "Lee", true);
    before.hire_date = "someday".to_string();
    let mut after = before.clone();
    after.hire_date = "tomorrow".to_string();
    assert_eq!(diff_rows(&[before.clone()], &[after]).updates.len(), 1);

    let mut parsed = before.clone();
    parsed.hire_date = "2020-01-15".to_string();
    assert_eq!(diff_rows(&[before.clone()], &[parsed]).updates.len(), 1);
    assert!(diff_rows(&[before.clone()], &[before]).is_empty());
}

#[test]
fn test_blank_new_row_is_not_inserted() {
    let original = vec![emp(Some("E1"), "Ann", "Lee", true)];
    let blank = EmployeeRow {
        department: "Finance".to_string(),
        ..Default::default()
    };
    let edited = vec![emp(Some("E1"), "Ann", "Lee", true), blank];

    let diff = diff_rows(&original, &edited);
    assert!(diff.inserts.is_empty());
    assert!(diff.is_empty());
}

#[test]
fn test_new_row_with_email_only_is_inserted() {
    let new_row = EmployeeRow {
        email: "new@example.com".to_string(),
        ..Default::default()
    };
    let diff = diff_rows(&[], &[new_row]);
    assert_eq!(diff.inserts.len(), 1);
}

#[test]
fn test_unknown_identity_is_unmatched() {
    let original = vec![emp(Some("E1"), "Ann", "Lee", true)];
    let edited = vec![
        emp(Some("E1"), "Ann", "Lee", true),
        emp(Some("E9"), "Zed", "Roe", true),
    ];

    let diff = diff_rows(&original, &edited);
    assert_eq!(diff.unmatched.len(), 1);
    assert!(diff.inserts.is_empty());
    assert!(diff.updates.is_empty());
}

#[test]
fn test_repeated_identity_only_matches_once() {
    let original = vec![emp(Some("E1"), "Ann", "Lee", true)];
    let edited = vec![
        emp(Some("E1"), "Anne", "Lee", true),
        emp(Some("E1"), "Annie", "Lee", true),
    ];

    let diff = diff_rows(&original, &edited);
    assert_eq!(diff.updates.len(), 1);
    assert_eq!(diff.updates[0].after.first_name, "Anne");
    assert_eq!(diff.unmatched.len(), 1);
}

#[test]
fn test_classified_sets_are_disjoint_and_known() {
    let original = vec![
        emp(Some("E1"), "Ann", "Lee", true),
        emp(Some("E2"), "Bo", "Kim", true),
        emp(Some("E3"), "Cy", "Park", true),
    ];
    let edited = vec![
        emp(Some("E2"), "Bob", "Kim", true),
        emp(Some("E3"), "Cy", "Park", true),
        emp(None, "Dee", "Ng", true),
    ];

    let diff = diff_rows(&original, &edited);
    let deleted: HashSet<&str> = ids(diff.delete_ids()).into_iter().collect();
    let updated: HashSet<&str> = ids(diff.update_ids()).into_iter().collect();
    assert!(deleted.is_disjoint(&updated));

    let known: HashSet<&str> = original
        .iter()
        .chain(edited.iter())
        .filter_map(|r| r.employee_id.as_ref().map(|id| id.as_str()))
        .collect();
    assert!(deleted.is_subset(&known));
    assert!(updated.is_subset(&known));

    assert_eq!(deleted, HashSet::from(["E1"]));
    assert_eq!(updated, HashSet::from(["E2"]));
    assert_eq!(diff.inserts.len(), 1);
    assert!(diff.inserts[0].employee_id.is_none());
}
