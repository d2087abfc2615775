use super::*;

fn id<T: std::str::FromStr>(s: &str) -> T
where
    T::Err: std::fmt::Debug,
{
    s.parse().unwrap()
}

fn fully_selected() -> SessionState {
    let mut state = SessionState::default();
    for action in [
        Action::SelectProject(id("P1")),
        Action::SelectSystem(id("S1")),
        Action::SelectDatabase(id("D1")),
        Action::SelectSchema(id("SC1")),
        Action::SelectTable(id("T1")),
        Action::MappingCreated(id("M1")),
        Action::SelectColumn(id("C1")),
        Action::MarkDirty,
    ] {
        state = state.apply(action).unwrap();
    }
    state
}

#[test]
fn test_empty_session_shows_filters() {
    assert_eq!(SessionState::default().page(), Page::Filters);
}

#[test]
fn test_full_selection_path() {
    let state = fully_selected();
    assert_eq!(state.table.as_deref(), Some("T1"));
    assert_eq!(state.mapping.as_deref(), Some("M1"));
    assert!(state.mapping_is_new);
    assert!(state.dirty);
    assert_eq!(state.page(), Page::MappingDetail);
}

#[test]
fn test_select_system_clears_everything_below() {
    let state = fully_selected()
        .apply(Action::SelectSystem(id("S2")))
        .unwrap();
    assert_eq!(state.project.as_deref(), Some("P1"));
    assert_eq!(state.system.as_deref(), Some("S2"));
    assert!(state.database.is_none());
    assert!(state.schema.is_none());
    assert!(state.table.is_none());
    assert!(state.mapping.is_none());
    assert!(state.column.is_none());
    assert!(!state.dirty);
    assert_eq!(state.page(), Page::MappingList);
}

#[test]
fn test_select_database_keeps_system() {
    let state = fully_selected()
        .apply(Action::SelectDatabase(id("D2")))
        .unwrap();
    assert_eq!(state.system.as_deref(), Some("S1"));
    assert_eq!(state.database.as_deref(), Some("D2"));
    assert!(state.schema.is_none());
    assert!(state.table.is_none());
}

#[test]
fn test_select_schema_clears_table_and_mapping() {
    let state = fully_selected()
        .apply(Action::SelectSchema(id("SC2")))
        .unwrap();
    assert_eq!(state.database.as_deref(), Some("D1"));
    assert!(state.table.is_none());
    assert!(state.mapping.is_none());
}

#[test]
fn test_select_table_clears_mapping_and_column() {
    let state = fully_selected()
        .apply(Action::SelectTable(id("T2")))
        .unwrap();
    assert_eq!(state.schema.as_deref(), Some("SC1"));
    assert_eq!(state.table.as_deref(), Some("T2"));
    assert!(state.mapping.is_none());
    assert!(state.column.is_none());
    assert!(!state.mapping_is_new);
}

#[test]
fn test_select_mapping_is_not_new() {
    let state = fully_selected()
        .apply(Action::SelectMapping(id("M7")))
        .unwrap();
    assert_eq!(state.mapping.as_deref(), Some("M7"));
    assert!(!state.mapping_is_new);
    assert!(state.column.is_none());
    assert!(!state.dirty);
}

#[test]
fn test_reset_filters_keeps_only_project() {
    let state = fully_selected().apply(Action::ResetFilters).unwrap();
    assert_eq!(
        state,
        SessionState {
            project: Some(id("P1")),
            ..SessionState::default()
        }
    );
}

#[test]
fn test_reselecting_same_project_keeps_selection() {
    let before = fully_selected();
    let after = before.apply(Action::SelectProject(id("P1"))).unwrap();
    assert_eq!(before, after);

    let switched = before.apply(Action::SelectProject(id("P2"))).unwrap();
    assert!(switched.system.is_none());
    assert!(switched.mapping.is_none());
}

#[test]
fn test_actions_require_parent_selection() {
    let empty = SessionState::default();
    let err = empty.apply(Action::SelectSystem(id("S1"))).unwrap_err();
    assert!(matches!(err, CoreError::InvalidTransition { .. }));
    assert_eq!(
        err.to_string(),
        "[E004] Cannot select system: no project selected"
    );

    assert!(empty.apply(Action::SelectColumn(id("C1"))).is_err());
    assert!(empty.apply(Action::MappingCreated(id("M1"))).is_err());
    assert!(empty.apply(Action::MarkDirty).is_err());
}

#[test]
fn test_clear_mapping_and_mark_clean() {
    let state = fully_selected().apply(Action::MarkClean).unwrap();
    assert!(!state.dirty);
    assert_eq!(state.mapping.as_deref(), Some("M1"));

    let state = state.apply(Action::ClearMapping).unwrap();
    assert!(state.mapping.is_none());
    assert_eq!(state.table.as_deref(), Some("T1"));
}

#[test]
fn test_load_missing_file_is_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let state = SessionState::load(&dir.path().join("nope.json")).unwrap();
    assert_eq!(state, SessionState::default());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".em").join("session.json");
    let state = fully_selected();
    state.save(&path).unwrap();
    assert_eq!(SessionState::load(&path).unwrap(), state);
}
