use opsledger_core::db::open_db_in_memory;
use opsledger_core::{
    RepoError, SqliteLedgerStore, WorkspaceRepository, WorkspaceService, WorkspaceSettings,
};

#[test]
fn fresh_workspace_is_seeded_with_default_settings() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();

    let settings = store.get_settings(workspace).unwrap().unwrap();
    assert_eq!(settings, WorkspaceSettings::default());
    assert_eq!(settings.departments[0], "Web Development");
    assert_eq!(settings.expense_categories.len(), 5);
}

#[test]
fn ensure_workspace_is_idempotent_per_name() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();

    let first = store.ensure_workspace("Test Workspace").unwrap();
    let second = store.ensure_workspace("Test Workspace").unwrap();
    assert_eq!(first, second);

    let other = store.ensure_workspace("Another Workspace").unwrap();
    assert_ne!(first, other);
}

#[test]
fn snapshot_substitutes_defaults_when_settings_rows_are_missing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();

    conn.execute(
        "DELETE FROM workspace_settings WHERE workspace_uuid = ?1;",
        [workspace.to_string()],
    )
    .unwrap();

    let service = WorkspaceService::new(store);
    let snapshot = service.load_snapshot(workspace).unwrap();
    assert_eq!(snapshot.settings, WorkspaceSettings::default());
}

#[test]
fn save_settings_replaces_both_lists_and_preserves_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();

    let custom = WorkspaceSettings {
        departments: ["Consulting", "Design", "Support"].map(String::from).to_vec(),
        expense_categories: ["Travel", "Equipment"].map(String::from).to_vec(),
    };
    store.save_settings(workspace, &custom).unwrap();

    let loaded = store.get_settings(workspace).unwrap().unwrap();
    assert_eq!(loaded, custom);

    // Department rollups must follow the configured order.
    let service = WorkspaceService::new(store);
    let metrics = service.metrics(workspace).unwrap();
    let names: Vec<&str> = metrics
        .dept_sales
        .iter()
        .map(|entry| entry.department.as_str())
        .collect();
    assert_eq!(names, ["Consulting", "Design", "Support"]);
}

#[test]
fn save_settings_rejects_blank_labels() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();

    let blank_department = WorkspaceSettings {
        departments: vec!["Consulting".to_string(), "  ".to_string()],
        expense_categories: vec!["Travel".to_string()],
    };
    assert!(matches!(
        store.save_settings(workspace, &blank_department).unwrap_err(),
        RepoError::Validation(_)
    ));

    // The failed save must not have clobbered the seeded defaults.
    let kept = store.get_settings(workspace).unwrap().unwrap();
    assert_eq!(kept, WorkspaceSettings::default());
}

#[test]
fn settings_are_scoped_per_workspace() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace_a = store.ensure_workspace("Workspace A").unwrap();
    let workspace_b = store.ensure_workspace("Workspace B").unwrap();

    let custom = WorkspaceSettings {
        departments: vec!["Consulting".to_string()],
        expense_categories: vec!["Travel".to_string()],
    };
    store.save_settings(workspace_a, &custom).unwrap();

    assert_eq!(store.get_settings(workspace_a).unwrap().unwrap(), custom);
    assert_eq!(
        store.get_settings(workspace_b).unwrap().unwrap(),
        WorkspaceSettings::default()
    );
}
