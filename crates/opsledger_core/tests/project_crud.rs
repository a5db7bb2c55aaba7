use opsledger_core::db::open_db_in_memory;
use opsledger_core::{
    Project, ProjectRepository, ProjectStatus, RepoError, SqliteLedgerStore, WorkspaceRepository,
    WorkspaceService,
};
use rusqlite::Connection;
use rust_decimal::Decimal;
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();

    let mut project = Project::new("Storefront", "Acme", "Web Development", Decimal::from(1000));
    project.start_date = Some("2025-01-15".to_string());
    let id = store.create_project(workspace, &project).unwrap();

    let loaded = store.get_project(workspace, id).unwrap().unwrap();
    assert_eq!(loaded, project);
    assert!(loaded.status.is_active());
}

#[test]
fn update_existing_project() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();

    let mut project = Project::new("Storefront", "Acme", "Web Development", Decimal::from(1000));
    store.create_project(workspace, &project).unwrap();

    project.name = "Storefront v2".to_string();
    project.contract_amount = Decimal::from(1500);
    project.status = ProjectStatus::completed();
    store.update_project(workspace, &project).unwrap();

    let loaded = store.get_project(workspace, project.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Storefront v2");
    assert_eq!(loaded.contract_amount, Decimal::from(1500));
    assert_eq!(loaded.status, ProjectStatus::completed());
}

#[test]
fn update_missing_project_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();

    let project = Project::new("Ghost", "Acme", "General", Decimal::from(10));
    let err = store.update_project(workspace, &project).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "project", id } if id == project.id
    ));
}

#[test]
fn projects_are_scoped_to_their_workspace() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace_a = store.ensure_workspace("Workspace A").unwrap();
    let workspace_b = store.ensure_workspace("Workspace B").unwrap();

    let project = Project::new("Storefront", "Acme", "General", Decimal::from(100));
    store.create_project(workspace_a, &project).unwrap();

    assert!(store.get_project(workspace_b, project.id).unwrap().is_none());
    assert!(store.list_projects(workspace_b).unwrap().is_empty());
    assert_eq!(store.list_projects(workspace_a).unwrap().len(), 1);
}

#[test]
fn list_orders_newest_first_with_stable_tiebreak() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();

    let older = project_with_fixed_id("00000000-0000-4000-8000-000000000001");
    let newer = project_with_fixed_id("00000000-0000-4000-8000-000000000002");
    let tied = project_with_fixed_id("00000000-0000-4000-8000-000000000003");
    store.create_project(workspace, &older).unwrap();
    store.create_project(workspace, &newer).unwrap();
    store.create_project(workspace, &tied).unwrap();

    conn.execute(
        "UPDATE projects SET created_at = 1000 WHERE uuid = ?1;",
        [older.id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE projects SET created_at = 2000 WHERE uuid IN (?1, ?2);",
        [newer.id.to_string(), tied.id.to_string()],
    )
    .unwrap();

    let listed = store.list_projects(workspace).unwrap();
    let ids: Vec<_> = listed.iter().map(|project| project.id).collect();
    assert_eq!(ids, vec![newer.id, tied.id, older.id]);
}

#[test]
fn toggle_flips_status_and_resets_unknown_values() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();
    let service = WorkspaceService::new(store);

    let project = Project::new("Storefront", "Acme", "General", Decimal::from(100));
    service.create_project(workspace, &project).unwrap();

    let toggled = service.toggle_project_status(workspace, project.id).unwrap();
    assert_eq!(toggled.status, ProjectStatus::completed());

    let toggled_back = service.toggle_project_status(workspace, project.id).unwrap();
    assert_eq!(toggled_back.status, ProjectStatus::active());

    conn.execute(
        "UPDATE projects SET status = 'On Hold' WHERE uuid = ?1;",
        [project.id.to_string()],
    )
    .unwrap();
    let reset = service.toggle_project_status(workspace, project.id).unwrap();
    assert_eq!(reset.status, ProjectStatus::active());
}

#[test]
fn toggle_missing_project_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();
    let service = WorkspaceService::new(store);

    let err = service
        .toggle_project_status(workspace, Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "project", .. }));
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteLedgerStore::try_new(&conn).unwrap();
    let workspace = store.ensure_workspace("Test Workspace").unwrap();

    let negative = Project::new("Bad", "Acme", "General", Decimal::from(-100));
    assert!(matches!(
        store.create_project(workspace, &negative).unwrap_err(),
        RepoError::Validation(_)
    ));

    let mut valid = Project::new("Good", "Acme", "General", Decimal::from(100));
    store.create_project(workspace, &valid).unwrap();

    valid.name = "  ".to_string();
    assert!(matches!(
        store.update_project(workspace, &valid).unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteLedgerStore::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

fn project_with_fixed_id(id: &str) -> Project {
    Project::with_id(
        Uuid::parse_str(id).unwrap(),
        "Fixture",
        "Acme",
        "General",
        Decimal::from(100),
    )
}
