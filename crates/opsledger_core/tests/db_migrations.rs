use opsledger_core::db::migrations::latest_version;
use opsledger_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn fresh_database_reaches_latest_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    assert!(latest_version() >= 2);
}

#[test]
fn migrated_schema_has_expected_tables() {
    let conn = open_db_in_memory().unwrap();
    for table in [
        "workspaces",
        "projects",
        "people",
        "transactions",
        "scope_changes",
        "team_costs",
        "workspace_settings",
    ] {
        let exists: i64 = conn
            .query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
                );",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(exists, 1, "missing table `{table}`");
    }
}

#[test]
fn foreign_keys_are_enabled_on_open() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn reopening_migrated_database_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("migrate.db");

    drop(open_db(&db_path).unwrap());
    let conn = open_db(&db_path).unwrap();

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn database_from_a_newer_build_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("future.db");

    {
        let raw = Connection::open(&db_path).unwrap();
        raw.execute_batch("PRAGMA user_version = 99;").unwrap();
    }

    match open_db(&db_path) {
        Err(DbError::UnsupportedSchemaVersion {
            db_version: 99,
            latest_supported,
        }) => assert_eq!(latest_supported, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected unsupported schema version error"),
    }
}
