use chorebook_core::db::migrations::{latest_version, schema_version};
use chorebook_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "children");
    assert_table_exists(&conn, "chores");
    assert_table_exists(&conn, "chore_completions");
    assert_table_exists(&conn, "settings");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chores.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first).unwrap(), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second).unwrap(), latest_version());
    assert_table_exists(&conn_second, "chores");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn upgrading_keeps_first_of_duplicate_completions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v1.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(include_str!("../src/db/migrations/0001_init.sql"))
        .unwrap();
    conn.execute_batch(
        "INSERT INTO children (id, name, display_order, created_at)
             VALUES (1, 'Ada', 1, '2024-05-15 08:00:00');
         INSERT INTO chores (id, child_id, title, frequency, display_order, is_active, created_at)
             VALUES (1, 1, 'Dishes', 'daily', 1, 1, '2024-05-15 08:00:00');
         INSERT INTO chore_completions (id, chore_id, date, completed_at) VALUES
             (1, 1, '2024-05-15', '2024-05-15 09:00:00'),
             (2, 1, '2024-05-15', '2024-05-15 09:00:01'),
             (3, 1, '2024-05-16', '2024-05-16 09:00:00');
         PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let kept: Vec<i64> = conn
        .prepare("SELECT id FROM chore_completions ORDER BY id;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(kept, vec![1, 3]);
}

#[test]
fn failed_step_reports_its_version_and_keeps_prior_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 1;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::Migration { version, .. } => assert_eq!(version, 2),
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 1);
}

#[test]
fn completions_are_unique_per_chore_and_date() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO children (id, name, display_order, created_at)
             VALUES (1, 'Ada', 1, '2024-05-15 08:00:00');
         INSERT INTO chores (id, child_id, title, frequency, display_order, is_active, created_at)
             VALUES (1, 1, 'Dishes', 'daily', 1, 1, '2024-05-15 08:00:00');
         INSERT INTO chore_completions (chore_id, date, completed_at)
             VALUES (1, '2024-05-15', '2024-05-15 09:00:00');",
    )
    .unwrap();

    let duplicate = conn.execute(
        "INSERT INTO chore_completions (chore_id, date, completed_at)
         VALUES (1, '2024-05-15', '2024-05-15 10:00:00');",
        [],
    );
    assert!(duplicate.is_err());
}

#[test]
fn deleting_child_cascades_to_chores_and_completions() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO children (id, name, display_order, created_at)
             VALUES (1, 'Ada', 1, '2024-05-15 08:00:00');
         INSERT INTO chores (id, child_id, title, frequency, display_order, is_active, created_at)
             VALUES (1, 1, 'Dishes', 'daily', 1, 1, '2024-05-15 08:00:00');
         INSERT INTO chore_completions (chore_id, date, completed_at)
             VALUES (1, '2024-05-15', '2024-05-15 09:00:00');
         DELETE FROM children WHERE id = 1;",
    )
    .unwrap();

    assert_eq!(count(&conn, "chores"), 0);
    assert_eq!(count(&conn, "chore_completions"), 0);
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
