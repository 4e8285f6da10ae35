use minicrm_core::db::migrations::latest_version;
use minicrm_core::db::{
    open_db, open_db_in_memory, open_db_unseeded, DbError, DEFAULT_TEMPLATE_NAME,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "contacts");
    assert_table_exists(&conn, "templates");
}

#[test]
fn fresh_store_is_seeded_with_follow_up_template() {
    let conn = open_db_in_memory().unwrap();

    let names: Vec<String> = conn
        .prepare("SELECT name FROM templates;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(names, vec![DEFAULT_TEMPLATE_NAME.to_string()]);
}

#[test]
fn reopening_after_deleting_all_templates_reseeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crm.sqlite3");

    let conn = open_db(&path).unwrap();
    conn.execute("DELETE FROM templates;", []).unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(template_count(&conn), 1);
}

#[test]
fn unseeded_open_leaves_deleted_templates_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crm.sqlite3");

    let conn = open_db(&path).unwrap();
    conn.execute("DELETE FROM templates;", []).unwrap();
    drop(conn);

    let conn = open_db_unseeded(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(template_count(&conn), 0);
}

#[test]
fn unseeded_open_still_migrates_a_fresh_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.sqlite3");

    let conn = open_db_unseeded(&path).unwrap();
    assert_table_exists(&conn, "contacts");
    assert_eq!(template_count(&conn), 0);
}

#[test]
fn reopening_does_not_duplicate_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crm.sqlite3");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(template_count(&conn), 1);
}

#[test]
fn open_db_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("crm.sqlite3");

    open_db(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn legacy_store_without_user_version_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT, email TEXT, phone TEXT, website TEXT, status TEXT,
            notes TEXT, date_added TEXT, date_called TEXT, date_emailed TEXT
        );
        INSERT INTO contacts (name, email, status, date_added)
        VALUES ('Old Row', 'old@example.com', 'Called', '2023-09-01 08:00:00');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_table_exists(&conn, "templates");
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
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn template_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM templates;", [], |row| row.get(0))
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
