use rusqlite::Connection;
use tasklog_core::db::schema::{PROJECTS_DDL, TASKS_DDL};
use tasklog_core::{
    close_db, ensure_schema, ensure_table, open_db, open_db_in_memory, open_db_with, DbError,
    NewTask, OpenOptions, Project, ProjectRepository, SqliteProjectRepository,
    SqliteTaskRepository, TaskRepository,
};

#[test]
fn ensure_schema_creates_both_tables() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();

    assert_eq!(
        column_names(&conn, "projects"),
        vec!["id", "name", "start_date", "end_date"]
    );
    assert_eq!(
        column_names(&conn, "tasks"),
        vec![
            "id",
            "project_id",
            "name",
            "description",
            "status",
            "start_date",
            "end_date"
        ]
    );
}

#[test]
fn ensure_schema_twice_keeps_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    SqliteProjectRepository::new(&conn)
        .insert_project(&Project::new(1, "Nogi", "a", "b"))
        .unwrap();

    ensure_schema(&conn).unwrap();
    ensure_table(&conn, PROJECTS_DDL).unwrap();
    ensure_table(&conn, TASKS_DDL).unwrap();

    assert_eq!(table_count(&conn), 2);
    let projects = SqliteProjectRepository::new(&conn).list_projects().unwrap();
    assert_eq!(projects.len(), 1);
}

#[test]
fn malformed_ddl_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let err = ensure_table(&conn, "CREATE TABLE IF NOT EXISTS (").unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.db");

    let conn = open_db(&path).unwrap();
    ensure_schema(&conn).unwrap();
    SqliteProjectRepository::new(&conn)
        .insert_project(&Project::new(3, "Nogi", "06.03.2024 10:00", "06.03.2024 13:00"))
        .unwrap();
    close_db(conn).unwrap();

    let conn = open_db(&path).unwrap();
    ensure_schema(&conn).unwrap();
    let projects = SqliteProjectRepository::new(&conn).list_projects().unwrap();
    assert_eq!(projects, vec![Project::new(3, "Nogi", "06.03.2024 10:00", "06.03.2024 13:00")]);
}

#[test]
fn opening_under_missing_directory_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("database.db");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
}

#[test]
fn foreign_keys_are_enforced_by_default() {
    let conn = open_db_in_memory().unwrap();
    ensure_schema(&conn).unwrap();

    let orphan = NewTask::new(99, "Warmup", "todo", "10:00", "10:30");
    assert!(SqliteTaskRepository::new(&conn).insert_task(&orphan).is_err());
}

#[test]
fn foreign_keys_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_with(
        dir.path().join("loose.db"),
        OpenOptions {
            foreign_keys: false,
        },
    )
    .unwrap();
    ensure_schema(&conn).unwrap();

    let orphan = NewTask::new(99, "Warmup", "todo", "10:00", "10:30");
    let id = SqliteTaskRepository::new(&conn).insert_task(&orphan).unwrap();
    assert_eq!(id, 1);
}

fn column_names(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn table_count(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table';",
        [],
        |row| row.get(0),
    )
    .unwrap()
}
