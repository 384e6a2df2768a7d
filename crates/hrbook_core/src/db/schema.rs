//! Table definitions for the record-keeping schema.
//!
//! Every statement is idempotent (`IF NOT EXISTS` / `IF EXISTS`), so callers
//! may run them on every startup.

use super::DbResult;
use log::info;
use rusqlite::Connection;

pub const DEPARTMENTS_TABLE: &str = "departments";
pub const EMPLOYEES_TABLE: &str = "employees";
pub const REVIEWS_TABLE: &str = "reviews";

pub(crate) const CREATE_DEPARTMENTS_SQL: &str = "CREATE TABLE IF NOT EXISTS departments (
    id INTEGER PRIMARY KEY,
    name TEXT,
    location TEXT
);";

pub(crate) const CREATE_EMPLOYEES_SQL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT,
    job_title TEXT,
    department_id INTEGER,
    FOREIGN KEY (department_id) REFERENCES departments(id)
);";

pub(crate) const CREATE_REVIEWS_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INT,
    summary TEXT,
    employee_id INTEGER,
    FOREIGN KEY (employee_id) REFERENCES employees(id)
);";

pub(crate) const DROP_DEPARTMENTS_SQL: &str = "DROP TABLE IF EXISTS departments;";
pub(crate) const DROP_EMPLOYEES_SQL: &str = "DROP TABLE IF EXISTS employees;";
pub(crate) const DROP_REVIEWS_SQL: &str = "DROP TABLE IF EXISTS reviews;";

/// Creates all application tables that do not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    for sql in [CREATE_DEPARTMENTS_SQL, CREATE_EMPLOYEES_SQL, CREATE_REVIEWS_SQL] {
        conn.execute_batch(sql)?;
    }
    info!("event=schema_ensure module=db status=ok");
    Ok(())
}

/// Drops all application tables, dependents first.
pub fn drop_schema(conn: &Connection) -> DbResult<()> {
    for sql in [DROP_REVIEWS_SQL, DROP_EMPLOYEES_SQL, DROP_DEPARTMENTS_SQL] {
        conn.execute_batch(sql)?;
    }
    info!("event=schema_drop module=db status=ok");
    Ok(())
}

/// Returns whether a table with the given name exists.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::{drop_schema, ensure_schema, table_exists, REVIEWS_TABLE};
    use rusqlite::Connection;

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        assert!(table_exists(&conn, REVIEWS_TABLE).unwrap());
    }

    #[test]
    fn drop_schema_on_empty_database_is_noop() {
        let conn = Connection::open_in_memory().unwrap();
        drop_schema(&conn).unwrap();
        assert!(!table_exists(&conn, REVIEWS_TABLE).unwrap());
    }
}
