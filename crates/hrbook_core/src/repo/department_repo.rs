//! Department repository contracts and SQLite implementation.
//!
//! Departments are plain owned records; no identity map is kept for them.

use super::{RepoError, RepoResult};
use crate::db::schema::{CREATE_DEPARTMENTS_SQL, DEPARTMENTS_TABLE, DROP_DEPARTMENTS_SQL};
use crate::model::department::Department;
use crate::model::DepartmentId;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const DEPARTMENT_SELECT_SQL: &str = "SELECT id, name, location FROM departments";

/// Repository interface for department records.
pub trait DepartmentRepository {
    fn create_table(&self) -> RepoResult<()>;
    fn drop_table(&self) -> RepoResult<()>;
    fn create(&self, name: &str, location: &str) -> RepoResult<Department>;
    fn find_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    fn get_all(&self) -> RepoResult<Vec<Department>>;
    fn delete(&self, id: DepartmentId) -> RepoResult<()>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_DEPARTMENTS_SQL)?;
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(DROP_DEPARTMENTS_SQL)?;
        Ok(())
    }

    fn create(&self, name: &str, location: &str) -> RepoResult<Department> {
        let mut department = Department::new(name, location);
        department.validate()?;

        self.conn.execute(
            "INSERT INTO departments (name, location) VALUES (?1, ?2);",
            params![department.name.as_str(), department.location.as_str()],
        )?;
        let id = self.conn.last_insert_rowid();
        department.id = Some(id);

        debug!("event=department_create module=repo status=ok department_id={id}");
        Ok(department)
    }

    fn find_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let department = self
            .conn
            .query_row(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_department_row,
            )
            .optional()?;
        Ok(department)
    }

    fn get_all(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self.conn.prepare(DEPARTMENT_SELECT_SQL)?;
        let departments = stmt
            .query_map([], parse_department_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    fn delete(&self, id: DepartmentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM departments WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: DEPARTMENTS_TABLE,
                id,
            });
        }

        debug!("event=department_delete module=repo status=ok department_id={id}");
        Ok(())
    }
}

fn parse_department_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        location: row.get("location")?,
    })
}
