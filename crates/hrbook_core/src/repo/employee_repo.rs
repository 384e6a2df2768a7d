//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist employee records.
//! - Serve as the `EmployeeLookup` capability used to validate
//!   `Review::employee_id` assignments.
//!
//! # Invariants
//! - `department_id` integrity is left to the `employees` foreign key.
//! - Deleting an employee still referenced by a review fails at the database
//!   level while `foreign_keys=ON`; the storage error is returned unchanged.

use super::{RepoError, RepoResult};
use crate::db::schema::{CREATE_EMPLOYEES_SQL, DROP_EMPLOYEES_SQL, EMPLOYEES_TABLE};
use crate::model::employee::Employee;
use crate::model::{DepartmentId, EmployeeId};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, job_title, department_id FROM employees";

/// Capability for resolving an employee by id.
///
/// Implementations may hit storage; callers must treat a lookup as blocking
/// I/O. Absence is `Ok(None)`, never an error.
pub trait EmployeeLookup {
    fn find_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
}

impl<T: EmployeeLookup + ?Sized> EmployeeLookup for &T {
    fn find_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        (**self).find_employee(id)
    }
}

/// Repository interface for employee records.
pub trait EmployeeRepository {
    fn create_table(&self) -> RepoResult<()>;
    fn drop_table(&self) -> RepoResult<()>;
    fn create(
        &self,
        name: &str,
        job_title: &str,
        department_id: DepartmentId,
    ) -> RepoResult<Employee>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn get_all(&self) -> RepoResult<Vec<Employee>>;
    fn delete(&self, id: EmployeeId) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
#[derive(Clone, Copy)]
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_EMPLOYEES_SQL)?;
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(DROP_EMPLOYEES_SQL)?;
        Ok(())
    }

    fn create(
        &self,
        name: &str,
        job_title: &str,
        department_id: DepartmentId,
    ) -> RepoResult<Employee> {
        let mut employee = Employee::new(name, job_title, department_id);
        employee.validate()?;

        self.conn.execute(
            "INSERT INTO employees (name, job_title, department_id) VALUES (?1, ?2, ?3);",
            params![
                employee.name.as_str(),
                employee.job_title.as_str(),
                employee.department_id,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        employee.id = Some(id);

        debug!(
            "event=employee_create module=repo status=ok employee_id={id} department_id={department_id}"
        );
        Ok(employee)
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn get_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(EMPLOYEE_SELECT_SQL)?;
        let employees = stmt
            .query_map([], parse_employee_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    fn delete(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: EMPLOYEES_TABLE,
                id,
            });
        }

        debug!("event=employee_delete module=repo status=ok employee_id={id}");
        Ok(())
    }
}

impl EmployeeLookup for SqliteEmployeeRepository<'_> {
    fn find_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.find_by_id(id)
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        job_title: row.get("job_title")?,
        department_id: row.get("department_id")?,
    })
}
