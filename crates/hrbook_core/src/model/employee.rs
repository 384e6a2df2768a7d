//! Employee record.
//!
//! Employees are the reference target of `Review::employee_id`; the review
//! layer only ever needs to look one up by id.

use super::validation::{require_text, RecordValidationError};
use super::{DepartmentId, EmployeeId};
use serde::Serialize;

/// One row of the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// `None` until the record is inserted.
    pub id: Option<EmployeeId>,
    pub name: String,
    pub job_title: String,
    /// Must reference an existing department; enforced by the foreign key.
    pub department_id: DepartmentId,
}

impl Employee {
    /// Creates an unsaved employee. Call `validate()` before persisting.
    pub fn new(
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: DepartmentId,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            job_title: job_title.into(),
            department_id,
        }
    }

    /// Checks that `name` and `job_title` are non-blank.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("employee", "name", &self.name)?;
        require_text("employee", "job_title", &self.job_title)?;
        Ok(())
    }
}
