//! Department record.

use super::validation::{require_text, RecordValidationError};
use super::DepartmentId;
use serde::Serialize;

/// One row of the `departments` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Department {
    /// `None` until the record is inserted.
    pub id: Option<DepartmentId>,
    pub name: String,
    pub location: String,
}

impl Department {
    /// Creates an unsaved department. Call `validate()` before persisting.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            location: location.into(),
        }
    }

    /// Checks that `name` and `location` are non-blank.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("department", "name", &self.name)?;
        require_text("department", "location", &self.location)?;
        Ok(())
    }
}
