use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for plain records (`Employee`, `Department`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required text field is empty after trimming.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "{entity}.{field} must be a non-empty string")
            }
        }
    }
}

impl Error for RecordValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::BlankField { entity, field });
    }
    Ok(())
}
