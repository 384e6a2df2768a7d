use crate::db::DbError;
use crate::model::review::ReviewValidationError;
use crate::model::RecordValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for persistence, lookup and validation failures in the repository
/// layer.
#[derive(Debug)]
pub enum RepoError {
    /// A review field failed validation (invalid value or invalid reference).
    ReviewValidation(ReviewValidationError),
    /// An employee/department record failed validation.
    RecordValidation(RecordValidationError),
    /// Storage error, passed through unchanged.
    Db(DbError),
    /// No row with this id in `table`.
    NotFound { table: &'static str, id: i64 },
    /// Operation needs a persisted record but `id` is unset.
    NotPersisted { entity: &'static str },
    /// Stored row violates a model invariant.
    InvalidData(String),
    /// A shared instance is borrowed elsewhere; `id` is `None` when it could
    /// not be read.
    InstanceBorrowed { id: Option<i64> },
}

impl RepoError {
    /// Returns whether this error is a rejected field value.
    pub fn is_invalid_value(&self) -> bool {
        match self {
            Self::ReviewValidation(err) => !err.is_invalid_reference(),
            Self::RecordValidation(_) => true,
            _ => false,
        }
    }

    /// Returns whether this error is a failed employee reference check.
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, Self::ReviewValidation(err) if err.is_invalid_reference())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReviewValidation(err) => write!(f, "{err}"),
            Self::RecordValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "no row with id {id} in {table}"),
            Self::NotPersisted { entity } => {
                write!(f, "{entity} has no id; save it before this operation")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::InstanceBorrowed { id: Some(id) } => {
                write!(f, "instance for row {id} is borrowed elsewhere; release it and retry")
            }
            Self::InstanceBorrowed { id: None } => {
                write!(f, "instance is borrowed elsewhere; release it and retry")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReviewValidation(err) => Some(err),
            Self::RecordValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::NotPersisted { .. }
            | Self::InvalidData(_)
            | Self::InstanceBorrowed { .. } => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::ReviewValidation(value)
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::RecordValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
