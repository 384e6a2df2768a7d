//! SQLite connection bootstrap and table definitions.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for hrbook core.
//! - Own the DDL for `departments`, `employees` and `reviews`.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Tables are created and dropped in foreign-key dependency order.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{drop_schema, ensure_schema};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
