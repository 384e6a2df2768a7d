//! Domain records for the review/employee/department book.
//!
//! # Responsibility
//! - Define the records persisted by the repository layer.
//! - Own field validation so that invalid values never reach storage.
//!
//! # Invariants
//! - Integer ids are assigned by SQLite (`INTEGER PRIMARY KEY`) and are
//!   `None` until a record is persisted.
//! - `Review` fields are private and only change through validating setters.

pub mod department;
pub mod employee;
pub mod review;
mod validation;

pub use validation::RecordValidationError;

/// Row id of a `departments` record.
pub type DepartmentId = i64;
/// Row id of an `employees` record.
pub type EmployeeId = i64;
/// Row id of a `reviews` record.
pub type ReviewId = i64;
