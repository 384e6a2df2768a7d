//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define data access contracts for reviews, employees and departments.
//! - Isolate SQL details from model and service code.
//!
//! # Invariants
//! - Write paths validate records before any SQL mutation.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Every statement runs in autocommit mode; nothing is grouped into a
//!   multi-statement transaction.

pub mod department_repo;
pub mod employee_repo;
mod error;
pub mod identity_map;
pub mod review_repo;

pub use department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use employee_repo::{EmployeeLookup, EmployeeRepository, SqliteEmployeeRepository};
pub use error::{RepoError, RepoResult};
pub use identity_map::IdentityMap;
pub use review_repo::{ReviewHandle, ReviewRepository, SqliteReviewRepository};
