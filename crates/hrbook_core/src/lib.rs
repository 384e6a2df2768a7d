//! Core record-keeping logic for hrbook.
//! Reviews, employees and departments persisted in SQLite, with an identity
//! map guaranteeing one live instance per review row.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::department::Department;
pub use model::employee::Employee;
pub use model::review::{Review, ReviewValidationError, MIN_REVIEW_YEAR};
pub use model::{DepartmentId, EmployeeId, RecordValidationError, ReviewId};
pub use repo::review_repo::{read_review, review_handle, write_review};
pub use repo::{
    DepartmentRepository, EmployeeLookup, EmployeeRepository, IdentityMap, RepoError, RepoResult,
    ReviewHandle, ReviewRepository, SqliteDepartmentRepository, SqliteEmployeeRepository,
    SqliteReviewRepository,
};
pub use service::review_service::ReviewService;

/// Minimal health-check API for front-end smoke tests.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
