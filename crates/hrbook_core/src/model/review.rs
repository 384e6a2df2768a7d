//! Review domain model.
//!
//! # Responsibility
//! - Hold one performance review with validated `year`, `summary` and
//!   `employee_id` fields.
//! - Route construction and later mutation through the same checks.
//!
//! # Invariants
//! - `year >= MIN_REVIEW_YEAR`.
//! - `summary.trim()` is non-empty; the untrimmed text is what gets stored.
//! - `employee_id` referenced an existing employee when it was assigned. It
//!   is not re-checked afterwards.
//! - A failing setter leaves the previous value in place.
//! - `id` is only assigned or cleared by the repository layer.

use super::{EmployeeId, ReviewId};
use crate::repo::identity_map::Reconcile;
use crate::repo::{EmployeeLookup, RepoResult};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Earliest accepted review year.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Field validation failure for `Review`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// Invalid value: year before `MIN_REVIEW_YEAR`.
    YearTooEarly { year: i64 },
    /// Invalid value: summary empty or whitespace-only.
    BlankSummary,
    /// Invalid reference: no employee with this id at assignment time.
    UnknownEmployee { employee_id: EmployeeId },
}

impl ReviewValidationError {
    /// Returns whether this is a foreign-key failure rather than a bad value.
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, Self::UnknownEmployee { .. })
    }
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearTooEarly { year } => {
                write!(f, "year must be an integer >= {MIN_REVIEW_YEAR}, got {year}")
            }
            Self::BlankSummary => write!(f, "summary must be a non-empty string"),
            Self::UnknownEmployee { employee_id } => write!(
                f,
                "employee {employee_id} must exist before a review can reference it"
            ),
        }
    }
}

impl Error for ReviewValidationError {}

/// One performance review.
///
/// Fields are private: reads go through accessors and writes through the
/// `set_*` methods, so no `Review` value can carry an unchecked field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

impl Review {
    /// Builds an unsaved review.
    ///
    /// # Errors
    /// - `ReviewValidationError::YearTooEarly` / `BlankSummary` for bad values.
    /// - `ReviewValidationError::UnknownEmployee` when `employees` has no
    ///   record for `employee_id`.
    /// - Any storage error raised by the lookup itself.
    pub fn new<L: EmployeeLookup + ?Sized>(
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
        employees: &L,
    ) -> RepoResult<Self> {
        Ok(Self {
            id: None,
            year: check_year(year)?,
            summary: check_summary(summary.into())?,
            employee_id: check_employee(employee_id, employees)?,
        })
    }

    /// Rebuilds a review from a stored row.
    ///
    /// Value checks run again so corrupt rows are rejected. The employee
    /// reference is not re-checked on load.
    pub(crate) fn from_storage(
        id: ReviewId,
        year: i64,
        summary: String,
        employee_id: EmployeeId,
    ) -> Result<Self, ReviewValidationError> {
        Ok(Self {
            id: Some(id),
            year: check_year(year)?,
            summary: check_summary(summary)?,
            employee_id,
        })
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn set_year(&mut self, year: i64) -> Result<(), ReviewValidationError> {
        self.year = check_year(year)?;
        Ok(())
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewValidationError> {
        self.summary = check_summary(summary.into())?;
        Ok(())
    }

    /// Reassigns the review to another employee.
    ///
    /// Performs a synchronous lookup through `employees` before mutating.
    pub fn set_employee_id<L: EmployeeLookup + ?Sized>(
        &mut self,
        employee_id: EmployeeId,
        employees: &L,
    ) -> RepoResult<()> {
        self.employee_id = check_employee(employee_id, employees)?;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: ReviewId) {
        self.id = Some(id);
    }

    pub(crate) fn clear_id(&mut self) {
        self.id = None;
    }
}

impl Reconcile for Review {
    /// Copies field values of a freshly loaded row into this instance.
    fn refresh_from(&mut self, fresh: Review) {
        self.id = fresh.id;
        self.year = fresh.year;
        self.summary = fresh.summary;
        self.employee_id = fresh.employee_id;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Review {id}: ")?,
            None => write!(f, "<Review None: ")?,
        }
        write!(
            f,
            "{}, {}, Employee: {}>",
            self.year, self.summary, self.employee_id
        )
    }
}

fn check_year(year: i64) -> Result<i64, ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::YearTooEarly { year });
    }
    Ok(year)
}

fn check_summary(summary: String) -> Result<String, ReviewValidationError> {
    if summary.trim().is_empty() {
        return Err(ReviewValidationError::BlankSummary);
    }
    Ok(summary)
}

fn check_employee<L: EmployeeLookup + ?Sized>(
    employee_id: EmployeeId,
    employees: &L,
) -> RepoResult<EmployeeId> {
    match employees.find_employee(employee_id)? {
        Some(_) => Ok(employee_id),
        None => Err(ReviewValidationError::UnknownEmployee { employee_id }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::{Review, ReviewValidationError, MIN_REVIEW_YEAR};
    use crate::model::employee::Employee;
    use crate::model::EmployeeId;
    use crate::repo::{EmployeeLookup, RepoError, RepoResult};
    use std::cell::Cell;

    /// In-memory lookup that knows a fixed set of employee ids.
    struct KnownEmployees {
        ids: Vec<EmployeeId>,
        calls: Cell<usize>,
    }

    impl KnownEmployees {
        fn new(ids: &[EmployeeId]) -> Self {
            Self {
                ids: ids.to_vec(),
                calls: Cell::new(0),
            }
        }
    }

    impl EmployeeLookup for KnownEmployees {
        fn find_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.ids.contains(&id).then(|| {
                let mut employee = Employee::new("Stub", "Tester", 1);
                employee.id = Some(id);
                employee
            }))
        }
    }

    fn sample(employees: &KnownEmployees) -> Review {
        Review::new(2023, "Great work", 1, employees).unwrap()
    }

    #[test]
    fn new_review_is_unsaved() {
        let employees = KnownEmployees::new(&[1]);
        let review = sample(&employees);
        assert_eq!(review.id(), None);
        assert!(!review.is_persisted());
        assert_eq!(review.year(), 2023);
        assert_eq!(review.summary(), "Great work");
        assert_eq!(review.employee_id(), 1);
    }

    #[test]
    fn year_accepts_boundary_and_rejects_earlier() {
        let employees = KnownEmployees::new(&[1]);
        let mut review = sample(&employees);

        review.set_year(MIN_REVIEW_YEAR).unwrap();
        assert_eq!(review.year(), MIN_REVIEW_YEAR);

        let err = review.set_year(1999).unwrap_err();
        assert_eq!(err, ReviewValidationError::YearTooEarly { year: 1999 });
        assert_eq!(review.year(), MIN_REVIEW_YEAR);

        assert!(review.set_year(-5).is_err());
        assert_eq!(review.year(), MIN_REVIEW_YEAR);
    }

    #[test]
    fn summary_keeps_untrimmed_text() {
        let employees = KnownEmployees::new(&[1]);
        let mut review = sample(&employees);

        review.set_summary("  padded  ").unwrap();
        assert_eq!(review.summary(), "  padded  ");

        for blank in ["", "   ", "\n\t"] {
            assert_eq!(
                review.set_summary(blank).unwrap_err(),
                ReviewValidationError::BlankSummary
            );
        }
        assert_eq!(review.summary(), "  padded  ");
    }

    #[test]
    fn employee_id_requires_existing_employee() {
        let employees = KnownEmployees::new(&[1, 2]);
        let mut review = sample(&employees);

        review.set_employee_id(2, &employees).unwrap();
        assert_eq!(review.employee_id(), 2);

        let err = review.set_employee_id(999, &employees).unwrap_err();
        match err {
            RepoError::ReviewValidation(inner) => {
                assert!(inner.is_invalid_reference());
                assert_eq!(
                    inner,
                    ReviewValidationError::UnknownEmployee { employee_id: 999 }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(review.employee_id(), 2);
    }

    #[test]
    fn constructor_checks_values_before_lookup() {
        let employees = KnownEmployees::new(&[1]);

        let err = Review::new(1999, "fine", 1, &employees).unwrap_err();
        assert!(matches!(
            err,
            RepoError::ReviewValidation(ReviewValidationError::YearTooEarly { year: 1999 })
        ));
        assert_eq!(employees.calls.get(), 0);

        let err = Review::new(2023, " ", 1, &employees).unwrap_err();
        assert!(matches!(
            err,
            RepoError::ReviewValidation(ReviewValidationError::BlankSummary)
        ));
        assert_eq!(employees.calls.get(), 0);
    }

    #[test]
    fn display_matches_record_format() {
        let employees = KnownEmployees::new(&[1]);
        let mut review = sample(&employees);
        assert_eq!(
            review.to_string(),
            "<Review None: 2023, Great work, Employee: 1>"
        );

        review.assign_id(7);
        assert_eq!(review.to_string(), "<Review 7: 2023, Great work, Employee: 1>");
    }

    #[test]
    fn from_storage_rejects_corrupt_values() {
        assert_eq!(
            Review::from_storage(1, 1980, "old".to_string(), 1).unwrap_err(),
            ReviewValidationError::YearTooEarly { year: 1980 }
        );
        let review = Review::from_storage(3, 2024, "ok".to_string(), 42).unwrap();
        assert_eq!(review.id(), Some(3));
        assert_eq!(review.employee_id(), 42);
    }
}
