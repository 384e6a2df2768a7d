//! Review use-case service.
//!
//! # Responsibility
//! - Provide stable review entry points for CLI and other front ends.
//! - Combine "validate, mutate, persist" steps that callers would otherwise
//!   repeat.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - A rejected value leaves both the instance and its row untouched.

use crate::model::{EmployeeId, ReviewId};
use crate::repo::review_repo::{read_review, write_review};
use crate::repo::{RepoError, RepoResult, ReviewHandle, ReviewRepository};

/// Use-case service wrapper for review operations.
pub struct ReviewService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Ensures the `reviews` table exists.
    pub fn prepare_storage(&self) -> RepoResult<()> {
        self.repo.create_table()
    }

    pub fn create_review(
        &mut self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<ReviewHandle> {
        self.repo.create(year, summary, employee_id)
    }

    pub fn get_review(&mut self, id: ReviewId) -> RepoResult<Option<ReviewHandle>> {
        self.repo.find_by_id(id)
    }

    pub fn list_reviews(&mut self) -> RepoResult<Vec<ReviewHandle>> {
        self.repo.get_all()
    }

    pub fn reviews_for_employee(
        &mut self,
        employee_id: EmployeeId,
    ) -> RepoResult<Vec<ReviewHandle>> {
        self.repo.find_by_employee(employee_id)
    }

    /// Moves a persisted review to another employee and writes it back.
    ///
    /// # Errors
    /// - Invalid reference when `employee_id` does not exist.
    /// - `RepoError::NotPersisted` when the review was never saved.
    /// - `RepoError::InstanceBorrowed` when the handle is borrowed elsewhere.
    pub fn reassign(&mut self, review: &ReviewHandle, employee_id: EmployeeId) -> RepoResult<()> {
        ensure_persisted(review)?;
        write_review(review)?.set_employee_id(employee_id, self.repo.employees())?;
        self.repo.update(review)
    }

    /// Replaces the summary of a persisted review and writes it back.
    pub fn revise_summary(&mut self, review: &ReviewHandle, summary: &str) -> RepoResult<()> {
        ensure_persisted(review)?;
        write_review(review)?.set_summary(summary)?;
        self.repo.update(review)
    }

    pub fn remove_review(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        self.repo.delete(review)
    }

    /// Gives direct access to the wrapped repository.
    pub fn repository(&mut self) -> &mut R {
        &mut self.repo
    }
}

fn ensure_persisted(review: &ReviewHandle) -> RepoResult<()> {
    if read_review(review)?.is_persisted() {
        Ok(())
    } else {
        Err(RepoError::NotPersisted { entity: "review" })
    }
}
