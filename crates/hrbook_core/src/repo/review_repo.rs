//! Review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create and drop the `reviews` table.
//! - Provide save/update/delete/find over `reviews`, keeping one live
//!   instance per persisted row through an owned `IdentityMap`.
//!
//! # Invariants
//! - A review with `id = Some(n)` that passed through this repository is
//!   registered under `n` until it is deleted or the map is cleared.
//! - Every load is reconciled: a known id refreshes the existing instance in
//!   place instead of producing a second one.
//! - Validation runs before any SQL mutation; a rejected value writes
//!   nothing and leaves the identity map untouched.
//! - `save()` on a persisted review is a no-op, not an upsert.
//! - `drop_table()` does not clear the identity map.
//! - `delete()` always returns the instance to the unsaved state, even when
//!   the row was already gone.
//! - An instance borrowed elsewhere yields `RepoError::InstanceBorrowed`
//!   before any SQL runs or any map entry changes.

use super::identity_map::IdentityMap;
use super::{EmployeeLookup, RepoError, RepoResult};
use crate::db::schema::{CREATE_REVIEWS_SQL, DROP_REVIEWS_SQL, REVIEWS_TABLE};
use crate::model::review::Review;
use crate::model::{EmployeeId, ReviewId};
use log::{debug, warn};
use rusqlite::{params, Connection, Params, Row};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

const REVIEW_SELECT_SQL: &str = "SELECT id, year, summary, employee_id FROM reviews";

/// Shared handle to the single live instance of a review row.
pub type ReviewHandle = Rc<RefCell<Review>>;

/// Wraps an unsaved review so it can be passed to `save()`.
pub fn review_handle(review: Review) -> ReviewHandle {
    Rc::new(RefCell::new(review))
}

/// Shared borrow of `review`, or `InstanceBorrowed` while it is mutably held.
pub fn read_review(review: &ReviewHandle) -> RepoResult<Ref<'_, Review>> {
    review
        .try_borrow()
        .map_err(|_| RepoError::InstanceBorrowed { id: None })
}

/// Exclusive borrow of `review`, or `InstanceBorrowed` while it is held.
pub fn write_review(review: &ReviewHandle) -> RepoResult<RefMut<'_, Review>> {
    review
        .try_borrow_mut()
        .map_err(|_| RepoError::InstanceBorrowed { id: None })
}

/// Repository interface for review records.
pub trait ReviewRepository {
    /// Creates the `reviews` table if it does not exist.
    fn create_table(&self) -> RepoResult<()>;
    /// Drops the `reviews` table if it exists.
    fn drop_table(&self) -> RepoResult<()>;
    /// Employee lookup used to validate `employee_id` assignments.
    fn employees(&self) -> &dyn EmployeeLookup;
    /// Validates and immediately saves a new review.
    fn create(
        &mut self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<ReviewHandle>;
    /// Inserts an unsaved review; does nothing when `id` is already set.
    fn save(&mut self, review: &ReviewHandle) -> RepoResult<()>;
    /// Writes current field values to the row matching `id`.
    fn update(&mut self, review: &ReviewHandle) -> RepoResult<()>;
    /// Deletes the row matching `id`, forgets the instance and resets `id`
    /// to `None`. A row that is already gone is not an error.
    fn delete(&mut self, review: &ReviewHandle) -> RepoResult<()>;
    /// Loads one review; `Ok(None)` when no row has this id.
    fn find_by_id(&mut self, id: ReviewId) -> RepoResult<Option<ReviewHandle>>;
    /// Loads every review in storage row order.
    fn get_all(&mut self) -> RepoResult<Vec<ReviewHandle>>;
    /// Loads every review written for one employee, in storage row order.
    fn find_by_employee(&mut self, employee_id: EmployeeId) -> RepoResult<Vec<ReviewHandle>>;
    /// Number of instances currently tracked by the identity map.
    fn identity_map_len(&self) -> usize;
    /// Forgets every tracked instance. Existing handles keep their values.
    fn clear_identity_map(&mut self);
}

/// SQLite-backed review repository owning its identity map.
///
/// The identity map lives as long as the repository, which in turn borrows
/// the connection, so cached instances never outlive the connection scope.
pub struct SqliteReviewRepository<'conn, L: EmployeeLookup> {
    conn: &'conn Connection,
    employees: L,
    identity_map: IdentityMap<Review>,
}

impl<'conn, L: EmployeeLookup> SqliteReviewRepository<'conn, L> {
    pub fn new(conn: &'conn Connection, employees: L) -> Self {
        Self {
            conn,
            employees,
            identity_map: IdentityMap::new(),
        }
    }

    fn load_rows<P: Params>(
        &mut self,
        where_clause: &str,
        params: P,
    ) -> RepoResult<Vec<ReviewHandle>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL}{where_clause};"))?;
        let mut rows = stmt.query(params)?;
        let mut loaded = Vec::new();
        while let Some(row) = rows.next()? {
            loaded.push(parse_review_row(row)?);
        }

        // All rows parse and every target instance is free before the
        // identity map is touched.
        if let Some(id) = self
            .identity_map
            .first_borrowed(loaded.iter().map(|(id, _)| *id))
        {
            return Err(RepoError::InstanceBorrowed { id: Some(id) });
        }
        loaded
            .into_iter()
            .map(|(id, review)| {
                self.identity_map
                    .reconcile(id, review)
                    .map_err(|_| RepoError::InstanceBorrowed { id: Some(id) })
            })
            .collect()
    }
}

impl<L: EmployeeLookup> ReviewRepository for SqliteReviewRepository<'_, L> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_REVIEWS_SQL)?;
        debug!("event=review_create_table module=repo status=ok");
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(DROP_REVIEWS_SQL)?;
        if !self.identity_map.is_empty() {
            warn!(
                "event=review_drop_table module=repo status=ok stale_entries={}",
                self.identity_map.len()
            );
        }
        Ok(())
    }

    fn employees(&self) -> &dyn EmployeeLookup {
        &self.employees
    }

    fn create(
        &mut self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<ReviewHandle> {
        let review = review_handle(Review::new(year, summary, employee_id, &self.employees)?);
        self.save(&review)?;
        Ok(review)
    }

    fn save(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        let mut current = write_review(review)?;
        if let Some(id) = current.id() {
            debug!("event=review_save module=repo status=skipped review_id={id}");
            return Ok(());
        }

        self.conn.execute(
            "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
            params![current.year(), current.summary(), current.employee_id()],
        )?;
        let id = self.conn.last_insert_rowid();
        current.assign_id(id);
        drop(current);

        self.identity_map.register(id, review);
        debug!("event=review_save module=repo status=ok review_id={id}");
        Ok(())
    }

    fn update(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        let id = {
            let current = read_review(review)?;
            let id = current.id().ok_or(RepoError::NotPersisted { entity: "review" })?;

            let changed = self.conn.execute(
                "UPDATE reviews
                 SET year = ?1, summary = ?2, employee_id = ?3
                 WHERE id = ?4;",
                params![current.year(), current.summary(), current.employee_id(), id],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound {
                    table: REVIEWS_TABLE,
                    id,
                });
            }
            id
        };

        self.identity_map.register(id, review);
        debug!("event=review_update module=repo status=ok review_id={id}");
        Ok(())
    }

    fn delete(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        let mut current = write_review(review)?;
        let id = current.id().ok_or(RepoError::NotPersisted { entity: "review" })?;

        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id])?;

        self.identity_map.remove(id);
        current.clear_id();
        if changed == 0 {
            warn!("event=review_delete module=repo status=row_missing review_id={id}");
        } else {
            debug!("event=review_delete module=repo status=ok review_id={id}");
        }
        Ok(())
    }

    fn find_by_id(&mut self, id: ReviewId) -> RepoResult<Option<ReviewHandle>> {
        let mut found = self.load_rows(" WHERE id = ?1", [id])?;
        Ok(found.pop())
    }

    fn get_all(&mut self) -> RepoResult<Vec<ReviewHandle>> {
        self.load_rows("", [])
    }

    fn find_by_employee(&mut self, employee_id: EmployeeId) -> RepoResult<Vec<ReviewHandle>> {
        self.load_rows(" WHERE employee_id = ?1", [employee_id])
    }

    fn identity_map_len(&self) -> usize {
        self.identity_map.len()
    }

    fn clear_identity_map(&mut self) {
        self.identity_map.clear();
    }
}

fn parse_review_row(row: &Row<'_>) -> RepoResult<(ReviewId, Review)> {
    let id: ReviewId = row.get("id")?;
    let review = Review::from_storage(
        id,
        row.get("year")?,
        row.get("summary")?,
        row.get("employee_id")?,
    )
    .map_err(|err| RepoError::InvalidData(format!("reviews row {id}: {err}")))?;
    Ok((id, review))
}
