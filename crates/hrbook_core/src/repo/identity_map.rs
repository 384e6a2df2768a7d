//! Identity map keyed by row id.
//!
//! # Responsibility
//! - Keep at most one live shared instance per persisted row.
//! - Reconcile freshly loaded rows into the instance callers already hold.
//!
//! # Invariants
//! - Entries are added by saves and loads and removed by deletes only; the
//!   map is never expired or bounded.
//! - Reconciling a known id mutates the registered instance in place and
//!   returns that same `Rc`.
//! - Reconciling never panics on an instance that is borrowed elsewhere;
//!   `first_borrowed` reports it before any entry is touched.

use std::cell::{BorrowMutError, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Records that can absorb a fresher copy of themselves.
pub trait Reconcile {
    fn refresh_from(&mut self, fresh: Self);
}

/// Explicit identity registry, owned by one repository.
#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: HashMap<i64, Rc<RefCell<T>>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> IdentityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registered instance for `id`, if any.
    pub fn get(&self, id: i64) -> Option<Rc<RefCell<T>>> {
        self.entries.get(&id).cloned()
    }

    /// Returns the first of `ids` whose registered instance cannot be
    /// mutably borrowed right now.
    pub fn first_borrowed(&self, ids: impl IntoIterator<Item = i64>) -> Option<i64> {
        ids.into_iter().find(|id| {
            self.entries
                .get(id)
                .is_some_and(|existing| existing.try_borrow_mut().is_err())
        })
    }

    /// Registers `instance` under `id`, replacing any previous entry.
    pub fn register(&mut self, id: i64, instance: &Rc<RefCell<T>>) {
        self.entries.insert(id, Rc::clone(instance));
    }

    /// Removes and returns the entry for `id`.
    pub fn remove(&mut self, id: i64) -> Option<Rc<RefCell<T>>> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Reconcile> IdentityMap<T> {
    /// Applies a loaded row to the map.
    ///
    /// Known id: the existing instance is refreshed in place and returned.
    /// Unknown id: `fresh` becomes a new registered instance.
    ///
    /// Fails without changing the map when the existing instance is
    /// borrowed.
    pub fn reconcile(&mut self, id: i64, fresh: T) -> Result<Rc<RefCell<T>>, BorrowMutError> {
        if let Some(existing) = self.entries.get(&id) {
            existing.try_borrow_mut()?.refresh_from(fresh);
            return Ok(Rc::clone(existing));
        }

        let instance = Rc::new(RefCell::new(fresh));
        self.entries.insert(id, Rc::clone(&instance));
        Ok(instance)
    }
}
