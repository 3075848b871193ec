// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ordered set that can be mutated while it is being traversed
//!
//! [`MutIterableCollection::for_each`] visits members in ascending order.
//! Inserts and deletes issued from inside the callback are buffered:
//!
//! - a delete hides the member from the rest of the current pass at once,
//! - an insert becomes visible on the next internal pass.
//!
//! After the first pass the buffers are applied and the freshly inserted
//! members are visited, repeating until a pass produces no new inserts.
//! A callback that inserts on every visit never terminates; that is the
//! caller's responsibility.
//!
//! Removal state lives in the collection (the delete buffer), not on the
//! members, so a value held by two collections cannot be hidden in one by a
//! delete issued against the other.

use std::borrow::Borrow;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::ops::Bound;

#[cfg(feature = "profiling")]
use tracing::info_span;

use crate::error::{EventError, Result};

struct CollectionState<T> {
    members: BTreeSet<T>,
    insert_buffer: BTreeSet<T>,
    /// Members deleted during the active traversal. Always a subset of `members`.
    delete_buffer: BTreeSet<T>,
    traversing: bool,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            members: BTreeSet::new(),
            insert_buffer: BTreeSet::new(),
            delete_buffer: BTreeSet::new(),
            traversing: false,
        }
    }
}

/// Ordered set supporting insert/delete during its own traversal
///
/// All methods take `&self` so that a callback running inside
/// [`for_each`](Self::for_each) can reach the collection it is dispatched from.
pub struct MutIterableCollection<T: Ord + Clone> {
    state: RefCell<CollectionState<T>>,
}

impl<T: Ord + Clone> MutIterableCollection<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            state: RefCell::new(CollectionState::default()),
        }
    }

    /// Insert a value
    ///
    /// Outside a traversal this goes straight into the ordered set. During a
    /// traversal the value is buffered until the next internal pass; inserting
    /// a member that was deleted earlier in the same pass cancels the delete.
    ///
    /// Returns `true` if the value was not already logically present.
    pub fn insert(&self, value: T) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.traversing {
            return state.members.insert(value);
        }

        if state.delete_buffer.remove(&value) {
            return true;
        }
        if state.members.contains(&value) {
            return false;
        }
        state.insert_buffer.insert(value)
    }

    /// Delete a value
    ///
    /// During a traversal the member is hidden immediately and physically
    /// removed when the pass ends. Deleting a value that is not present is a
    /// no-op returning `false`.
    pub fn delete<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut state = self.state.borrow_mut();
        if !state.traversing {
            return state.members.remove(value);
        }

        if state.insert_buffer.remove(value) {
            return true;
        }
        let Some(member) = state.members.get(value).cloned() else {
            return false;
        };
        state.delete_buffer.insert(member)
    }

    /// Visit every live member in ascending order
    ///
    /// The first error returned by `f` aborts the traversal. Mutations buffered
    /// up to that point are still applied before the error is returned.
    pub fn for_each<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&T) -> Result<()>,
    {
        #[cfg(feature = "profiling")]
        let _span = info_span!("collection_for_each", len = self.len()).entered();

        self.begin_traversal()?;
        let result = self.traverse(&mut f);
        self.apply_buffers();
        self.state.borrow_mut().traversing = false;
        result
    }

    fn begin_traversal(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.traversing {
            return Err(EventError::TraversalActive);
        }
        state.traversing = true;
        Ok(())
    }

    fn traverse<F>(&self, f: &mut F) -> Result<()>
    where
        F: FnMut(&T) -> Result<()>,
    {
        // The member set is frozen while traversing, so a cursor over it is stable.
        let mut cursor: Option<T> = None;
        while let Some(value) = self.next_live_after(cursor.as_ref()) {
            f(&value)?;
            cursor = Some(value);
        }

        loop {
            let inserted = self.apply_buffers();
            if inserted.is_empty() {
                return Ok(());
            }
            for value in &inserted {
                if self.is_removed(value) {
                    continue;
                }
                f(value)?;
            }
        }
    }

    fn next_live_after(&self, cursor: Option<&T>) -> Option<T> {
        let state = self.state.borrow();
        let lower = match cursor {
            Some(value) => Bound::Excluded(value),
            None => Bound::Unbounded,
        };
        state
            .members
            .range::<T, _>((lower, Bound::Unbounded))
            .find(|value| !state.delete_buffer.contains(*value))
            .cloned()
    }

    /// Apply buffered deletes then inserts, returning the inserted batch
    fn apply_buffers(&self) -> BTreeSet<T> {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        for value in std::mem::take(&mut state.delete_buffer) {
            state.members.remove(&value);
        }
        let inserted = std::mem::take(&mut state.insert_buffer);
        for value in &inserted {
            state.members.insert(value.clone());
        }
        inserted
    }

    /// Whether `value` was deleted during the active traversal
    pub fn is_removed<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let state = self.state.borrow();
        state.traversing && state.delete_buffer.contains(value)
    }

    /// Whether `value` is logically present, counting buffered mutations
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let state = self.state.borrow();
        (state.members.contains(value) && !state.delete_buffer.contains(value))
            || state.insert_buffer.contains(value)
    }

    /// Remove every member
    ///
    /// Fails with [`EventError::TraversalActive`] during a traversal.
    pub fn clear(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.traversing {
            return Err(EventError::TraversalActive);
        }
        state.members.clear();
        Ok(())
    }

    /// Number of members in the primary set (buffered inserts excluded)
    pub fn len(&self) -> usize {
        self.state.borrow().members.len()
    }

    /// Check if the primary set is empty
    pub fn is_empty(&self) -> bool {
        self.state.borrow().members.is_empty()
    }

    /// Check if a traversal is running
    pub fn is_traversing(&self) -> bool {
        self.state.borrow().traversing
    }

    /// Members of the primary set in ascending order
    pub fn to_vec(&self) -> Vec<T> {
        self.state.borrow().members.iter().cloned().collect()
    }
}

impl<T: Ord + Clone> Default for MutIterableCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + std::fmt::Debug> std::fmt::Debug for MutIterableCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MutIterableCollection")
            .field("members", &state.members)
            .field("traversing", &state.traversing)
            .finish()
    }
}
