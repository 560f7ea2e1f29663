//! Test utilities for Stowage development.
//!
//! [`LivenessBoard`] hands out [`Tracked`] values, each with its own
//! liveness flag, so tests can check that a container destroys exactly
//! the objects it constructed: no leaks, no double drops, no drops of
//! slots that never held a value.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// State of one tracked object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    Destroyed,
}

struct Board {
    flags: RefCell<Vec<Liveness>>,
    clone_budget: Cell<Option<usize>>,
}

/// Registry of liveness flags shared by every [`Tracked`] it creates.
///
/// Cheap to clone; clones observe the same flags.
#[derive(Clone)]
pub struct LivenessBoard {
    board: Rc<Board>,
}

impl LivenessBoard {
    pub fn new() -> Self {
        Self {
            board: Rc::new(Board {
                flags: RefCell::new(Vec::new()),
                clone_budget: Cell::new(None),
            }),
        }
    }

    /// Wrap `value` with a fresh liveness flag.
    pub fn track<V>(&self, value: V) -> Tracked<V> {
        let mut flags = self.board.flags.borrow_mut();
        let id = flags.len();
        flags.push(Liveness::Alive);
        Tracked {
            id,
            value,
            board: self.clone(),
        }
    }

    /// Make the `n + 1`-th clone from now panic.
    ///
    /// Used to exercise unwinding out of `duplicate()` and `filled()`.
    pub fn fail_clone_after(&self, n: usize) {
        self.board.clone_budget.set(Some(n));
    }

    /// Number of objects ever created through this board.
    pub fn created(&self) -> usize {
        self.board.flags.borrow().len()
    }

    /// Number of objects still alive.
    pub fn alive(&self) -> usize {
        self.count(Liveness::Alive)
    }

    /// Number of objects destroyed.
    pub fn destroyed(&self) -> usize {
        self.count(Liveness::Destroyed)
    }

    /// State of the object with the given id.
    ///
    /// # Panics
    ///
    /// Panics if no object with that id was created.
    pub fn state(&self, id: usize) -> Liveness {
        self.board.flags.borrow()[id]
    }

    fn count(&self, state: Liveness) -> usize {
        self.board
            .flags
            .borrow()
            .iter()
            .filter(|&&s| s == state)
            .count()
    }

    fn take_clone_permit(&self) {
        if let Some(left) = self.board.clone_budget.get() {
            if left == 0 {
                self.board.clone_budget.set(None);
                panic!("tracked clone budget exhausted");
            }
            self.board.clone_budget.set(Some(left - 1));
        }
    }

    fn destroy(&self, id: usize) {
        let mut flags = self.board.flags.borrow_mut();
        assert!(
            flags[id] == Liveness::Alive,
            "tracked value {id} dropped twice"
        );
        flags[id] = Liveness::Destroyed;
    }
}

impl Default for LivenessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LivenessBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LivenessBoard")
            .field("created", &self.created())
            .field("alive", &self.alive())
            .finish()
    }
}

/// A value whose destruction is recorded on a [`LivenessBoard`].
///
/// Cloning registers a new object with its own flag. Dropping the same
/// object twice panics.
pub struct Tracked<V = u32> {
    id: usize,
    value: V,
    board: LivenessBoard,
}

impl<V> Tracked<V> {
    /// Identifier of this object's flag on the board.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<V: Clone> Clone for Tracked<V> {
    fn clone(&self) -> Self {
        self.board.take_clone_permit();
        self.board.track(self.value.clone())
    }
}

impl<V> Drop for Tracked<V> {
    fn drop(&mut self) {
        self.board.destroy(self.id);
    }
}

impl<V: PartialEq> PartialEq for Tracked<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: fmt::Debug> fmt::Debug for Tracked<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("id", &self.id)
            .field("value", &self.value)
            .finish()
    }
}
