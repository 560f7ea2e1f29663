//! Bounds-checked arrays for targets with small, manually managed heaps.
//!
//! Three independent containers share one contract (checked indexed
//! access and a length query) but no common trait:
//!
//! - [`StackArray<T, N>`]: `N` values inline, `N` part of the type.
//! - [`HeapArray<T>`]: one allocation whose length is fixed when it is
//!   constructed.
//! - [`GrowingArray<T>`]: push-only dynamic array with ~1.5x geometric
//!   capacity growth.
//!
//! # Failure policy
//!
//! Indexing past the live length and allocator refusal are fatal. They
//! panic (abort under `panic = "abort"`) through
//! [`stowage_core::fatal`]; no primary access path returns them as
//! values. `get`/`get_mut` exist for callers that want to probe.
//!
//! # Ownership
//!
//! Heap-backed containers are move-only: they do not implement `Clone`.
//! `duplicate()` is the one way to obtain an independent copy, and
//! `take()` moves the contents out of a `&mut` place, leaving an empty,
//! unallocated container behind.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod growing;
pub mod heap;
pub mod stack;

pub use growing::GrowingArray;
pub use heap::HeapArray;
pub use stack::StackArray;
