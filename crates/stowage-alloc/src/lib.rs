//! Host allocator plumbing for Stowage containers.
//!
//! Containers never call the global allocator directly. They own a
//! [`RawBuffer`], a run of uninitialised slots, and decide themselves
//! which slots hold live values. Every allocation and release made by a
//! buffer is recorded in the per-thread [`stats`] counters.
//!
//! # Architecture
//!
//! ```text
//! GrowingArray / HeapArray (element lifetimes)
//! └── RawBuffer<T> (slot storage: allocate, relocate, release)
//!     ├── std::alloc (one process-wide allocation strategy)
//!     └── stats (per-thread counters)
//! ```
//!
//! This crate and `stowage-array` are the only ones that contain
//! `unsafe` code. All of it here lives in `raw.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod raw;
pub mod stats;

pub use raw::RawBuffer;
pub use stats::AllocStats;
