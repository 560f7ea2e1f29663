//! Stowage: bounds-checked arrays for targets with small, manually
//! managed heaps.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Stowage sub-crates. For most users, adding `stowage` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use stowage::prelude::*;
//!
//! // Pin map known at compile time.
//! const PINS: StackArray<u8, 3> = StackArray::new([2, 3, 5]);
//! const LED: u8 = PINS.read(0);
//!
//! // Sample buffer sized from run-time configuration.
//! let mut samples = HeapArray::<u16>::new(8);
//! samples[7] = 1023;
//!
//! // Event log that grows ~1.5x at a time.
//! let mut events = GrowingArray::new();
//! events.push(LED);
//! events.push(samples[7] as u8);
//! assert_eq!(events.length(), 2);
//!
//! // Explicit copies only; moves leave an empty source behind.
//! let backup = events.duplicate();
//! let moved = events.take();
//! assert_eq!(events.length(), 0);
//! assert_eq!(moved, backup);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `stowage-array` | `StackArray`, `HeapArray`, `GrowingArray` |
//! | [`types`] | `stowage-core` | Errors, growth policy, fail-fast helpers |
//! | [`memory`] | `stowage-alloc` | `RawBuffer` slot storage, allocation statistics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The three containers (`stowage-array`).
pub use stowage_array as array;

/// Error types, growth policy and fail-fast helpers (`stowage-core`).
pub use stowage_core as types;

/// Slot storage and allocation statistics (`stowage-alloc`).
///
/// [`memory::stats::snapshot`] reports how many allocations the
/// containers on the current thread have made and released.
pub use stowage_alloc as memory;

/// Common imports for typical Stowage usage.
///
/// ```rust
/// use stowage::prelude::*;
/// ```
pub mod prelude {
    // Containers
    pub use stowage_array::{GrowingArray, HeapArray, StackArray};

    // Configuration and errors
    pub use stowage_core::{length_of, ArrayError, ConfigError, GrowthPolicy};

    // Statistics
    pub use stowage_alloc::AllocStats;
}
