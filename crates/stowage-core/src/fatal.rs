//! Fail-fast termination paths.
//!
//! Every container routes invalid accesses through these helpers so the
//! panic message is uniform and the caller's location is reported. Built
//! with `panic = "abort"` (the expected setting for embedded targets)
//! each of these terminates the process.

use crate::error::ArrayError;

/// Terminate on an index at or past `length`.
#[cold]
#[inline(never)]
#[track_caller]
pub fn out_of_bounds(index: usize, length: usize) -> ! {
    panic!("{}", ArrayError::OutOfBounds { index, length })
}

/// Terminate on a capacity whose byte size cannot be represented.
#[cold]
#[inline(never)]
#[track_caller]
pub fn capacity_overflow() -> ! {
    panic!(
        "{}",
        ArrayError::AllocationFailure {
            requested_bytes: None
        }
    )
}

/// Terminate on an allocator refusal of `requested_bytes`.
#[cold]
#[inline(never)]
#[track_caller]
pub fn allocation_failure(requested_bytes: usize) -> ! {
    panic!(
        "{}",
        ArrayError::AllocationFailure {
            requested_bytes: Some(requested_bytes)
        }
    )
}

/// Return `index` unchanged if it addresses one of `length` live slots,
/// terminate otherwise.
#[inline]
#[track_caller]
pub fn check_index(index: usize, length: usize) -> usize {
    if index >= length {
        out_of_bounds(index, length);
    }
    index
}
