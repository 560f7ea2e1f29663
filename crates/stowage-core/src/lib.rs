//! Core types for the Stowage container workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! pieces every container shares: the two error kinds, the capacity
//! growth policy, and the fail-fast helpers that turn an invalid access
//! into a non-recoverable panic.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fatal;

pub use config::GrowthPolicy;
pub use error::{ArrayError, ConfigError};

/// Length of a plain array, usable in constant contexts.
///
/// ```
/// const PINS: [u8; 4] = [2, 3, 5, 7];
/// const PIN_COUNT: usize = stowage_core::length_of(&PINS);
/// assert_eq!(PIN_COUNT, 4);
/// ```
pub const fn length_of<T, const N: usize>(_array: &[T; N]) -> usize {
    N
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_of_reports_array_length() {
        assert_eq!(length_of(&[0u32; 7]), 7);
        assert_eq!(length_of::<u8, 0>(&[]), 0);
    }

    #[test]
    fn length_of_is_const() {
        const LEN: usize = length_of(&["a", "b", "c"]);
        assert_eq!(LEN, 3);
    }
}
