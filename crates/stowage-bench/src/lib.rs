//! Benchmark workloads for Stowage containers.
//!
//! - [`PUSH_COUNTS`]: element counts used by the push benchmarks
//! - [`fill_growing`]: build a `GrowingArray` by repeated push
//! - [`sample`]: deterministic element values

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use stowage_array::GrowingArray;
use stowage_core::GrowthPolicy;

/// Push counts: a sensor burst, a log page, and a full-RAM stress case.
pub const PUSH_COUNTS: [usize; 3] = [64, 1_000, 16_384];

/// Deterministic value for element `i` (a 32-bit LCG step, so the
/// optimiser cannot fold the pushes).
pub fn sample(i: usize) -> u32 {
    (i as u32).wrapping_mul(1_664_525).wrapping_add(1_013_904_223)
}

/// Push `n` samples into a fresh array that grows by `policy`.
pub fn fill_growing(n: usize, policy: GrowthPolicy) -> GrowingArray<u32> {
    let mut array = GrowingArray::with_growth(policy);
    for i in 0..n {
        array.push(sample(i));
    }
    array
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_growing_pushes_samples_in_order() {
        let a = fill_growing(10, GrowthPolicy::DEFAULT);
        assert_eq!(a.length(), 10);
        assert_eq!(a[3], sample(3));
    }

    #[test]
    fn samples_differ() {
        assert_ne!(sample(0), sample(1));
    }
}
