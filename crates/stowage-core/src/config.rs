//! Capacity growth configuration for `GrowingArray`.

use crate::error::ConfigError;
use crate::fatal;

/// Rule mapping a full buffer's capacity to the capacity of its
/// replacement.
///
/// An empty buffer grows to `first_capacity`; a non-empty one to
/// `(capacity * numerator + bias) / denominator`. The default is the
/// ~1.5x rule `0 → 1 → 2 → 3 → 5 → 8 → 12 → 18 → …`, gentler than
/// doubling so that a full buffer wastes less RAM on small targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GrowthPolicy {
    /// Capacity of the first allocation.
    pub first_capacity: usize,
    /// Growth factor numerator.
    pub numerator: usize,
    /// Growth factor denominator.
    pub denominator: usize,
    /// Added before the division; lets small capacities round up.
    pub bias: usize,
}

impl GrowthPolicy {
    /// The ~1.5x rule: `(capacity * 3 + 1) / 2`, starting at 1.
    pub const DEFAULT: Self = Self {
        first_capacity: 1,
        numerator: 3,
        denominator: 2,
        bias: 1,
    };

    /// Plain doubling, starting at 1.
    pub const DOUBLING: Self = Self {
        first_capacity: 1,
        numerator: 2,
        denominator: 1,
        bias: 0,
    };

    /// Check that the policy strictly grows every capacity.
    ///
    /// With `numerator > denominator` the increment
    /// `next_capacity(c) - c` never shrinks as `c` grows, so checking the
    /// smallest non-empty capacity covers all of them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.denominator == 0 {
            return Err(ConfigError::ZeroDenominator);
        }
        if self.first_capacity == 0 {
            return Err(ConfigError::ZeroFirstCapacity);
        }
        if self.numerator <= self.denominator {
            return Err(ConfigError::NotGeometric {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        let next = self.numerator.saturating_add(self.bias) / self.denominator;
        if next < 2 {
            return Err(ConfigError::NonIncreasing { capacity: 1, next });
        }
        Ok(())
    }

    /// Capacity to grow to from `capacity`, or `None` on arithmetic overflow.
    pub fn checked_next_capacity(&self, capacity: usize) -> Option<usize> {
        if capacity == 0 {
            return Some(self.first_capacity);
        }
        let scaled = capacity.checked_mul(self.numerator)?.checked_add(self.bias)?;
        Some(scaled / self.denominator)
    }

    /// Capacity to grow to from `capacity`.
    ///
    /// # Panics
    ///
    /// Terminates with a capacity overflow if the result does not fit
    /// in `usize`.
    #[track_caller]
    pub fn next_capacity(&self, capacity: usize) -> usize {
        match self.checked_next_capacity(capacity) {
            Some(next) => next,
            None => fatal::capacity_overflow(),
        }
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sequence_is_one_and_a_half() {
        let policy = GrowthPolicy::default();
        let mut capacity = 0;
        let mut seen = Vec::new();
        for _ in 0..8 {
            capacity = policy.next_capacity(capacity);
            seen.push(capacity);
        }
        assert_eq!(seen, vec![1, 2, 3, 5, 8, 12, 18, 27]);
    }

    #[test]
    fn doubling_sequence() {
        let policy = GrowthPolicy::DOUBLING;
        assert_eq!(policy.next_capacity(0), 1);
        assert_eq!(policy.next_capacity(1), 2);
        assert_eq!(policy.next_capacity(64), 128);
    }

    #[test]
    fn builtin_policies_validate() {
        assert!(GrowthPolicy::DEFAULT.validate().is_ok());
        assert!(GrowthPolicy::DOUBLING.validate().is_ok());
    }

    #[test]
    fn zero_denominator_rejected() {
        let policy = GrowthPolicy {
            denominator: 0,
            ..GrowthPolicy::DEFAULT
        };
        assert_eq!(policy.validate(), Err(ConfigError::ZeroDenominator));
    }

    #[test]
    fn zero_first_capacity_rejected() {
        let policy = GrowthPolicy {
            first_capacity: 0,
            ..GrowthPolicy::DEFAULT
        };
        assert_eq!(policy.validate(), Err(ConfigError::ZeroFirstCapacity));
    }

    #[test]
    fn linear_factor_rejected() {
        let policy = GrowthPolicy {
            numerator: 2,
            denominator: 2,
            ..GrowthPolicy::DEFAULT
        };
        match policy.validate() {
            Err(ConfigError::NotGeometric { .. }) => {}
            other => panic!("expected NotGeometric, got {other:?}"),
        }
    }

    #[test]
    fn stalling_small_capacity_rejected() {
        // 3/2 without the bias maps 1 to 1.
        let policy = GrowthPolicy {
            bias: 0,
            ..GrowthPolicy::DEFAULT
        };
        assert_eq!(
            policy.validate(),
            Err(ConfigError::NonIncreasing {
                capacity: 1,
                next: 1
            })
        );
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(GrowthPolicy::DEFAULT.checked_next_capacity(usize::MAX), None);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn next_capacity_overflow_is_fatal() {
        GrowthPolicy::DEFAULT.next_capacity(usize::MAX / 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn valid_policies_strictly_grow(
                first in 1usize..16,
                denominator in 1usize..8,
                extra in 1usize..8,
                bias in 0usize..8,
                capacity in 0usize..100_000,
            ) {
                let policy = GrowthPolicy {
                    first_capacity: first,
                    numerator: denominator + extra,
                    denominator,
                    bias,
                };
                prop_assume!(policy.validate().is_ok());
                prop_assert!(policy.next_capacity(capacity) > capacity);
            }
        }
    }
}
