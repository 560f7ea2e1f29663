//! Error types for Stowage containers.
//!
//! Containers never hand these back as recoverable values on their
//! primary access paths: [`ArrayError`] is the message carried by a
//! fail-fast panic (see [`crate::fatal`]). [`ConfigError`] is the one
//! error callers can observe, returned when validating a growth policy.

use std::error::Error;
use std::fmt;

/// The two fatal failure kinds a container can hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// An index access at or past the live length.
    OutOfBounds {
        /// The rejected index.
        index: usize,
        /// Live length of the container at the time of the access.
        length: usize,
    },
    /// The allocator could not satisfy a request, or the request itself
    /// cannot be expressed.
    AllocationFailure {
        /// Size of the refused request in bytes. `None` when the byte
        /// count overflowed before it could be computed.
        requested_bytes: Option<usize>,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { index, length } => {
                write!(f, "index out of bounds: index {index}, length {length}")
            }
            Self::AllocationFailure {
                requested_bytes: Some(bytes),
            } => {
                write!(f, "allocation failure: requested {bytes} bytes")
            }
            Self::AllocationFailure {
                requested_bytes: None,
            } => write!(f, "allocation failure: capacity overflow"),
        }
    }
}

impl Error for ArrayError {}

/// Errors from validating a [`GrowthPolicy`](crate::GrowthPolicy).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `denominator` is zero.
    ZeroDenominator,
    /// `first_capacity` is zero, so the first push would not make room.
    ZeroFirstCapacity,
    /// `numerator <= denominator`: growth would be linear at best, which
    /// loses the amortized O(1) push.
    NotGeometric {
        /// Configured numerator.
        numerator: usize,
        /// Configured denominator.
        denominator: usize,
    },
    /// The policy would not strictly increase some capacity.
    NonIncreasing {
        /// Smallest non-empty capacity that fails to grow.
        capacity: usize,
        /// What the policy computed for it.
        next: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDenominator => write!(f, "growth policy denominator must be non-zero"),
            Self::ZeroFirstCapacity => {
                write!(f, "growth policy first capacity must be at least 1")
            }
            Self::NotGeometric {
                numerator,
                denominator,
            } => write!(
                f,
                "growth factor {numerator}/{denominator} must be greater than 1"
            ),
            Self::NonIncreasing { capacity, next } => write!(
                f,
                "growth policy does not grow: capacity {capacity} maps to {next}"
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_index_and_length() {
        let err = ArrayError::OutOfBounds {
            index: 4,
            length: 3,
        };
        assert_eq!(err.to_string(), "index out of bounds: index 4, length 3");
    }

    #[test]
    fn allocation_failure_messages() {
        let sized = ArrayError::AllocationFailure {
            requested_bytes: Some(64),
        };
        assert_eq!(sized.to_string(), "allocation failure: requested 64 bytes");
        let overflow = ArrayError::AllocationFailure {
            requested_bytes: None,
        };
        assert_eq!(overflow.to_string(), "allocation failure: capacity overflow");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::NonIncreasing {
            capacity: 1,
            next: 1,
        };
        assert_eq!(
            err.to_string(),
            "growth policy does not grow: capacity 1 maps to 1"
        );
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: Error>() {}
        assert_error::<ArrayError>();
        assert_error::<ConfigError>();
    }
}
