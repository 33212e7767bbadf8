use crate::growth::GrowthMode;

#[cfg(feature = "std")]
use thiserror::Error;

/// Errors returned by [`DynArray`](crate::DynArray) operations.
///
/// Every failure leaves the array exactly as it was before the call.
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DynArrayError {
    /// The byte size of the buffer overflowed, or the allocator returned null.
    #[cfg_attr(
        feature = "std",
        error("failed to allocate {capacity} elements of {elem_size} bytes")
    )]
    Allocation { capacity: usize, elem_size: usize },

    /// The growth step cannot make room (zero, or a factor of 1).
    #[cfg_attr(feature = "std", error("invalid growth step {1} for {0:?} mode"))]
    Configuration(GrowthMode, usize),

    /// The array is full at its capacity ceiling, or a request exceeds it.
    #[cfg_attr(feature = "std", error("capacity exhausted at {0} elements"))]
    CapacityExhausted(usize),

    #[cfg_attr(feature = "std", error("Index {0} is out of bounds for length {1}"))]
    IndexOutOfBounds(usize, usize),

    #[cfg_attr(feature = "std", error("cannot pop from an empty array"))]
    EmptyContainer,
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for DynArrayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DynArrayError::Allocation {
                capacity,
                elem_size,
            } => write!(
                f,
                "failed to allocate {} elements of {} bytes",
                capacity, elem_size
            ),
            DynArrayError::Configuration(mode, step) => {
                write!(f, "invalid growth step {} for {:?} mode", step, mode)
            }
            DynArrayError::CapacityExhausted(n) => {
                write!(f, "capacity exhausted at {} elements", n)
            }
            DynArrayError::IndexOutOfBounds(i, l) => {
                write!(f, "Index {} is out of bounds for length {}", i, l)
            }
            DynArrayError::EmptyContainer => write!(f, "cannot pop from an empty array"),
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::error::Error for DynArrayError {}
