//! # dyn_array
//!
//! A `no_std` compatible, heap-backed, self-resizing array with a
//! caller-selected growth policy.
//!
//! ```rust
//! use dyn_array::{DynArray, GrowthMode};
//!
//! // Start with room for 32 elements, grow 16 slots at a time.
//! let mut widths = DynArray::new(32, GrowthMode::Add, 16).expect("valid policy");
//! widths.push(5).unwrap();
//! assert_eq!(widths.pop(), Ok(5));
//!
//! // Give the memory back; the next push grows by one step.
//! widths.shrink_to_fit().unwrap();
//! assert_eq!(widths.capacity(), 0);
//! widths.push(77).unwrap();
//! assert_eq!(widths.capacity(), 16);
//! ```
//!
//! ## Capacity bound
//!
//! Capacities are bounded by [`MAX_CAPACITY`] (`u32::MAX - 1`) on every
//! platform, and optionally by a smaller per-instance ceiling set through
//! [`DynArrayConfig`]. Growth clamps to the ceiling instead of wrapping; a
//! full array at its ceiling reports [`DynArrayError::CapacityExhausted`].

#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod array;
pub mod error;
pub mod growth;
mod raw;

pub use array::DynArray;
pub use error::DynArrayError;
pub use growth::{DynArrayConfig, GrowthMode, GrowthPolicy, MAX_CAPACITY};
