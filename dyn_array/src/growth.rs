//! Growth policy and per-instance configuration.
//!
//! A [`GrowthPolicy`] decides how many slots a full [`DynArray`](crate::DynArray)
//! moves to. It is validated once, at construction, so that every growth step
//! is guaranteed to make room unless the capacity ceiling has been reached.

use crate::DynArrayError;

/// Largest capacity any array may reach, on every platform.
///
/// The bound is 32-bit (`u32::MAX - 1`), so `capacity + 1` is always
/// representable in a `u32`.
pub const MAX_CAPACITY: usize = u32::MAX as usize - 1;

/// How the capacity grows when an insertion finds no free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthMode {
    /// Multiply the capacity by the step.
    Multiply,
    /// Add the step to the capacity.
    Add,
}

/// A validated growth rule: a [`GrowthMode`] and its step.
///
/// # Examples
///
/// ```
/// use dyn_array::{GrowthMode, GrowthPolicy};
///
/// let doubling = GrowthPolicy::new(GrowthMode::Multiply, 2).unwrap();
/// assert_eq!(doubling.next_capacity(4, 100), Some(8));
/// assert_eq!(doubling.next_capacity(64, 100), Some(100));
/// assert_eq!(doubling.next_capacity(100, 100), None);
///
/// assert!(GrowthPolicy::new(GrowthMode::Multiply, 1).is_err());
/// assert!(GrowthPolicy::new(GrowthMode::Add, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrowthPolicy {
    mode: GrowthMode,
    step: usize,
}

impl GrowthPolicy {
    /// Creates a policy, rejecting steps that would never make room.
    ///
    /// # Errors
    ///
    /// `DynArrayError::Configuration` if `step == 0`, or if `mode` is
    /// `Multiply` and `step == 1`.
    pub fn new(mode: GrowthMode, step: usize) -> Result<Self, DynArrayError> {
        let valid = match mode {
            GrowthMode::Multiply => step >= 2,
            GrowthMode::Add => step >= 1,
        };

        if !valid {
            return Err(DynArrayError::Configuration(mode, step));
        }

        Ok(GrowthPolicy { mode, step })
    }

    /// Shorthand for `GrowthPolicy::new(GrowthMode::Multiply, factor)`.
    pub fn multiply(factor: usize) -> Result<Self, DynArrayError> {
        Self::new(GrowthMode::Multiply, factor)
    }

    /// Shorthand for `GrowthPolicy::new(GrowthMode::Add, increment)`.
    pub fn add(increment: usize) -> Result<Self, DynArrayError> {
        Self::new(GrowthMode::Add, increment)
    }

    /// Returns the growth mode.
    #[inline]
    pub fn mode(&self) -> GrowthMode {
        self.mode
    }

    /// Returns the factor or increment.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns the capacity that follows `current`, clamped to `limit`.
    ///
    /// Returns `None` when `current` has already reached `limit`. A zero
    /// capacity multiplies as if it were 1, so the first growth of an empty
    /// `Multiply` array yields `step` slots.
    pub fn next_capacity(&self, current: usize, limit: usize) -> Option<usize> {
        if current >= limit {
            return None;
        }

        let next = match self.mode {
            GrowthMode::Multiply => current.max(1).checked_mul(self.step),
            GrowthMode::Add => current.checked_add(self.step),
        };

        Some(next.map_or(limit, |n| n.min(limit)))
    }
}

impl Default for GrowthPolicy {
    /// Doubling.
    fn default() -> Self {
        GrowthPolicy {
            mode: GrowthMode::Multiply,
            step: 2,
        }
    }
}

/// Construction parameters for a [`DynArray`](crate::DynArray).
///
/// # Examples
///
/// ```
/// use dyn_array::{DynArray, DynArrayConfig, GrowthPolicy};
///
/// let config = DynArrayConfig::new()
///     .with_initial_capacity(3)
///     .with_growth(GrowthPolicy::add(2).unwrap())
///     .with_max_capacity(7);
///
/// let array = DynArray::<u64>::with_config(config).unwrap();
/// assert_eq!(array.capacity(), 3);
/// assert_eq!(array.max_capacity(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynArrayConfig {
    pub initial_capacity: usize,
    pub growth: GrowthPolicy,
    /// Per-instance ceiling; values above [`MAX_CAPACITY`] are clamped to it.
    pub max_capacity: usize,
}

impl DynArrayConfig {
    /// Empty, doubling, bounded only by [`MAX_CAPACITY`].
    pub fn new() -> Self {
        DynArrayConfig {
            initial_capacity: 0,
            growth: GrowthPolicy::default(),
            max_capacity: MAX_CAPACITY,
        }
    }

    /// Sets the number of zero-filled slots allocated up front.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the growth policy.
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Sets the per-instance ceiling.
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Checks the configuration and returns the effective ceiling.
    pub(crate) fn validate(&self) -> Result<usize, DynArrayError> {
        let limit = self.max_capacity.min(MAX_CAPACITY);
        if self.initial_capacity > limit {
            return Err(DynArrayError::CapacityExhausted(limit));
        }

        Ok(limit)
    }
}

impl Default for DynArrayConfig {
    fn default() -> Self {
        Self::new()
    }
}
