use core::{fmt, ops, ptr, slice};

use bytemuck::Pod;

use crate::{
    DynArrayError,
    growth::{DynArrayConfig, GrowthMode, GrowthPolicy},
    raw::RawBuf,
};

/// A heap-backed, self-resizing contiguous array.
///
/// `DynArray<T>` owns a single buffer of [`capacity`](DynArray::capacity)
/// slots, of which the first [`len`](DynArray::len) hold live elements. When
/// an insertion finds no free slot the buffer is reallocated according to the
/// [`GrowthPolicy`] chosen at construction; it never shrinks on its own.
///
/// Every fallible operation returns a [`DynArrayError`] and leaves the array
/// untouched on failure.
///
/// # Insertion and removal
///
/// Indexed insertion and removal each come in two flavours:
///
/// - **shift** (`insert_shift`, `remove_shift`): keeps the order of every
///   other element, `O(len - index)` moves;
/// - **swap** (`insert_swap`, `remove_swap`): `O(1)` moves, relocating a single
///   boundary element instead of shifting the tail.
///
/// # Examples
///
/// ## Basic usage
///
/// ```
/// use dyn_array::{DynArray, GrowthMode};
///
/// let mut array = DynArray::new(1, GrowthMode::Multiply, 2).unwrap();
///
/// for c in ['a', 'b', 'c', 'd', 'e'] {
///     array.push(c).unwrap();
/// }
/// assert_eq!(array.len(), 5);
/// assert_eq!(array.capacity(), 8);
///
/// assert_eq!(array.pop(), Ok('e'));
/// assert_eq!(array.as_slice(), &['a', 'b', 'c', 'd']);
/// ```
///
/// ## Shift vs. swap
///
/// ```
/// use dyn_array::{DynArray, GrowthMode};
///
/// let mut array = DynArray::new(8, GrowthMode::Add, 4).unwrap();
/// for v in [10, 20, 30, 40] {
///     array.push(v).unwrap();
/// }
///
/// array.insert_swap(1, 99).unwrap();
/// assert_eq!(array.as_slice(), &[10, 99, 30, 40, 20]);
///
/// array.insert_shift(0, 7).unwrap();
/// assert_eq!(array.as_slice(), &[7, 10, 99, 30, 40, 20]);
///
/// assert_eq!(array.remove_swap(2), Ok(99));
/// assert_eq!(array.as_slice(), &[7, 10, 20, 30, 40]);
///
/// assert_eq!(array.remove_shift(0), Ok(7));
/// assert_eq!(array.as_slice(), &[10, 20, 30, 40]);
/// ```
pub struct DynArray<T> {
    buf: RawBuf<T>,
    len: usize,
    growth: GrowthPolicy,
    max_capacity: usize,
}

// Safety:
// -   `DynArray<T>` uniquely owns its elements, like `Vec<T>`; every mutation
//     goes through `&mut self`.
unsafe impl<T: Send> Send for DynArray<T> {}
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T> DynArray<T> {
    /// Creates an array with `initial_capacity` zero-filled slots.
    ///
    /// `step` is the factor (`Multiply`, at least 2) or the increment (`Add`,
    /// at least 1) applied whenever the array runs out of room.
    ///
    /// # Errors
    ///
    /// - `DynArrayError::Configuration` if `step` cannot grow the array
    /// - `DynArrayError::CapacityExhausted` if `initial_capacity > MAX_CAPACITY`
    /// - `DynArrayError::Allocation` if the buffer size overflows or allocation fails
    ///
    /// # Examples
    ///
    /// ```
    /// use dyn_array::{DynArray, DynArrayError, GrowthMode};
    ///
    /// let array = DynArray::<i32>::new(32, GrowthMode::Add, 16).unwrap();
    /// assert_eq!(array.len(), 0);
    /// assert_eq!(array.capacity(), 32);
    ///
    /// let err = DynArray::<i32>::new(4, GrowthMode::Multiply, 1).unwrap_err();
    /// assert_eq!(err, DynArrayError::Configuration(GrowthMode::Multiply, 1));
    /// ```
    pub fn new(
        initial_capacity: usize,
        mode: GrowthMode,
        step: usize,
    ) -> Result<Self, DynArrayError> {
        let config = DynArrayConfig::new()
            .with_initial_capacity(initial_capacity)
            .with_growth(GrowthPolicy::new(mode, step)?);

        Self::with_config(config)
    }

    /// Creates an array from a full [`DynArrayConfig`].
    pub fn with_config(config: DynArrayConfig) -> Result<Self, DynArrayError> {
        let max_capacity = config.validate()?;
        let buf = RawBuf::zeroed(config.initial_capacity)?;

        Ok(DynArray {
            buf,
            len: 0,
            growth: config.growth,
            max_capacity,
        })
    }

    /// Drops every element and releases the buffer.
    ///
    /// Afterwards `len() == capacity() == 0`. Calling it again is a no-op. The
    /// growth policy is kept, so the array can be filled again.
    pub fn deinit(&mut self) {
        self.clear();
        self.buf.release();
    }

    /// Returns the number of live elements.
    ///
    /// ```
    /// use dyn_array::{DynArray, GrowthMode};
    ///
    /// let mut array = DynArray::new(4, GrowthMode::Add, 4).unwrap();
    /// assert!(array.is_empty());
    ///
    /// array.push(1u8).unwrap();
    /// assert_eq!(array.len(), 1);
    /// assert!(!array.is_empty());
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the ceiling this array will never grow past.
    #[inline]
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Returns the policy applied when the array runs out of room.
    #[inline]
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    /// Returns `true` when a buffer is currently allocated (`capacity() > 0`).
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.buf.is_allocated()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::IndexOutOfBounds` if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, DynArrayError> {
        self.as_slice()
            .get(index)
            .ok_or(DynArrayError::IndexOutOfBounds(index, self.len))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::IndexOutOfBounds` if `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, DynArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(DynArrayError::IndexOutOfBounds(index, len))
    }

    /// Returns the live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // Safety:
        // -   The first `len` slots are initialized.
        // -   The pointer is non-null and aligned even when unallocated.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: see `as_slice`; `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Appends `value` at the end, growing the buffer if it is full.
    ///
    /// # Errors
    ///
    /// - `DynArrayError::CapacityExhausted` if the array is full at its ceiling
    /// - `DynArrayError::Allocation` if growing the buffer fails
    ///
    /// On error `value` is dropped and the array is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), DynArrayError> {
        self.ensure_space()?;

        // Safety: `len < capacity` after `ensure_space`.
        unsafe { self.buf.as_ptr().add(self.len).write(value) };
        self.len += 1;

        Ok(())
    }

    /// Removes and returns the last element. The capacity is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::EmptyContainer` if the array is empty.
    pub fn pop(&mut self) -> Result<T, DynArrayError> {
        if self.len == 0 {
            return Err(DynArrayError::EmptyContainer);
        }

        self.len -= 1;

        // Safety: slot `len` was initialized and is now logically vacated.
        Ok(unsafe { self.buf.as_ptr().add(self.len).read() })
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot up.
    ///
    /// `index == len()` appends.
    ///
    /// # Errors
    ///
    /// - `DynArrayError::IndexOutOfBounds` if `index > len()`
    /// - `DynArrayError::CapacityExhausted` / `DynArrayError::Allocation` as for
    ///   [`push`](DynArray::push)
    pub fn insert_shift(&mut self, index: usize, value: T) -> Result<(), DynArrayError> {
        if index > self.len {
            return Err(DynArrayError::IndexOutOfBounds(index, self.len));
        }

        self.ensure_space()?;

        // Safety:
        // -   `len < capacity`, so `[index + 1, len + 1)` is in bounds.
        // -   `ptr::copy` handles the overlap.
        unsafe {
            let hole = self.buf.as_ptr().add(index);
            ptr::copy(hole, hole.add(1), self.len - index);
            hole.write(value);
        }
        self.len += 1;

        Ok(())
    }

    /// Inserts `value` at `index`, moving the element previously there to the end.
    ///
    /// Every other element keeps its position. `index == len()` appends.
    ///
    /// # Errors
    ///
    /// Same as [`insert_shift`](DynArray::insert_shift).
    pub fn insert_swap(&mut self, index: usize, value: T) -> Result<(), DynArrayError> {
        if index > self.len {
            return Err(DynArrayError::IndexOutOfBounds(index, self.len));
        }

        self.ensure_space()?;

        // Safety:
        // -   `len < capacity`, so slot `len` is free and in bounds.
        // -   `index < len` makes the two slots distinct.
        unsafe {
            let base = self.buf.as_ptr();
            if index < self.len {
                ptr::copy_nonoverlapping(base.add(index), base.add(self.len), 1);
            }
            base.add(index).write(value);
        }
        self.len += 1;

        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail down.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::IndexOutOfBounds` if `index >= len()`.
    pub fn remove_shift(&mut self, index: usize) -> Result<T, DynArrayError> {
        if index >= self.len {
            return Err(DynArrayError::IndexOutOfBounds(index, self.len));
        }

        // Safety:
        // -   `index < len`, so the slot is initialized.
        // -   The tail `[index + 1, len)` is moved over the vacated slot.
        let value = unsafe {
            let hole = self.buf.as_ptr().add(index);
            let value = hole.read();
            ptr::copy(hole.add(1), hole, self.len - index - 1);
            value
        };
        self.len -= 1;

        Ok(value)
    }

    /// Removes and returns the element at `index`, filling the hole with the
    /// last element.
    ///
    /// # Errors
    ///
    /// Returns `DynArrayError::IndexOutOfBounds` if `index >= len()`.
    pub fn remove_swap(&mut self, index: usize) -> Result<T, DynArrayError> {
        if index >= self.len {
            return Err(DynArrayError::IndexOutOfBounds(index, self.len));
        }

        let last = self.len - 1;

        // Safety:
        // -   `index <= last < len`, so both slots are initialized.
        // -   After the read, slot `last` is moved (not duplicated) into the hole.
        let value = unsafe {
            let base = self.buf.as_ptr();
            let value = base.add(index).read();
            if index != last {
                ptr::copy_nonoverlapping(base.add(last), base.add(index), 1);
            }
            value
        };
        self.len = last;

        Ok(value)
    }

    /// Reallocates the buffer to exactly `len()` slots.
    ///
    /// An empty array releases its buffer entirely.
    ///
    /// ```
    /// use dyn_array::{DynArray, GrowthMode};
    ///
    /// let mut array = DynArray::new(32, GrowthMode::Add, 16).unwrap();
    /// array.push(5).unwrap();
    /// array.pop().unwrap();
    ///
    /// array.shrink_to_fit().unwrap();
    /// assert_eq!(array.capacity(), 0);
    ///
    /// array.push(77).unwrap();
    /// assert_eq!(array.capacity(), 16);
    /// ```
    pub fn shrink_to_fit(&mut self) -> Result<(), DynArrayError> {
        self.reallocate(self.len)
    }

    /// Makes room for exactly `additional` more elements.
    ///
    /// Does nothing if the capacity already suffices; otherwise the capacity
    /// becomes `len() + additional`, ignoring the growth policy.
    ///
    /// # Errors
    ///
    /// - `DynArrayError::CapacityExhausted` if `len() + additional` exceeds the ceiling
    /// - `DynArrayError::Allocation` if reallocation fails
    pub fn reserve(&mut self, additional: usize) -> Result<(), DynArrayError> {
        let required = self
            .len
            .checked_add(additional)
            .filter(|&n| n <= self.max_capacity)
            .ok_or(DynArrayError::CapacityExhausted(self.max_capacity))?;

        if required <= self.capacity() {
            return Ok(());
        }

        self.reallocate(required)
    }

    /// Drops the elements past `len`. The capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail = self.len - len;
        // Shorten first, so a panicking destructor cannot cause a double drop.
        self.len = len;

        // Safety: `[len, len + tail)` was initialized and is no longer reachable.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.as_ptr().add(len), tail);
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Grows the buffer per the policy when it is full.
    ///
    /// On success `len < capacity`.
    fn ensure_space(&mut self) -> Result<(), DynArrayError> {
        let capacity = self.buf.capacity();
        debug_assert!(
            self.len <= capacity && capacity <= self.max_capacity,
            "invalid state: len {} capacity {} max {}",
            self.len,
            capacity,
            self.max_capacity
        );

        if self.len < capacity {
            return Ok(());
        }

        let new_capacity = self
            .growth
            .next_capacity(capacity, self.max_capacity)
            .ok_or(DynArrayError::CapacityExhausted(capacity))?;

        self.reallocate(new_capacity)
    }

    fn reallocate(&mut self, new_capacity: usize) -> Result<(), DynArrayError> {
        debug_assert!(new_capacity >= self.len);

        self.buf.reallocate(new_capacity)
    }
}

impl<T: Clone> DynArray<T> {
    /// Appends clones of `values`, reserving room for all of them up front.
    ///
    /// # Errors
    ///
    /// As for [`reserve`](DynArray::reserve); nothing is appended on error.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), DynArrayError> {
        self.reserve(values.len())?;

        for value in values {
            // Safety: `reserve` guaranteed room for every value.
            unsafe { self.buf.as_ptr().add(self.len).write(value.clone()) };
            self.len += 1;
        }

        Ok(())
    }
}

impl<T: Pod> DynArray<T> {
    /// Returns the live elements as raw bytes.
    ///
    /// ```
    /// use dyn_array::{DynArray, GrowthMode};
    ///
    /// let mut array = DynArray::new(2, GrowthMode::Multiply, 2).unwrap();
    /// array.push(0x0102_u16).unwrap();
    /// assert_eq!(array.as_bytes(), &0x0102_u16.to_ne_bytes());
    /// ```
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        self.deinit();
    }
}

impl<T> Default for DynArray<T> {
    /// An empty, unallocated array that doubles when it grows.
    fn default() -> Self {
        DynArray {
            buf: RawBuf::new(),
            len: 0,
            growth: GrowthPolicy::default(),
            max_capacity: crate::MAX_CAPACITY,
        }
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Clones the elements into a buffer of the same capacity and policy.
    ///
    /// # Panics
    ///
    /// Panics if the new buffer cannot be allocated.
    fn clone(&self) -> Self {
        let mut buf: RawBuf<T> = RawBuf::new();
        if let Err(e) = buf.reallocate(self.capacity()) {
            panic!("DynArray::clone: {}", e);
        }

        let mut clone = DynArray {
            buf,
            len: 0,
            growth: self.growth,
            max_capacity: self.max_capacity,
        };

        for value in self.as_slice() {
            // Safety: the clone has the same capacity as `self`.
            unsafe { clone.buf.as_ptr().add(clone.len).write(value.clone()) };
            clone.len += 1;
        }

        clone
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T> ops::Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T> ops::IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}
