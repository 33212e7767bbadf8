//! Untyped allocation work for [`DynArray`](crate::DynArray).
//!
//! `RawBuf<T>` owns a block of `capacity` slots of `T` and nothing else: it
//! neither knows how many slots are initialized nor ever drops a `T`. The
//! array on top of it is responsible for element lifetimes.

use alloc::alloc::{self as heap, Layout};
use core::{marker::PhantomData, mem, ptr::NonNull};

use crate::DynArrayError;

pub(crate) struct RawBuf<T> {
    /// `None` exactly when `capacity == 0`.
    ptr: Option<NonNull<T>>,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// An unallocated buffer.
    pub(crate) const fn new() -> Self {
        RawBuf {
            ptr: None,
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates `capacity` zero-filled slots.
    pub(crate) fn zeroed(capacity: usize) -> Result<Self, DynArrayError> {
        if capacity == 0 {
            return Ok(Self::new());
        }

        let layout = layout_for::<T>(capacity)?;
        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // Safety:
            // -   `layout` has a non-zero size.
            let raw = unsafe { heap::alloc_zeroed(layout) };
            NonNull::new(raw.cast::<T>()).ok_or(alloc_error::<T>(capacity))?
        };

        Ok(RawBuf {
            ptr: Some(ptr),
            capacity,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Pointer to the first slot; dangling (but aligned) when unallocated.
    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Resizes the block to exactly `new_capacity` slots.
    ///
    /// The first `min(capacity, new_capacity)` slots keep their bytes. A zero
    /// `new_capacity` releases the block. On error nothing changes.
    pub(crate) fn reallocate(&mut self, new_capacity: usize) -> Result<(), DynArrayError> {
        if new_capacity == self.capacity {
            return Ok(());
        }

        if new_capacity == 0 {
            self.release();
            return Ok(());
        }

        let new_layout = layout_for::<T>(new_capacity)?;

        let ptr = match self.ptr {
            _ if new_layout.size() == 0 => NonNull::dangling(),
            None => {
                // Safety:
                // -   `new_layout` has a non-zero size.
                let raw = unsafe { heap::alloc(new_layout) };
                NonNull::new(raw.cast::<T>()).ok_or(alloc_error::<T>(new_capacity))?
            }
            Some(old) => {
                // Cannot fail: the same layout was computed when `old` was allocated.
                let old_layout = layout_for::<T>(self.capacity)?;

                // Safety:
                // -   `old` was allocated by the global allocator with `old_layout`.
                // -   `new_layout.size()` is non-zero and does not overflow `isize`,
                //     as checked by `Layout::array`.
                let raw = unsafe {
                    heap::realloc(old.as_ptr().cast::<u8>(), old_layout, new_layout.size())
                };

                // On failure `old` is still allocated and still ours.
                NonNull::new(raw.cast::<T>()).ok_or(alloc_error::<T>(new_capacity))?
            }
        };

        self.ptr = Some(ptr);
        self.capacity = new_capacity;
        Ok(())
    }

    /// Frees the block, if any. Idempotent.
    pub(crate) fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            let size = mem::size_of::<T>() * self.capacity;
            if size > 0 {
                // Safety:
                // -   `ptr` was allocated by the global allocator with this exact
                //     layout, which was valid when it was created.
                unsafe {
                    let layout = Layout::from_size_align_unchecked(size, mem::align_of::<T>());
                    heap::dealloc(ptr.as_ptr().cast::<u8>(), layout);
                }
            }
        }

        self.capacity = 0;
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        self.release();
    }
}

fn layout_for<T>(capacity: usize) -> Result<Layout, DynArrayError> {
    Layout::array::<T>(capacity).map_err(|_| alloc_error::<T>(capacity))
}

fn alloc_error<T>(capacity: usize) -> DynArrayError {
    DynArrayError::Allocation {
        capacity,
        elem_size: mem::size_of::<T>(),
    }
}
