//! Uninitialised slot storage.
//!
//! [`RawBuffer`] owns one allocation sized for `capacity` values of `T`
//! and nothing else: it never reads, drops or tracks the values in its
//! slots. The owning container records which prefix of slots is live
//! and upholds the safety contracts below. Each `unsafe` block carries a
//! `// SAFETY:` comment naming the invariant it relies on.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use stowage_core::fatal;

use crate::stats;

/// A run of `capacity` uninitialised slots for values of type `T`.
///
/// Zero-capacity buffers and buffers of zero-sized `T` never touch the
/// allocator. The buffer is deliberately `!Send`: allocation statistics
/// are per thread, so a buffer is released on the thread that made it.
pub struct RawBuffer<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _owns: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    /// A buffer with no slots and no allocation.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate room for exactly `capacity` values.
    ///
    /// # Panics
    ///
    /// Terminates if the byte size overflows or if the allocator refuses
    /// the request.
    #[track_caller]
    pub fn allocate(capacity: usize) -> Self {
        let layout = Self::layout_for(capacity);
        if layout.size() == 0 {
            return Self {
                ptr: NonNull::dangling(),
                capacity,
                _owns: PhantomData,
            };
        }
        // SAFETY: layout has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            fatal::allocation_failure(layout.size())
        };
        stats::record_allocation(layout.size());
        Self {
            ptr,
            capacity,
            _owns: PhantomData,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether this buffer holds memory obtained from the allocator.
    pub fn is_allocated(&self) -> bool {
        self.capacity != 0 && mem::size_of::<T>() != 0
    }

    /// Pointer to slot 0. Dangling (but aligned) when nothing is allocated.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable pointer to slot 0.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Move `value` into slot `index`.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot must not hold a live value (it
    /// would be overwritten without being dropped).
    pub unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.capacity);
        // SAFETY: caller guarantees index is in bounds of the allocation.
        unsafe { self.ptr.as_ptr().add(index).write(value) }
    }

    /// Shared reference to the value in slot `index`.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot must hold a live value.
    pub unsafe fn slot(&self, index: usize) -> &T {
        debug_assert!(index < self.capacity);
        // SAFETY: caller guarantees the slot is in bounds and initialised.
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Mutable reference to the value in slot `index`.
    ///
    /// # Safety
    ///
    /// `index < capacity` and the slot must hold a live value.
    pub unsafe fn slot_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.capacity);
        // SAFETY: caller guarantees the slot is in bounds and initialised.
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Drop the values in slots `[0, live)` in place, in index order.
    ///
    /// # Safety
    ///
    /// `live <= capacity`, those slots must hold live values, and they
    /// must be treated as uninitialised afterwards.
    pub unsafe fn drop_live(&mut self, live: usize) {
        debug_assert!(live <= self.capacity);
        let live = ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), live);
        // SAFETY: caller guarantees the prefix is initialised and is never
        // read again.
        unsafe { ptr::drop_in_place(live) }
    }

    /// Replace the allocation with one of `new_capacity` slots, carrying
    /// the `live` values of slots `[0, live)` across in index order.
    ///
    /// The new allocation is obtained first; the old one is released only
    /// after every value has been moved out of it. The vacated slots are
    /// not dropped, since their values now live in the new allocation.
    ///
    /// # Safety
    ///
    /// `live <= capacity`, `live <= new_capacity`, and slots `[0, live)`
    /// must hold live values.
    #[track_caller]
    pub unsafe fn relocate(&mut self, new_capacity: usize, live: usize) {
        debug_assert!(live <= self.capacity && live <= new_capacity);
        let mut fresh = Self::allocate(new_capacity);
        // SAFETY: both allocations hold at least `live` slots, the source
        // prefix is initialised, and two distinct allocations never overlap.
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), fresh.ptr.as_ptr(), live) };
        mem::swap(self, &mut fresh);
        // `fresh` now owns the old, fully vacated allocation.
        drop(fresh);
    }

    #[track_caller]
    fn layout_for(capacity: usize) -> Layout {
        match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => fatal::capacity_overflow(),
        }
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        // Allocation succeeded with this same layout, so it cannot fail here.
        let Ok(layout) = Layout::array::<T>(self.capacity) else {
            return;
        };
        if layout.size() == 0 {
            return;
        }
        // SAFETY: ptr was returned by `alloc::alloc` with exactly this layout
        // and has not been released (each allocation has one owner).
        unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        stats::record_release(layout.size());
    }
}
