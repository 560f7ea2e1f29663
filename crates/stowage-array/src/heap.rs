//! Arrays allocated once, with a length fixed at construction.

#![allow(unsafe_code)]

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use stowage_alloc::RawBuffer;
use stowage_core::fatal;

/// A single allocation of exactly `length` values.
///
/// The length is chosen at run time and never changes afterwards. The
/// array is move-only; it does not implement `Clone`:
///
/// ```compile_fail
/// use stowage_array::HeapArray;
///
/// let a = HeapArray::<u8>::new(4);
/// let b = a.clone();
/// ```
///
/// Use [`duplicate`](HeapArray::duplicate) for an explicit deep copy.
pub struct HeapArray<T> {
    buf: RawBuffer<T>,
    // Equal to `buf.capacity()` once construction finishes; counts the
    // initialised prefix while it is running.
    len: usize,
}

impl<T> HeapArray<T> {
    /// An array with no elements and no allocation.
    ///
    /// This is also the state `take()` leaves behind.
    pub const fn empty() -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// Allocate `length` default-constructed values.
    ///
    /// # Panics
    ///
    /// Fatal if the allocation cannot be made.
    #[track_caller]
    pub fn new(length: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(length, |_| T::default())
    }

    /// Allocate `length` clones of `value`.
    ///
    /// # Panics
    ///
    /// Fatal if the allocation cannot be made.
    #[track_caller]
    pub fn filled(length: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(length, |_| value.clone())
    }

    /// Allocate `length` values, building each from its index in order.
    ///
    /// If `f` panics, the values built so far are dropped and the
    /// allocation is released.
    ///
    /// # Panics
    ///
    /// Fatal if the allocation cannot be made.
    #[track_caller]
    pub fn from_fn(length: usize, mut f: impl FnMut(usize) -> T) -> Self {
        let mut array = Self {
            buf: RawBuffer::allocate(length),
            len: 0,
        };
        while array.len < length {
            let value = f(array.len);
            // SAFETY: len < length == capacity, and only [0, len) is live.
            unsafe { array.buf.write(array.len, value) };
            array.len += 1;
        }
        array
    }

    /// Number of elements.
    pub fn length(&self) -> usize {
        self.len
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reference to element `index`.
    ///
    /// # Panics
    ///
    /// Fatal if `index >= length()`.
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        let index = fatal::check_index(index, self.len);
        // SAFETY: index < len, and [0, len) is live.
        unsafe { self.buf.slot(index) }
    }

    /// Mutable reference to element `index`.
    ///
    /// # Panics
    ///
    /// Fatal if `index >= length()`.
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        let index = fatal::check_index(index, self.len);
        // SAFETY: index < len, and [0, len) is live.
        unsafe { self.buf.slot_mut(index) }
    }

    /// Element `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        // SAFETY: checked against len, and [0, len) is live.
        (index < self.len).then(|| unsafe { self.buf.slot(index) })
    }

    /// Mutable element `index`, or `None` past the end.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: checked against len, and [0, len) is live.
            Some(unsafe { self.buf.slot_mut(index) })
        } else {
            None
        }
    }

    /// A new allocation of the same length holding clones of every element.
    ///
    /// # Panics
    ///
    /// Fatal if the allocation cannot be made.
    #[track_caller]
    pub fn duplicate(&self) -> Self
    where
        T: Clone,
    {
        Self::from_fn(self.len, |i| self.at(i).clone())
    }

    /// Move the contents out, leaving `self` empty and unallocated.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl<T> Default for HeapArray<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for HeapArray<T> {
    fn drop(&mut self) {
        // SAFETY: [0, len) is live and is never touched again; the buffer
        // releases the allocation when it drops right after.
        unsafe { self.buf.drop_live(self.len) };
    }
}

impl<T> Index<usize> for HeapArray<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T> IndexMut<usize> for HeapArray<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

impl<T: PartialEq> PartialEq for HeapArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (0..self.len).all(|i| self.at(i) == other.at(i))
    }
}

impl<T: Eq> Eq for HeapArray<T> {}

impl<T: fmt::Debug> fmt::Debug for HeapArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).map(|i| self.at(i)))
            .finish()
    }
}
