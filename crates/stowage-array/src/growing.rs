//! Push-only dynamic arrays with geometric capacity growth.
//!
//! A [`GrowingArray`] owns a [`RawBuffer`] of `capacity` slots of which
//! the first `length` hold live values. A push into a full buffer
//! relocates every live value into a larger allocation chosen by the
//! array's [`GrowthPolicy`] before the new value is written:
//!
//! ```text
//! push(x), length == capacity
//! ├── allocate next_capacity(capacity) slots   (fatal on failure, old buffer intact)
//! ├── move slots [0, length) across, in order
//! ├── release the old allocation               (its slots were all moved out)
//! └── write x into slot length, length += 1
//! ```
//!
//! Slots `[length, capacity)` are never read or dropped.

#![allow(unsafe_code)]

use std::fmt;
use std::ops::{Index, IndexMut};

use stowage_alloc::RawBuffer;
use stowage_core::{fatal, ConfigError, GrowthPolicy};

/// A growable, indexable sequence with amortized O(1) push.
///
/// Starts empty with no allocation. Any push that grows the buffer moves
/// the elements, so references into the array cannot be held across a
/// push; the borrow checker enforces this.
///
/// The array is move-only; it does not implement `Clone`:
///
/// ```compile_fail
/// use stowage_array::GrowingArray;
///
/// let mut a = GrowingArray::new();
/// a.push(1u8);
/// let b = a.clone();
/// ```
///
/// ```
/// use stowage_array::GrowingArray;
///
/// let mut readings = GrowingArray::new();
/// for r in [12u16, 15, 11] {
///     readings.push(r);
/// }
/// assert_eq!(readings.length(), 3);
/// assert_eq!(readings[1], 15);
/// assert_eq!(readings.capacity(), 3);
/// ```
pub struct GrowingArray<T> {
    buf: RawBuffer<T>,
    len: usize,
    policy: GrowthPolicy,
    growth_events: u64,
}

impl<T> GrowingArray<T> {
    /// An empty array with no allocation and the default ~1.5x policy.
    pub const fn new() -> Self {
        Self::from_parts(RawBuffer::new(), GrowthPolicy::DEFAULT)
    }

    /// An empty array that grows according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `policy` would not strictly grow
    /// every capacity.
    pub fn try_with_growth(policy: GrowthPolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        Ok(Self::from_parts(RawBuffer::new(), policy))
    }

    /// An empty array that grows according to `policy`.
    ///
    /// # Panics
    ///
    /// Panics if `policy` fails [`GrowthPolicy::validate`].
    #[track_caller]
    pub fn with_growth(policy: GrowthPolicy) -> Self {
        match Self::try_with_growth(policy) {
            Ok(array) => array,
            Err(e) => panic!("invalid growth policy: {e}"),
        }
    }

    const fn from_parts(buf: RawBuffer<T>, policy: GrowthPolicy) -> Self {
        Self {
            buf,
            len: 0,
            policy,
            growth_events: 0,
        }
    }

    /// Append `item` after the last live element.
    ///
    /// Invalidates every reference into the array if the buffer is full.
    ///
    /// # Panics
    ///
    /// Fatal if the larger allocation cannot be made or its size
    /// overflows.
    #[track_caller]
    pub fn push(&mut self, item: T) {
        if self.len == self.buf.capacity() {
            self.grow();
        }
        // SAFETY: len < capacity after growing, and only [0, len) is live,
        // so slot len is uninitialised.
        unsafe { self.buf.write(self.len, item) };
        self.len += 1;
    }

    #[cold]
    #[inline(never)]
    #[track_caller]
    fn grow(&mut self) {
        let capacity = self.buf.capacity();
        let new_capacity = self.policy.next_capacity(capacity);
        debug_assert!(new_capacity > capacity);
        // SAFETY: [0, len) is live and len == capacity < new_capacity.
        unsafe { self.buf.relocate(new_capacity, self.len) };
        self.growth_events += 1;
    }

    /// Number of live elements.
    pub fn length(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the current allocation. Always `>= length()`.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The policy this array grows by.
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// How many times this array has moved to a larger allocation.
    pub fn growth_events(&self) -> u64 {
        self.growth_events
    }

    /// Reference to element `index`.
    ///
    /// # Panics
    ///
    /// Fatal if `index >= length()`, including indices that fall in
    /// spare capacity.
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

    /// Element `index`, or `None` if it is not live.
    pub fn get(&self, index: usize) -> Option<&T> {
        // SAFETY: checked against len, and [0, len) is live.
        (index < self.len).then(|| unsafe { self.buf.slot(index) })
    }

    /// Mutable element `index`, or `None` if it is not live.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: checked against len, and [0, len) is live.
            Some(unsafe { self.buf.slot_mut(index) })
        } else {
            None
        }
    }

    /// A new array with capacity exactly `length()` holding clones of
    /// every live element. The copy keeps this array's growth policy.
    ///
    /// # Panics
    ///
    /// Fatal if the allocation cannot be made.
    #[track_caller]
    pub fn duplicate(&self) -> Self
    where
        T: Clone,
    {
        let mut copy = Self::from_parts(RawBuffer::allocate(self.len), self.policy);
        while copy.len < self.len {
            let value = self.at(copy.len).clone();
            // SAFETY: copy.len < self.len == copy capacity, and slot
            // copy.len is uninitialised.
            unsafe { copy.buf.write(copy.len, value) };
            copy.len += 1;
        }
        copy
    }

    /// Move the contents out, leaving `self` empty and unallocated.
    ///
    /// The returned array adopts the allocation, length, capacity and
    /// growth count; `self` keeps only its growth policy.
    pub fn take(&mut self) -> Self {
        let empty = Self::from_parts(RawBuffer::new(), self.policy);
        std::mem::replace(self, empty)
    }
}

impl<T> Default for GrowingArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for GrowingArray<T> {
    fn drop(&mut self) {
        // SAFETY: exactly [0, len) is live and is never touched again;
        // spare slots are left alone and the buffer releases the
        // allocation when it drops right after.
        unsafe { self.buf.drop_live(self.len) };
    }
}

impl<T> Index<usize> for GrowingArray<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T> IndexMut<usize> for GrowingArray<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

impl<T: PartialEq> PartialEq for GrowingArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && (0..self.len).all(|i| self.at(i) == other.at(i))
    }
}

impl<T: Eq> Eq for GrowingArray<T> {}

impl<T: fmt::Debug> fmt::Debug for GrowingArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.len).map(|i| self.at(i)))
            .finish()
    }
}
