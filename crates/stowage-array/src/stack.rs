//! Fixed-length arrays embedded by value.

use std::ops::{Index, IndexMut};

use stowage_core::fatal;

/// `N` values of `T` stored inline, with bounds-checked access.
///
/// The length is part of the type, there is no allocation, and the
/// wrapper has the same value semantics as `[T; N]`: it is `Copy` when
/// `T` is.
///
/// ```
/// use stowage_array::StackArray;
///
/// const PINS: StackArray<u8, 3> = StackArray::new([2, 3, 5]);
/// const LED: u8 = PINS.read(1);
/// const PIN_COUNT: usize = PINS.length();
/// assert_eq!(LED, 3);
/// assert_eq!(PIN_COUNT, 3);
/// ```
///
/// A constant read past the end is rejected at compile time:
///
/// ```compile_fail
/// use stowage_array::StackArray;
///
/// const PINS: StackArray<u8, 3> = StackArray::new([2, 3, 5]);
/// const BAD: u8 = PINS.read(3);
/// let _ = BAD;
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StackArray<T, const N: usize> {
    elements: [T; N],
}

impl<T, const N: usize> StackArray<T, N> {
    /// Number of elements, as an associated constant.
    pub const LENGTH: usize = N;

    /// Wrap an array.
    pub const fn new(elements: [T; N]) -> Self {
        Self { elements }
    }

    /// Build each element from its index.
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self {
            elements: std::array::from_fn(f),
        }
    }

    /// Unwrap into the plain array.
    pub fn into_inner(self) -> [T; N] {
        self.elements
    }

    /// Always `N`.
    pub const fn length(&self) -> usize {
        N
    }

    /// Whether `N == 0`.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Reference to element `index`.
    ///
    /// # Panics
    ///
    /// Fatal if `index >= N`.
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        &self.elements[fatal::check_index(index, N)]
    }

    /// Mutable reference to element `index`.
    ///
    /// # Panics
    ///
    /// Fatal if `index >= N`.
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        &mut self.elements[fatal::check_index(index, N)]
    }

    /// Element `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// Mutable element `index`, or `None` past the end.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.elements.get_mut(index)
    }
}

impl<T: Copy, const N: usize> StackArray<T, N> {
    /// Copy of element `index`, usable in constant evaluation.
    ///
    /// Read-only by construction: it returns a value, so constant
    /// evaluation can never hand out a path to mutate the array.
    ///
    /// # Panics
    ///
    /// Fatal if `index >= N`; a compile error when evaluated in a
    /// constant context. Constant panics cannot format arguments, so the
    /// message carries the shared `index out of bounds` prefix without
    /// the index and length.
    #[track_caller]
    pub const fn read(&self, index: usize) -> T {
        if index >= N {
            panic!("index out of bounds: read past the end of a StackArray");
        }
        self.elements[index]
    }
}

impl<T: Default, const N: usize> Default for StackArray<T, N> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T, const N: usize> From<[T; N]> for StackArray<T, N> {
    fn from(elements: [T; N]) -> Self {
        Self::new(elements)
    }
}

impl<T, const N: usize> Index<usize> for StackArray<T, N> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T, const N: usize> IndexMut<usize> for StackArray<T, N> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_reads_and_writes() {
        let mut a = StackArray::new([1, 2, 3]);
        a[1] = 20;
        *a.at_mut(2) += 1;
        assert_eq!(a[0], 1);
        assert_eq!(*a.at(1), 20);
        assert_eq!(a.into_inner(), [1, 20, 4]);
    }

    #[test]
    fn length_is_n() {
        let a = StackArray::<u16, 5>::default();
        assert_eq!(a.length(), 5);
        assert_eq!(StackArray::<u16, 5>::LENGTH, 5);
        assert!(!a.is_empty());
    }

    #[test]
    fn copies_are_independent_values() {
        let a = StackArray::new([0u8; 4]);
        let mut b = a;
        b[0] = 9;
        assert_eq!(a[0], 0);
        assert_eq!(b[0], 9);
    }

    #[test]
    fn read_in_const_context() {
        const TABLE: StackArray<u32, 4> = StackArray::new([10, 20, 30, 40]);
        const THIRD: u32 = TABLE.read(2);
        assert_eq!(THIRD, 30);
        assert_eq!(TABLE.read(3), 40);
    }

    #[test]
    fn from_fn_uses_index() {
        let a = StackArray::<usize, 4>::from_fn(|i| i * i);
        assert_eq!(a.into_inner(), [0, 1, 4, 9]);
    }

    #[test]
    fn get_is_non_fatal() {
        let mut a = StackArray::from([7u8]);
        assert_eq!(a.get(0), Some(&7));
        assert_eq!(a.get(1), None);
        assert!(a.get_mut(1).is_none());
    }

    #[test]
    fn read_and_index_share_out_of_bounds_prefix() {
        fn message(f: impl FnOnce()) -> String {
            let err = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).unwrap_err();
            err.downcast_ref::<String>()
                .cloned()
                .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
                .unwrap()
        }
        let a = StackArray::new([1u8, 2]);
        let by_read = message(|| {
            let _ = a.read(2);
        });
        let by_index = message(|| {
            let _ = a[2];
        });
        assert!(by_read.starts_with("index out of bounds"));
        assert!(by_index.starts_with("index out of bounds"));
    }

    #[test]
    #[should_panic(expected = "index out of bounds: index 3, length 3")]
    fn index_at_length_is_fatal() {
        let a = StackArray::new([1, 2, 3]);
        let _ = a[3];
    }

    #[test]
    #[should_panic(expected = "index out of bounds: index 0, length 0")]
    fn zero_length_rejects_every_index() {
        let a = StackArray::<u8, 0>::new([]);
        assert!(a.is_empty());
        let _ = a[0];
    }

    #[test]
    #[should_panic(expected = "index out of bounds: read past the end of a StackArray")]
    fn runtime_read_past_end_is_fatal() {
        let a = StackArray::new([1u8, 2]);
        let i = a.length() + 5;
        let _ = a.read(i);
    }
}
