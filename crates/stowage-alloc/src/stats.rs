//! Allocation counters.
//!
//! Counters are kept per thread: containers are single-threaded, and
//! per-thread bookkeeping keeps concurrently running callers (test
//! threads in particular) from seeing each other's traffic.

use std::cell::Cell;

/// Snapshot of the allocation counters for the current thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Number of successful allocations.
    pub allocations: u64,
    /// Number of allocations returned to the allocator.
    pub releases: u64,
    /// Total bytes handed out.
    pub bytes_allocated: u64,
    /// Total bytes returned.
    pub bytes_released: u64,
}

impl AllocStats {
    /// Allocations not yet released.
    ///
    /// Saturates at zero: after [`reset`], releasing a buffer allocated
    /// before the reset counts a release with no matching allocation.
    pub fn live_allocations(&self) -> u64 {
        self.allocations.saturating_sub(self.releases)
    }

    /// Bytes not yet released. Saturates at zero, like
    /// [`live_allocations`](AllocStats::live_allocations).
    pub fn live_bytes(&self) -> u64 {
        self.bytes_allocated.saturating_sub(self.bytes_released)
    }

    /// Counter deltas accumulated since `earlier` was taken.
    ///
    /// A [`reset`] in between makes counters go backwards; those deltas
    /// saturate at zero.
    pub fn since(&self, earlier: &AllocStats) -> AllocStats {
        AllocStats {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            releases: self.releases.saturating_sub(earlier.releases),
            bytes_allocated: self.bytes_allocated.saturating_sub(earlier.bytes_allocated),
            bytes_released: self.bytes_released.saturating_sub(earlier.bytes_released),
        }
    }
}

thread_local! {
    static COUNTERS: Cell<AllocStats> = const {
        Cell::new(AllocStats {
            allocations: 0,
            releases: 0,
            bytes_allocated: 0,
            bytes_released: 0,
        })
    };
}

/// Current counters for this thread.
pub fn snapshot() -> AllocStats {
    COUNTERS.with(Cell::get)
}

/// Zero this thread's counters.
pub fn reset() {
    COUNTERS.with(|c| c.set(AllocStats::default()));
}

pub(crate) fn record_allocation(bytes: usize) {
    COUNTERS.with(|c| {
        let mut s = c.get();
        s.allocations += 1;
        s.bytes_allocated += bytes as u64;
        c.set(s);
    });
}

pub(crate) fn record_release(bytes: usize) {
    COUNTERS.with(|c| {
        let mut s = c.get();
        s.releases += 1;
        s.bytes_released += bytes as u64;
        c.set(s);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_accumulate() {
        reset();
        record_allocation(16);
        record_allocation(32);
        record_release(16);
        let s = snapshot();
        assert_eq!(s.allocations, 2);
        assert_eq!(s.releases, 1);
        assert_eq!(s.live_allocations(), 1);
        assert_eq!(s.live_bytes(), 32);
    }

    #[test]
    fn since_reports_deltas() {
        let before = snapshot();
        record_allocation(8);
        let delta = snapshot().since(&before);
        assert_eq!(delta.allocations, 1);
        assert_eq!(delta.bytes_allocated, 8);
        assert_eq!(delta.releases, 0);
    }

    #[test]
    fn release_after_reset_does_not_underflow() {
        record_allocation(4);
        reset();
        record_release(4);
        let s = snapshot();
        assert_eq!(s.releases, 1);
        assert_eq!(s.live_allocations(), 0);
        assert_eq!(s.live_bytes(), 0);
    }

    #[test]
    fn since_across_reset_saturates() {
        record_allocation(8);
        let before = snapshot();
        reset();
        let delta = snapshot().since(&before);
        assert_eq!(delta, AllocStats::default());
    }

    #[test]
    fn counters_are_per_thread() {
        reset();
        record_allocation(4);
        let other = std::thread::spawn(snapshot).join().unwrap();
        assert_eq!(other, AllocStats::default());
        assert_eq!(snapshot().allocations, 1);
    }
}
