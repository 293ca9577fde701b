//! Fork/join work splitting over scoped OS threads.
//!
//! [`for_each_range`] splits `count` work units across worker threads plus
//! the calling thread. Each worker receives one contiguous index range and
//! the destination sub-slice holding exactly those units, so no two threads
//! ever see the same output bytes and no locks or atomics are needed. Source
//! data is shared read-only through the worker closure.
//!
//! Threads are spawned per call and joined before returning. There is no
//! persistent pool and no cancellation.

use std::num::NonZeroUsize;
use std::ops::Range;
use tracing::trace;

/// Minimum number of work units a spawned worker must receive.
pub const MIN_WORK_PER_THREAD: usize = 64;

/// Requested degree of parallelism.
///
/// `Fixed(n)` with `n < 2` runs on the calling thread only. [`ThreadCount::Max`]
/// is the single sentinel meaning "all hardware threads" as reported by
/// [`std::thread::available_parallelism`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadCount {
    /// Use at most this many threads.
    Fixed(usize),
    /// Use every hardware thread.
    Max,
}

impl Default for ThreadCount {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl From<usize> for ThreadCount {
    fn from(n: usize) -> Self {
        Self::Fixed(n)
    }
}

impl ThreadCount {
    /// Number of threads requested before considering the amount of work.
    pub fn requested(self) -> usize {
        match self {
            Self::Fixed(n) => n,
            Self::Max => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }

    /// Threads actually used for `count` work units:
    /// `min(requested, count / MIN_WORK_PER_THREAD)`.
    pub fn resolve(self, count: usize) -> usize {
        self.requested().min(count / MIN_WORK_PER_THREAD)
    }
}

/// Runs `worker` over `0..count`, writing into `dst`.
///
/// `dst` must hold at least `count * unit_size` bytes. The worker is called
/// with a global index range and the destination bytes of exactly that
/// range, so unit `i` lives at `(i - range.start) * unit_size` in the slice.
///
/// When more than one thread resolves, `count / threads` units go to each
/// spawned worker and the remaining `count % threads` units are processed by
/// the caller while the workers run.
pub fn for_each_range<F>(dst: &mut [u8], unit_size: usize, count: usize, threads: ThreadCount, worker: F)
where
    F: Fn(Range<usize>, &mut [u8]) + Sync,
{
    debug_assert!(dst.len() >= count * unit_size, "destination smaller than work");
    if count == 0 || unit_size == 0 {
        return;
    }
    let dst = &mut dst[..count * unit_size];

    let thread_count = threads.resolve(count);
    if thread_count <= 1 {
        trace!(count, "scheduler: synchronous");
        worker(0..count, dst);
        return;
    }

    let chunk = count / thread_count;
    let split = chunk * thread_count;
    trace!(count, thread_count, chunk, remainder = count - split, "scheduler: fork");

    let (head, tail) = dst.split_at_mut(split * unit_size);
    let worker = &worker;
    std::thread::scope(|scope| {
        for (i, part) in head.chunks_mut(chunk * unit_size).enumerate() {
            let begin = i * chunk;
            scope.spawn(move || worker(begin..begin + chunk, part));
        }
        if split < count {
            worker(split..count, tail);
        }
    });
}
