//! Sample-index partitioning
//!
//! Splits the sample index space `[0, N)` into `P` contiguous ranges, one per
//! worker. Worker `i` receives `[i*N/P, (i+1)*N/P)` using floor division, so
//! range sizes differ by at most one and the extra samples of an uneven split
//! land on later workers. When `P > N` some workers receive an empty range.
//!
//! # Example
//!
//! ```
//! use quadpulse::quadrature::partition::Partition;
//!
//! let partition = Partition::new(10, 4).unwrap();
//! let ranges: Vec<_> = partition.iter().collect();
//! assert_eq!(ranges, vec![0..2, 2..5, 5..7, 7..10]);
//! ```

use crate::quadrature::QuadratureError;
use std::ops::Range;

/// Sample range assigned to worker `index` out of `workers`
///
/// The product `index * samples` is formed in 128-bit arithmetic so the
/// boundary never overflows for any `u64` sample count.
///
/// `workers` must be non-zero.
#[inline]
pub fn partition_range(samples: u64, workers: usize, index: usize) -> Range<u64> {
    let bound = |i: usize| ((i as u128 * samples as u128) / workers as u128) as u64;
    bound(index)..bound(index + 1)
}

/// Partition of `[0, samples)` among `workers` workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    samples: u64,
    workers: usize,
}

impl Partition {
    /// Create a partition
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `samples` or `workers` is zero.
    pub fn new(samples: u64, workers: usize) -> Result<Self, QuadratureError> {
        if samples == 0 {
            return Err(QuadratureError::invalid("sample count must be at least 1"));
        }
        if workers == 0 {
            return Err(QuadratureError::invalid("worker count must be at least 1"));
        }
        Ok(Self { samples, workers })
    }

    /// Number of workers (ranges)
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Total number of samples
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Range for a single worker
    ///
    /// # Panics
    ///
    /// Panics if `index >= workers`.
    pub fn range(&self, index: usize) -> Range<u64> {
        assert!(index < self.workers, "worker index {} out of {}", index, self.workers);
        partition_range(self.samples, self.workers, index)
    }

    /// Iterate all ranges in ascending worker order
    pub fn iter(&self) -> impl Iterator<Item = Range<u64>> + '_ {
        (0..self.workers).map(move |i| partition_range(self.samples, self.workers, i))
    }
}
