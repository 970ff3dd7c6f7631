//! Riemann-sum quadrature
//!
//! This module implements the left-endpoint Riemann sum of an [`Integrand`]
//! over a [`Domain`], sequentially and as a data-parallel reduction.
//!
//! # Parallel Decomposition
//!
//! The parallel path partitions the sample index space `[0, N)` into `P`
//! contiguous ranges (see [`partition`]), computes one partial sum per
//! worker, waits for every worker at a join barrier and then adds the
//! partial sums in ascending worker index:
//!
//! ```text
//! [0 ........................................ N)
//! [ worker 0 )[ worker 1 )[ worker 2 )[ worker 3 )
//!      s0          s1          s2          s3
//! result = ((s0 + s1) + s2) + s3
//! ```
//!
//! Every worker recomputes its sample points from the global index
//! (`t = a + i*h`), so a worker's partial sum is bit-identical to what the
//! sequential loop accumulates over the same range. With `P = 1` the parallel
//! result therefore equals the sequential result exactly. Across different
//! `P` the summation order changes and results may differ in the low bits.
//!
//! # Example
//!
//! ```
//! use quadpulse::integrand::CosineKernel;
//! use quadpulse::quadrature::{integrate_parallel, integrate_sequential, Domain};
//!
//! let kernel = CosineKernel::new();
//! let domain = Domain::new(0.5, 2.0, 10_000)?;
//!
//! let sequential = integrate_sequential(&kernel, &domain);
//! let single = integrate_parallel(&kernel, &domain, 1)?;
//! assert_eq!(sequential.to_bits(), single.to_bits());
//!
//! let four = integrate_parallel(&kernel, &domain, 4)?;
//! assert!((four - sequential).abs() <= 1e-9 * sequential.abs());
//! # Ok::<(), quadpulse::quadrature::QuadratureError>(())
//! ```

pub mod error;
pub mod partition;

pub use error::QuadratureError;

use crate::integrand::{CosineKernel, Integrand};
use crate::worker::{self, Backend};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Integration domain `[a, b]` sampled at `N` left endpoints
///
/// The step `h = (b - a) / N` is computed once at construction and shared
/// read-only by every worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    a: f64,
    b: f64,
    samples: u64,
    step: f64,
}

impl Domain {
    /// Create a validated domain
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `samples` is zero or either bound is not
    /// finite.
    pub fn new(a: f64, b: f64, samples: u64) -> Result<Self, QuadratureError> {
        if !a.is_finite() {
            return Err(QuadratureError::invalid(format!("lower bound must be finite, got {}", a)));
        }
        if !b.is_finite() {
            return Err(QuadratureError::invalid(format!("upper bound must be finite, got {}", b)));
        }
        if samples == 0 {
            return Err(QuadratureError::invalid("sample count must be at least 1"));
        }

        Ok(Self {
            a,
            b,
            samples,
            step: (b - a) / samples as f64,
        })
    }

    /// Lower bound
    pub fn lower(&self) -> f64 {
        self.a
    }

    /// Upper bound
    pub fn upper(&self) -> f64 {
        self.b
    }

    /// Number of samples `N`
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Step width `h`
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Left endpoint of sample `index`: `a + index * h`
    #[inline]
    pub fn sample_point(&self, index: u64) -> f64 {
        self.a + index as f64 * self.step
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}], N={}, h={:e}", self.a, self.b, self.samples, self.step)
    }
}

/// How non-finite integrand samples are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SingularityPolicy {
    /// Add every sample to the sum; a `NaN` poisons the result
    #[default]
    Propagate,
    /// Fail with `NumericalSingularity` at the first non-finite sample
    Guard,
    /// Drop non-finite samples from the sum
    Exclude,
}

impl fmt::Display for SingularityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingularityPolicy::Propagate => write!(f, "propagate"),
            SingularityPolicy::Guard => write!(f, "guard"),
            SingularityPolicy::Exclude => write!(f, "exclude"),
        }
    }
}

/// Evaluate the default benchmark integrand `(cos(t) - 1) / t`
#[inline]
pub fn evaluate(t: f64) -> f64 {
    CosineKernel.evaluate(t)
}

/// Accumulate `f(a + i*h) * h` over `range` in ascending index order
///
/// This is the only summation loop in the crate: the sequential path and
/// every worker run it, which keeps their partial sums bit-identical.
pub(crate) fn accumulate<I: Integrand + ?Sized>(
    integrand: &I,
    domain: &Domain,
    range: Range<u64>,
    policy: SingularityPolicy,
) -> Result<f64, QuadratureError> {
    let h = domain.step();
    let mut total = 0.0;

    match policy {
        SingularityPolicy::Propagate => {
            for i in range {
                total += integrand.evaluate(domain.sample_point(i)) * h;
            }
        }
        SingularityPolicy::Guard => {
            for i in range {
                let t = domain.sample_point(i);
                let value = integrand.evaluate(t);
                if !value.is_finite() {
                    return Err(QuadratureError::NumericalSingularity { index: i, t, value });
                }
                total += value * h;
            }
        }
        SingularityPolicy::Exclude => {
            for i in range {
                let value = integrand.evaluate(domain.sample_point(i));
                if value.is_finite() {
                    total += value * h;
                }
            }
        }
    }

    Ok(total)
}

/// Sequential left-endpoint Riemann sum with the reference semantics
///
/// Non-finite samples propagate into the result.
pub fn integrate_sequential<I: Integrand + ?Sized>(integrand: &I, domain: &Domain) -> f64 {
    // Propagate never fails
    accumulate(integrand, domain, 0..domain.samples(), SingularityPolicy::Propagate)
        .unwrap_or(f64::NAN)
}

/// Sequential Riemann sum with an explicit singularity policy
///
/// # Errors
///
/// Returns `NumericalSingularity` under [`SingularityPolicy::Guard`].
pub fn integrate_sequential_with<I: Integrand + ?Sized>(
    integrand: &I,
    domain: &Domain,
    policy: SingularityPolicy,
) -> Result<f64, QuadratureError> {
    accumulate(integrand, domain, 0..domain.samples(), policy)
}

/// Parallel Riemann sum over `workers` OS threads
///
/// Uses the thread-per-call backend and propagates non-finite samples.
///
/// # Errors
///
/// - `InvalidArgument` if `workers` is zero (no work is performed)
/// - `ResourceExhausted` if a worker thread cannot be spawned
pub fn integrate_parallel<I: Integrand + ?Sized>(
    integrand: &I,
    domain: &Domain,
    workers: usize,
) -> Result<f64, QuadratureError> {
    integrate_parallel_with(integrand, domain, workers, SingularityPolicy::Propagate, Backend::Threads)
}

/// Parallel Riemann sum with explicit policy and backend
///
/// With `workers == 1` the single range is summed inline on the calling
/// thread regardless of backend.
pub fn integrate_parallel_with<I: Integrand + ?Sized>(
    integrand: &I,
    domain: &Domain,
    workers: usize,
    policy: SingularityPolicy,
    backend: Backend,
) -> Result<f64, QuadratureError> {
    let partition = partition::Partition::new(domain.samples(), workers)?;
    let partials = worker::dispatch(integrand, domain, &partition, policy, backend)?;
    Ok(worker::reduce(&partials))
}
