//! Quadrature workers
//!
//! A [`Worker`] owns one contiguous sample range of a [`Partition`] and
//! produces exactly one [`PartialSum`]. Workers never share mutable state:
//! each one returns its partial sum through its own join handle, and the
//! calling thread combines them with [`reduce`] after the join barrier.
//!
//! # Backends
//!
//! - **Threads**: `P` OS threads spawned fresh for the call inside a
//!   `std::thread::scope`, torn down before the call returns
//! - **Rayon**: the same ranges evaluated on a dedicated rayon pool with
//!   exactly `P` threads
//!
//! Both backends compute the same partial sums for the same partition, so
//! they return bit-identical results.
//!
//! # Example
//!
//! ```
//! use quadpulse::integrand::CosineKernel;
//! use quadpulse::quadrature::{Domain, SingularityPolicy, partition::Partition};
//! use quadpulse::worker::{self, Backend};
//!
//! let domain = Domain::new(1.0, 2.0, 1000)?;
//! let partition = Partition::new(domain.samples(), 4)?;
//!
//! let partials = worker::dispatch(&CosineKernel, &domain, &partition, SingularityPolicy::Propagate, Backend::Threads)?;
//! assert_eq!(partials.len(), 4);
//! assert_eq!(partials.iter().map(|p| p.samples).sum::<u64>(), 1000);
//!
//! let result = worker::reduce(&partials);
//! assert!(result.is_finite());
//! # Ok::<(), quadpulse::quadrature::QuadratureError>(())
//! ```

use crate::integrand::Integrand;
use crate::quadrature::partition::Partition;
use crate::quadrature::{accumulate, Domain, QuadratureError, SingularityPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// Worker execution backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// One scoped OS thread per worker, spawned per call
    #[default]
    Threads,
    /// A rayon pool sized to the worker count, built per call
    Rayon,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Threads => write!(f, "threads"),
            Backend::Rayon => write!(f, "rayon"),
        }
    }
}

/// Partial result of one worker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartialSum {
    /// Worker index
    pub worker: usize,
    /// Sum of `f(t) * h` over the worker's range
    pub value: f64,
    /// Number of samples in the worker's range
    pub samples: u64,
}

/// Worker computing the partial sum of one sample range
#[derive(Debug, Clone)]
pub struct Worker {
    id: usize,
    range: Range<u64>,
}

impl Worker {
    /// Create the worker for index `id` of `partition`
    pub fn new(id: usize, partition: &Partition) -> Self {
        Self {
            id,
            range: partition.range(id),
        }
    }

    /// Worker index
    pub fn id(&self) -> usize {
        self.id
    }

    /// Assigned sample range
    pub fn range(&self) -> Range<u64> {
        self.range.clone()
    }

    /// Compute this worker's partial sum
    pub fn run<I: Integrand + ?Sized>(
        self,
        integrand: &I,
        domain: &Domain,
        policy: SingularityPolicy,
    ) -> Result<PartialSum, QuadratureError> {
        let samples = self.range.end - self.range.start;
        let value = accumulate(integrand, domain, self.range, policy)?;
        Ok(PartialSum {
            worker: self.id,
            value,
            samples,
        })
    }
}

/// Run one worker per partition range and collect the partial sums
///
/// Returns partial sums ordered by worker index. A single-range partition is
/// computed inline on the calling thread. Blocks until every spawned worker
/// has finished.
///
/// # Errors
///
/// - `ResourceExhausted` if a worker thread or pool cannot be created
/// - `WorkerPanicked` if a worker thread panics
/// - the lowest-indexed worker's error otherwise (e.g. `NumericalSingularity`)
pub fn dispatch<I: Integrand + ?Sized>(
    integrand: &I,
    domain: &Domain,
    partition: &Partition,
    policy: SingularityPolicy,
    backend: Backend,
) -> Result<Vec<PartialSum>, QuadratureError> {
    let workers: Vec<Worker> = (0..partition.workers())
        .map(|id| Worker::new(id, partition))
        .collect();

    if workers.len() == 1 {
        log::trace!("running single worker inline");
        return workers
            .into_iter()
            .map(|worker| worker.run(integrand, domain, policy))
            .collect();
    }

    log::debug!("dispatching {} workers on {} backend", workers.len(), backend);

    let results = match backend {
        Backend::Threads => run_threads(integrand, domain, workers, policy, worker_thread)?,
        Backend::Rayon => run_rayon(integrand, domain, workers, policy)?,
    };

    results.into_iter().collect()
}

/// Sum partial results in ascending worker order
///
/// The addition order is fixed so a given partition always rounds the same
/// way. Returns `0.0` for an empty slice.
pub fn reduce(partials: &[PartialSum]) -> f64 {
    debug_assert!(partials.windows(2).all(|w| w[0].worker < w[1].worker));
    partials
        .iter()
        .map(|p| p.value)
        .reduce(|acc, value| acc + value)
        .unwrap_or(0.0)
}

type WorkerResult = Result<PartialSum, QuadratureError>;

/// Thread builder for worker `id`
fn worker_thread(id: usize) -> io::Result<thread::Builder> {
    Ok(thread::Builder::new().name(format!("quadpulse-worker-{}", id)))
}

fn run_threads<I, B>(
    integrand: &I,
    domain: &Domain,
    workers: Vec<Worker>,
    policy: SingularityPolicy,
    builder: B,
) -> Result<Vec<WorkerResult>, QuadratureError>
where
    I: Integrand + ?Sized,
    B: Fn(usize) -> io::Result<thread::Builder>,
{
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers.len());

        for worker in workers {
            let id = worker.id();
            let spawned = builder(id)
                .and_then(|b| b.spawn_scoped(scope, move || worker.run(integrand, domain, policy)));

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    log::error!("failed to spawn worker {}: {}", id, source);
                    // Join what is already running before leaving the scope
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(QuadratureError::ResourceExhausted { worker: id, source });
                }
            }
        }

        let mut results = Vec::with_capacity(handles.len());
        for (id, handle) in handles.into_iter().enumerate() {
            let result = handle
                .join()
                .unwrap_or(Err(QuadratureError::WorkerPanicked { worker: id }));
            results.push(result);
        }
        Ok(results)
    })
}

fn run_rayon<I: Integrand + ?Sized>(
    integrand: &I,
    domain: &Domain,
    workers: Vec<Worker>,
    policy: SingularityPolicy,
) -> Result<Vec<WorkerResult>, QuadratureError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.len())
        .thread_name(|i| format!("quadpulse-rayon-{}", i))
        .build()
        .map_err(|e| QuadratureError::ResourceExhausted {
            worker: 0,
            source: io::Error::new(io::ErrorKind::Other, e.to_string()),
        })?;

    // Indexed collect keeps worker order. A panic is caught per worker so
    // install() does not re-raise it on the calling thread.
    Ok(pool.install(|| {
        workers
            .into_par_iter()
            .map(|worker| {
                let id = worker.id();
                panic::catch_unwind(AssertUnwindSafe(|| worker.run(integrand, domain, policy)))
                    .unwrap_or(Err(QuadratureError::WorkerPanicked { worker: id }))
            })
            .collect()
    }))
}
