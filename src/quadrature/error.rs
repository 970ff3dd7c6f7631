//! Quadrature error taxonomy

use std::io;
use thiserror::Error;

/// Errors raised by the quadrature core
///
/// The core never retries and never degrades to fewer workers: every error
/// is reported to the caller as soon as it is detected.
#[derive(Debug, Error)]
pub enum QuadratureError {
    /// A precondition on the call arguments was violated (non-positive
    /// sample or worker count, non-finite bound). Raised before any work.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The integrand produced a non-finite value while the guarded policy
    /// was active.
    #[error("numerical singularity at sample {index} (t = {t}): integrand returned {value}")]
    NumericalSingularity { index: u64, t: f64, value: f64 },

    /// A worker thread could not be created.
    #[error("failed to spawn worker {worker}")]
    ResourceExhausted {
        worker: usize,
        #[source]
        source: io::Error,
    },

    /// A worker thread panicked before handing back its partial sum.
    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

impl QuadratureError {
    /// Convenience constructor for `InvalidArgument`
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// True for errors caused by the caller's arguments
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
