//! QuadPulse - Parallel Riemann-sum integration benchmark
//!
//! QuadPulse approximates the integral of `(cos(t) - 1) / t` over `[a, x]`
//! with a left-endpoint Riemann sum, first sequentially and then as a
//! data-parallel reduction for each configured thread count, and reports the
//! result and wall-clock time of every run.
//!
//! # Architecture
//!
//! - **Integrands**: the [`Integrand`] trait, the cosine kernel and closures
//! - **Quadrature**: domain validation, index partitioning, summation
//! - **Workers**: scoped OS threads or a rayon pool, ordered reduction
//! - **Coordinator**: sequential baseline, then one run per thread count
//! - **Output**: text summary, JSON and CSV reports

pub mod config;
pub mod coordinator;
pub mod integrand;
pub mod output;
pub mod quadrature;
pub mod stats;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use integrand::Integrand;
pub use quadrature::{
    integrate_parallel, integrate_parallel_with, integrate_sequential, integrate_sequential_with,
    Domain, QuadratureError, SingularityPolicy,
};
pub use worker::Backend;

/// Result type used throughout QuadPulse
pub type Result<T> = anyhow::Result<T>;
