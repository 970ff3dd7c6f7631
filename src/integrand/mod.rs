//! Integrand implementations
//!
//! An integrand is a pure scalar function `f(t)` sampled by the quadrature
//! workers at arbitrary points. The same instance is shared by reference
//! across every worker of a call, so implementations must not carry mutable
//! state.
//!
//! # Integrands
//!
//! - **CosineKernel**: `(cos(t) - 1) / t`, the default benchmark integrand
//! - **FnIntegrand**: adapter for any `Fn(f64) -> f64` closure
//!
//! # Example
//!
//! ```
//! use quadpulse::integrand::{Integrand, cosine::CosineKernel};
//!
//! let kernel = CosineKernel::new();
//! let value = kernel.evaluate(1.0);
//! assert!((value - (1.0f64.cos() - 1.0)).abs() < 1e-15);
//!
//! // The kernel is singular at zero: 0/0 yields NaN
//! assert!(kernel.evaluate(0.0).is_nan());
//! ```

/// Integrand trait for quadrature sampling
///
/// # Thread Safety
///
/// Integrands must be `Sync`: a single instance is borrowed by all workers
/// of a parallel call at the same time.
///
/// # Singularities
///
/// Implementations do not special-case singular points. A sample that
/// produces `NaN` or an infinity is handed to the quadrature as is; the
/// caller's [`SingularityPolicy`](crate::quadrature::SingularityPolicy)
/// decides what happens to it.
pub trait Integrand: Sync {
    /// Evaluate the function at `t`
    fn evaluate(&self, t: f64) -> f64;

    /// Short human-readable name used in reports
    fn name(&self) -> &str;
}

impl<T: Integrand + ?Sized> Integrand for &T {
    #[inline]
    fn evaluate(&self, t: f64) -> f64 {
        (**self).evaluate(t)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

pub mod closure;
pub mod cosine;

pub use closure::FnIntegrand;
pub use cosine::CosineKernel;
