//! Cosine kernel integrand
//!
//! Computes `(cos(t) - 1) / t`. The function has a removable singularity at
//! `t = 0` (its limit there is `0`), but the kernel evaluates the formula
//! literally, so `evaluate(0.0)` is `NaN`.

use crate::integrand::Integrand;

/// The benchmark integrand `(cos(t) - 1) / t`
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineKernel;

impl CosineKernel {
    /// Create a new cosine kernel
    pub fn new() -> Self {
        Self
    }
}

impl Integrand for CosineKernel {
    #[inline]
    fn evaluate(&self, t: f64) -> f64 {
        (t.cos() - 1.0) / t
    }

    fn name(&self) -> &str {
        "(cos(t) - 1) / t"
    }
}
