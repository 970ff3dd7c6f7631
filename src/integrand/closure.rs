//! Closure-backed integrand
//!
//! Wraps any `Fn(f64) -> f64 + Sync` so the quadrature can serve arbitrary
//! integrands without a dedicated type.

use crate::integrand::Integrand;
use std::fmt;

/// Integrand backed by a closure
///
/// # Example
///
/// ```
/// use quadpulse::integrand::{FnIntegrand, Integrand};
///
/// let square = FnIntegrand::new("t^2", |t| t * t);
/// assert_eq!(square.evaluate(3.0), 9.0);
/// assert_eq!(square.name(), "t^2");
/// ```
pub struct FnIntegrand<F> {
    name: String,
    func: F,
}

impl<F> FnIntegrand<F>
where
    F: Fn(f64) -> f64 + Sync,
{
    /// Create a named integrand from a closure
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Integrand for FnIntegrand<F>
where
    F: Fn(f64) -> f64 + Sync,
{
    #[inline]
    fn evaluate(&self, t: f64) -> f64 {
        (self.func)(t)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnIntegrand<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnIntegrand").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_integrand_evaluates_closure() {
        let linear = FnIntegrand::new("2t + 1", |t| 2.0 * t + 1.0);
        assert_eq!(linear.evaluate(0.0), 1.0);
        assert_eq!(linear.evaluate(2.5), 6.0);
    }

    #[test]
    fn test_fn_integrand_captures_environment() {
        let scale = 3.0;
        let scaled = FnIntegrand::new("scaled", move |t| scale * t);
        assert_eq!(scaled.evaluate(2.0), 6.0);
    }

    #[test]
    fn test_fn_integrand_debug_shows_name() {
        let f = FnIntegrand::new("sin", f64::sin);
        assert_eq!(format!("{:?}", f), "FnIntegrand { name: \"sin\" }");
    }
}
