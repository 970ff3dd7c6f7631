//! Wall-clock timing utilities
//!
//! Benchmark runs are timed with a monotonic clock and reported in whole
//! milliseconds; finer units are kept for JSON output and statistics.

use std::time::{Duration, Instant};

/// Monotonic timestamp for run timing
///
/// Thin wrapper around `std::time::Instant`. Elapsed values are never
/// negative.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    instant: Instant,
}

impl Timestamp {
    /// Create a new timestamp representing the current time
    #[inline]
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
        }
    }

    /// Get the elapsed time since this timestamp
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }
}

/// Run `f` and return its output with the elapsed wall-clock time
///
/// # Examples
///
/// ```
/// use quadpulse::util::time::timed;
///
/// let (sum, elapsed) = timed(|| (1..=10).sum::<u32>());
/// assert_eq!(sum, 55);
/// assert!(elapsed.as_nanos() < 1_000_000_000);
/// ```
#[inline]
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Timestamp::now();
    let out = f();
    (out, start.elapsed())
}

/// Format a duration in human-readable form
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use quadpulse::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
/// assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}us", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos as f64 / 1_000_000_000.0)
    }
}

/// Format a speedup factor (e.g. "3.42x"), or "-" when unknown
pub fn format_speedup(speedup: Option<f64>) -> String {
    match speedup {
        Some(s) => format!("{:.2}x", s),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_timestamp_elapsed() {
        let start = Timestamp::now();
        thread::sleep(Duration::from_millis(10));
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(10));
        assert!(start.elapsed() >= elapsed);
    }

    #[test]
    fn test_timed_returns_output() {
        let (value, elapsed) = timed(|| {
            thread::sleep(Duration::from_millis(5));
            42
        });
        assert_eq!(value, 42);
        assert!(elapsed >= Duration::from_millis(5));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
    }

    #[test]
    fn test_format_speedup() {
        assert_eq!(format_speedup(Some(3.4159)), "3.42x");
        assert_eq!(format_speedup(None), "-");
    }
}
