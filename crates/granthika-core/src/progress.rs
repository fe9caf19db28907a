//! Progress arithmetic for batch runs.
//!
//! The backend reports raw counters; everything derived from them —
//! percentages, elapsed time, remaining-time estimates — is computed here
//! so the views stay free of arithmetic.

use instant::Instant;

/// Completion percentage as an integer in `[0, 100]`.
///
/// Returns 0 when `total` is 0, and clamps overshoot (a poll can report
/// `processed > total` transiently while the backend is mid-file).
pub fn percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (processed as f64 / total as f64) * 100.0;
    pct.round().clamp(0.0, 100.0) as u8
}

/// Estimated seconds remaining, from the observed processed-row rate.
///
/// `None` while nothing has been processed yet (the UI shows
/// "calculating…") or once the run is done.
pub fn estimated_remaining_secs(elapsed_secs: f64, processed: usize, total: usize) -> Option<f64> {
    if processed == 0 || processed >= total || elapsed_secs <= 0.0 {
        return None;
    }
    let rate = processed as f64 / elapsed_secs;
    Some((total - processed) as f64 / rate)
}

/// Wall-clock timer for a batch run, WASM-safe via `instant`.
#[derive(Debug, Clone, Copy)]
pub struct RunTimer {
    start: Instant,
}

impl RunTimer {
    /// Starts the timer now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since start.
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Milliseconds elapsed since start.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_zero_for_empty_totals() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 0), 0);
    }

    #[test]
    fn percent_rounds_to_nearest_integer() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(5, 10), 50);
        assert_eq!(percent(10, 10), 100);
    }

    #[test]
    fn percent_stays_within_bounds() {
        for processed in 0..=20 {
            for total in 0..=10 {
                let p = percent(processed, total);
                assert!(p <= 100, "percent({processed}, {total}) = {p}");
            }
        }
        // Transient overshoot clamps instead of exceeding 100.
        assert_eq!(percent(15, 10), 100);
    }

    #[test]
    fn remaining_is_unknown_before_first_row() {
        assert_eq!(estimated_remaining_secs(10.0, 0, 100), None);
    }

    #[test]
    fn remaining_is_unknown_once_done() {
        assert_eq!(estimated_remaining_secs(10.0, 100, 100), None);
        assert_eq!(estimated_remaining_secs(10.0, 120, 100), None);
    }

    #[test]
    fn remaining_follows_observed_rate() {
        // 50 rows in 100s -> 0.5 rows/s -> 50 remaining rows need 100s.
        let remaining = estimated_remaining_secs(100.0, 50, 100).unwrap();
        assert!((remaining - 100.0).abs() < 1e-9);
    }

    #[test]
    fn run_timer_elapses() {
        let timer = RunTimer::start();
        assert!(timer.elapsed_secs() >= 0.0);
        assert!(timer.elapsed_ms() < 60_000);
    }
}
