//! Bounded retry with linear backoff.
//!
//! Isolated from any transport so attempt accounting and backoff can be
//! tested with a plain failing/succeeding closure.

use std::time::Duration;

/// Retry policy: total attempt count plus the linear backoff step.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Backoff grows by one step per failed attempt
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_millis(1500),
        }
    }
}

impl RetryPolicy {
    /// Delay slept after failed attempt `attempt` (1-based):
    /// step, 2x step, 3x step, ...
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }

    /// Run `op` until it succeeds or attempts are exhausted.
    ///
    /// Sleeps `delay_after(k)` between failed attempt `k` and attempt
    /// `k + 1`; the final failure returns immediately with the last
    /// error. `op` receives the 1-based attempt number.
    pub fn run<T, E, F>(&self, label: &str, mut op: F) -> Result<T, E>
    where
        E: std::fmt::Display,
        F: FnMut(u32) -> Result<T, E>,
    {
        // A zero-attempt policy would have no error to return; always try once.
        let max_attempts = self.max_attempts.max(1);

        let mut last_err = None;
        for attempt in 1..=max_attempts {
            if attempt > 1 {
                let delay = self.delay_after(attempt - 1);
                log::info!("Retrying {label} (attempt {attempt}/{max_attempts}) after {delay:?}");
                std::thread::sleep(delay);
            }

            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    log::warn!("{label}: attempt {attempt} failed: {e}");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.expect("at least one attempt was made"))
    }
}
