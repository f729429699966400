// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Bounded retry for idempotent reads.
//!
//! Only GET requests that failed before a response arrived are retried.
//! Delays grow exponentially from `base_delay` with ±`jitter` randomization
//! and are capped at `max_delay`.

use std::time::Duration;

use rand::Rng;

/// Retry policy for idempotent reads.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound for any delay.
    pub max_delay: Duration,
    /// Jitter factor in `0.0..=1.0`.
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            jitter: 0.2,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Sets the retry count.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the jitter factor.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Returns the delay before retry number `retry` (1-based), or `None`
    /// once the budget is spent.
    pub fn delay_for(&self, retry: u32) -> Option<Duration> {
        if retry == 0 || retry > self.max_retries {
            return None;
        }
        let base = self.base_delay.as_millis() as f64 * 2f64.powi(retry as i32 - 1);
        let capped = base.min(self.max_delay.as_millis() as f64);
        Some(apply_jitter(capped, self.jitter))
    }
}

fn apply_jitter(millis: f64, jitter: f64) -> Duration {
    if jitter <= 0.0 {
        return Duration::from_millis(millis as u64);
    }
    let factor = rand::thread_rng().gen_range(-jitter..=jitter);
    Duration::from_millis((millis * (1.0 + factor)).max(0.0) as u64)
}
