// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Backoff policy for optimistic concurrency retries

use crate::constants::retry::{FACTOR, INITIAL_DELAY_MS, STEPS};
use std::time::Duration;

/// Bounded backoff: `steps` attempts in total, waiting `initial_delay`
/// before the first retry and multiplying the delay by `factor` after that
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub steps: u32,
    pub initial_delay: Duration,
    pub factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            steps: STEPS,
            initial_delay: Duration::from_millis(INITIAL_DELAY_MS),
            factor: FACTOR,
        }
    }
}

impl RetryPolicy {
    pub fn with_steps(mut self, steps: u32) -> Self {
        // at least one attempt is always made
        self.steps = steps.max(1);
        self
    }

    /// Delay before the retry following `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let multiplier = self.factor.max(1.0).powi(exponent);
        Duration::from_nanos((self.initial_delay.as_nanos() as f64 * multiplier).round() as u64)
    }
}
