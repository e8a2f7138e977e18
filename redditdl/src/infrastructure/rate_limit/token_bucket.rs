// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Token-bucket rate limiting per class (spec.md §4.5).
//!
//! Each `RateLimitClass` gets its own bucket: a burst ceiling, a refill
//! rate, a concurrency semaphore, and an exponential backoff that engages
//! on consecutive violations.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use redditdl_domain::value_objects::{RateLimitClass, RateLimitDefaults};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Snapshot of one limiter's counters, for metrics/observability
/// (spec.md §4.5 "Observability").
#[derive(Debug, Clone, Copy)]
pub struct RateLimiterStats {
    pub requests: u64,
    pub violations: u64,
    pub total_wait: Duration,
    pub tokens: f64,
    pub in_backoff: bool,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
    backoff_until: Option<Instant>,
    consecutive_violations: u32,
    requests: u64,
    violations: u64,
    total_wait: Duration,
}

/// One class's token bucket plus its concurrency semaphore
/// (spec.md §4.5 algorithm).
pub struct RateLimiter {
    class: RateLimitClass,
    defaults: RateLimitDefaults,
    state: Mutex<BucketState>,
    semaphore: Semaphore,
}

impl RateLimiter {
    pub fn new(class: RateLimitClass) -> Self {
        let defaults = class.defaults();
        Self {
            class,
            defaults,
            state: Mutex::new(BucketState {
                tokens: defaults.burst as f64,
                last_refill: Instant::now(),
                backoff_until: None,
                consecutive_violations: 0,
                requests: 0,
                violations: 0,
                total_wait: Duration::ZERO,
            }),
            semaphore: Semaphore::new(defaults.max_concurrent),
        }
    }

    pub fn class(&self) -> RateLimitClass {
        self.class
    }

    /// Acquires a token, blocking (asynchronously) through backoff and
    /// concurrency limits as needed (spec.md §4.5 `acquire()`).
    pub async fn acquire(&self) {
        let _permit = self.semaphore.acquire().await.expect("semaphore never closed");

        loop {
            let now = Instant::now();
            let wait = {
                let mut state = self.state.lock();

                if let Some(until) = state.backoff_until {
                    if now < until {
                        Some(until - now)
                    } else {
                        state.backoff_until = None;
                        None
                    }
                } else {
                    None
                }
            };

            if let Some(wait) = wait {
                tokio::time::sleep(wait).await;
                let mut state = self.state.lock();
                state.total_wait += wait;
                continue;
            }

            let mut state = self.state.lock();
            let elapsed = now.duration_since(state.last_refill).as_secs_f64();
            state.tokens = (state.tokens + elapsed * self.defaults.refill_rate).min(self.defaults.burst as f64);
            state.last_refill = now;

            if state.tokens >= 1.0 {
                state.tokens -= 1.0;
                state.requests += 1;
                state.consecutive_violations = 0;
                debug!(class = %self.class, tokens = state.tokens, "acquired rate-limit token");
                return;
            }

            state.consecutive_violations += 1;
            state.violations += 1;
            let backoff_secs =
                (self.defaults.base_backoff_factor.powi(state.consecutive_violations as i32) * 0.1)
                    .min(self.defaults.max_backoff_secs);
            let until = now + Duration::from_secs_f64(backoff_secs);
            state.backoff_until = Some(until);
            warn!(class = %self.class, violations = state.consecutive_violations, backoff_secs, "rate limit exceeded, backing off");
        }
    }

    pub fn stats(&self) -> RateLimiterStats {
        let state = self.state.lock();
        RateLimiterStats {
            requests: state.requests,
            violations: state.violations,
            total_wait: state.total_wait,
            tokens: state.tokens,
            in_backoff: state.backoff_until.map(|u| u > Instant::now()).unwrap_or(false),
        }
    }

    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.tokens = self.defaults.burst as f64;
        state.last_refill = Instant::now();
        state.backoff_until = None;
        state.consecutive_violations = 0;
    }
}

/// Process-wide set of limiters keyed by class (spec.md §4.5).
pub struct RateLimitCoordinator {
    limiters: Vec<Arc<RateLimiter>>,
}

impl RateLimitCoordinator {
    pub fn new() -> Self {
        Self {
            limiters: RateLimitClass::ALL.iter().map(|c| Arc::new(RateLimiter::new(*c))).collect(),
        }
    }

    pub fn limiter(&self, class: RateLimitClass) -> Arc<RateLimiter> {
        self.limiters
            .iter()
            .find(|l| l.class() == class)
            .cloned()
            .expect("every RateLimitClass has a limiter")
    }

    pub async fn acquire(&self, class: RateLimitClass) {
        self.limiter(class).acquire().await;
    }

    pub fn stats(&self) -> Vec<(RateLimitClass, RateLimiterStats)> {
        self.limiters.iter().map(|l| (l.class(), l.stats())).collect()
    }
}

impl Default for RateLimitCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_acquire_never_waits() {
        let limiter = RateLimiter::new(RateLimitClass::Downloads);
        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn exhausting_burst_triggers_backoff_and_records_violation() {
        let limiter = RateLimiter::new(RateLimitClass::Api);
        for _ in 0..limiter.defaults.burst {
            limiter.acquire().await;
        }
        limiter.acquire().await;
        assert!(limiter.stats().violations >= 1);
    }
}
