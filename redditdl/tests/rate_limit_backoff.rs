// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Scenario 6: exhausting a class's token burst back-to-back drives the
//! limiter into backoff and records the violation.

use std::time::{Duration, Instant};

use redditdl::infrastructure::rate_limit::RateLimiter;
use redditdl_domain::value_objects::RateLimitClass;

#[tokio::test]
async fn back_to_back_acquisitions_past_the_burst_wait_and_record_violations() {
    let limiter = RateLimiter::new(RateLimitClass::Api);
    let burst = limiter.class().defaults().burst;

    let start = Instant::now();
    for _ in 0..burst {
        limiter.acquire().await;
    }
    assert!(start.elapsed() < Duration::from_millis(100), "draining the initial burst should not wait");

    limiter.acquire().await;
    limiter.acquire().await;

    let stats = limiter.stats();
    assert!(stats.violations >= 2, "two acquisitions past the burst ceiling should each record a violation");
}
