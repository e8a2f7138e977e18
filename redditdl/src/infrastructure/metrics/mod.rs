// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Prometheus metrics registry for the worker pools, rate limiters, and
//! pipeline executor. One `MetricsRegistry` is built per process and
//! threaded through the infrastructure adapters that report into it.

use prometheus::{Encoder, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder};

pub struct MetricsRegistry {
    registry: Registry,
    pub posts_discovered: IntCounterVec,
    pub posts_filtered_out: IntCounterVec,
    pub posts_processed: IntCounterVec,
    pub stage_failures: IntCounterVec,
    pub rate_limit_violations: IntCounterVec,
    pub pool_active_workers: IntGaugeVec,
    pub pool_queued_tasks: IntGaugeVec,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let registry = Registry::new();

        let posts_discovered =
            IntCounterVec::new(Opts::new("redditdl_posts_discovered_total", "Posts discovered per target"), &["target"])
                .expect("valid metric");
        let posts_filtered_out = IntCounterVec::new(
            Opts::new("redditdl_posts_filtered_out_total", "Posts rejected by the filter chain"),
            &["filter"],
        )
        .expect("valid metric");
        let posts_processed =
            IntCounterVec::new(Opts::new("redditdl_posts_processed_total", "Posts processed per handler"), &["handler"])
                .expect("valid metric");
        let stage_failures =
            IntCounterVec::new(Opts::new("redditdl_stage_failures_total", "Stage failures by stage name"), &["stage"])
                .expect("valid metric");
        let rate_limit_violations = IntCounterVec::new(
            Opts::new("redditdl_rate_limit_violations_total", "Rate limit violations by class"),
            &["class"],
        )
        .expect("valid metric");
        let pool_active_workers =
            IntGaugeVec::new(Opts::new("redditdl_pool_active_workers", "Active workers per pool"), &["pool"])
                .expect("valid metric");
        let pool_queued_tasks =
            IntGaugeVec::new(Opts::new("redditdl_pool_queued_tasks", "Queued tasks per pool"), &["pool"]).expect("valid metric");

        for collector in [
            Box::new(posts_discovered.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(posts_filtered_out.clone()),
            Box::new(posts_processed.clone()),
            Box::new(stage_failures.clone()),
            Box::new(rate_limit_violations.clone()),
            Box::new(pool_active_workers.clone()),
            Box::new(pool_queued_tasks.clone()),
        ] {
            registry.register(collector).expect("unique metric name");
        }

        Self {
            registry,
            posts_discovered,
            posts_filtered_out,
            posts_processed,
            stage_failures,
            rate_limit_violations,
            pool_active_workers,
            pool_queued_tasks,
        }
    }

    /// Renders the current metric snapshot in Prometheus text exposition
    /// format, for a `/metrics` endpoint.
    pub fn render(&self) -> String {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .expect("text encoding never fails for well-formed metrics");
        String::from_utf8(buffer).expect("prometheus text encoder emits utf8")
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_registered_metric_names() {
        let metrics = MetricsRegistry::new();
        metrics.posts_discovered.with_label_values(&["r/rust"]).inc();
        let rendered = metrics.render();
        assert!(rendered.contains("redditdl_posts_discovered_total"));
    }
}
