// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `ExecutionMetrics` (spec.md §4.1): the pipeline executor's summary of a
//! full run, surfaced to the CLI and to Prometheus.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    pub successful_stages: usize,
    pub failed_stages: usize,
    pub skipped_stages: usize,
    pub posts_discovered: usize,
    pub posts_filtered_out: usize,
    pub posts_processed: usize,
    pub posts_exported: usize,
    #[serde(with = "crate::entities::duration_millis")]
    pub total_duration: Duration,
}

impl ExecutionMetrics {
    pub fn record_stage(&mut self, success: bool) {
        if success {
            self.successful_stages += 1;
        } else {
            self.failed_stages += 1;
        }
    }
}
