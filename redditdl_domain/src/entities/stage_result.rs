// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `StageResult` (spec.md §4.1): what a `Stage::process` returns to the
//! executor.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    pub stage_name: String,
    pub processed_count: usize,
    pub error_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub data: HashMap<String, serde_json::Value>,
    #[serde(with = "crate::entities::duration_millis")]
    pub duration: Duration,
    /// Explicit partial-success marker: when set, `success()` reports
    /// `true` even with `error_count > 0` (spec.md §4.1 "partial success").
    pub partial_success: bool,
    /// Set by a stage that deliberately did nothing this run (e.g.
    /// Processing under `dry_run`). Counted in `ExecutionMetrics.skipped_stages`
    /// rather than `successful_stages`.
    pub skipped: bool,
}

impl StageResult {
    pub fn new(stage_name: impl Into<String>) -> Self {
        Self {
            stage_name: stage_name.into(),
            processed_count: 0,
            error_count: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            data: HashMap::new(),
            duration: Duration::ZERO,
            partial_success: false,
            skipped: false,
        }
    }

    /// `success == (error_count == 0)` unless explicitly marked as a
    /// partial success (spec.md §4.1 invariant).
    pub fn success(&self) -> bool {
        self.error_count == 0 || self.partial_success
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.error_count += 1;
        self.errors.push(message.into());
    }

    pub fn record_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_run_is_successful() {
        let result = StageResult::new("filter");
        assert!(result.success());
    }

    #[test]
    fn errors_fail_the_stage_by_default() {
        let mut result = StageResult::new("filter");
        result.record_error("boom");
        assert!(!result.success());
    }

    #[test]
    fn partial_success_overrides_error_count() {
        let mut result = StageResult::new("acquisition");
        result.record_error("one post failed");
        result.partial_success = true;
        assert!(result.success());
    }
}
