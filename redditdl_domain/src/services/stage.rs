// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `Stage` port (spec.md §4.1): the Pipeline Executor drives an
//! ordered list of these, threading one `Context` through all of them.

use async_trait::async_trait;

use crate::entities::context::Context;
use crate::entities::stage_result::StageResult;
use crate::error::RedditdlError;

#[async_trait]
pub trait Stage: Send + Sync {
    /// Stable name used for logs, metrics, and `Context::stage_results` keys.
    fn name(&self) -> &str;

    /// Validates this stage's slice of run configuration before the
    /// executor starts any stage, so misconfiguration fails fast
    /// (spec.md §4.1 "validate before execute").
    fn validate_config(&self, context: &Context) -> Vec<RedditdlError>;

    /// Runs before `process`; default no-op. Stages override this for
    /// setup that must happen even if `process` is skipped downstream
    /// (e.g. emitting `StageStarted`).
    async fn pre_process(&self, _context: &mut Context) -> Result<(), RedditdlError> {
        Ok(())
    }

    async fn process(&self, context: &mut Context) -> Result<StageResult, RedditdlError>;

    /// Runs after `process`, regardless of its outcome; default no-op.
    async fn post_process(&self, _context: &mut Context, _result: &StageResult) -> Result<(), RedditdlError> {
        Ok(())
    }
}
