// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The Acquisition stage: wraps the `AcquisitionEngine` as a `Stage` so
//! the executor can drive it alongside Filter/Processing/Export.

use async_trait::async_trait;

use redditdl_domain::entities::{Context, StageResult};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::services::Stage;

use crate::application::services::AcquisitionEngine;

pub struct AcquisitionStage {
    engine: AcquisitionEngine,
}

impl AcquisitionStage {
    pub fn new(engine: AcquisitionEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Stage for AcquisitionStage {
    fn name(&self) -> &str {
        "acquisition"
    }

    fn validate_config(&self, context: &Context) -> Vec<RedditdlError> {
        if context.targets.is_empty() {
            vec![RedditdlError::configuration(
                "no targets configured",
                redditdl_domain::error::ErrorContext::new("acquisition.validate"),
            )]
        } else {
            Vec::new()
        }
    }

    async fn process(&self, context: &mut Context) -> Result<StageResult, RedditdlError> {
        let now_epoch = chrono::Utc::now().timestamp();
        let results = self.engine.run(&context.targets, now_epoch).await;

        let mut stage_result = StageResult::new(self.name());
        for target_result in results {
            stage_result.processed_count += 1;
            if target_result.success {
                context.posts.extend(target_result.posts);
            } else {
                stage_result.record_error(format!(
                    "{}: {}",
                    target_result.target.canonical(),
                    target_result.error.unwrap_or_else(|| "unknown error".to_string())
                ));
            }
        }

        // Per-target failures don't fail the whole run: aggregate success
        // is reported by counts (spec.md §7 "Acquisition per-target
        // failures").
        stage_result.partial_success = !context.posts.is_empty();
        Ok(stage_result)
    }
}
