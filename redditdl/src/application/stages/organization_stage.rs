// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The Organization stage: optionally restructures handler output into
//! per-subreddit subdirectories. A no-op when `organize_by_subreddit` is
//! unset (spec.md §2 gives this stage almost no detail).

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use redditdl_domain::entities::{Context, StageResult};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::services::Stage;

pub struct OrganizationStage;

impl OrganizationStage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OrganizationStage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Stage for OrganizationStage {
    fn name(&self) -> &str {
        "organization"
    }

    fn validate_config(&self, _context: &Context) -> Vec<RedditdlError> {
        Vec::new()
    }

    async fn process(&self, context: &mut Context) -> Result<StageResult, RedditdlError> {
        let mut result = StageResult::new(self.name());

        let organize = context
            .config
            .get("organize_by_subreddit")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        if !organize {
            return Ok(result);
        }

        for post in &mut context.posts {
            result.processed_count += 1;
            let subreddit_dir_name = post.source_group.clone();

            for path in &mut post.annotations.output_paths {
                let original = PathBuf::from(path.clone());
                let Some(parent) = original.parent() else { continue };
                let Some(file_name) = original.file_name() else { continue };

                let target_dir = parent.join(&subreddit_dir_name);
                let target_path = target_dir.join(file_name);

                if target_path == original {
                    continue;
                }

                if let Err(error) = fs::create_dir_all(&target_dir).await {
                    result.record_error(format!("{}: {error}", subreddit_dir_name));
                    continue;
                }
                if let Err(error) = fs::rename(&original, &target_path).await {
                    result.record_error(format!("{}: {error}", subreddit_dir_name));
                    continue;
                }

                *path = target_path.to_string_lossy().into_owned();
            }
        }

        result.partial_success = result.error_count == 0;
        Ok(result)
    }
}
