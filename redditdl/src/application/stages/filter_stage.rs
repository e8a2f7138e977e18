// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The Filter stage: prunes `Context.posts` through the `FilterChain`.

use async_trait::async_trait;

use redditdl_domain::entities::{Context, StageResult};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::services::Stage;

use crate::application::services::FilterChain;

pub struct FilterStage {
    chain: FilterChain,
}

impl FilterStage {
    pub fn new(chain: FilterChain) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Stage for FilterStage {
    fn name(&self) -> &str {
        "filter"
    }

    fn validate_config(&self, _context: &Context) -> Vec<RedditdlError> {
        self.chain
            .validate_config()
            .into_iter()
            .map(|message| RedditdlError::configuration(message, redditdl_domain::error::ErrorContext::new("filter.validate")))
            .collect()
    }

    async fn process(&self, context: &mut Context) -> Result<StageResult, RedditdlError> {
        let mut result = StageResult::new(self.name());
        let mut kept = Vec::with_capacity(context.posts.len());

        for post in context.posts.drain(..).collect::<Vec<_>>() {
            let outcome = self.chain.evaluate(&post, post.id.clone());
            result.processed_count += 1;
            for warning in outcome.warnings {
                result.record_warning(warning);
            }
            if outcome.passed {
                kept.push(post);
            }
        }

        result.data.insert(
            "filtered_out".to_string(),
            serde_json::Value::from(result.processed_count - kept.len()),
        );
        context.posts = kept;
        Ok(result)
    }
}
