// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The Processing stage: dispatches each surviving post to a
//! `ContentHandler` via the `HandlerRegistry`, additively annotating the
//! post with whatever the handler produced.

use async_trait::async_trait;

use redditdl_domain::entities::{Context, StageResult};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::events::{Event, EventType};
use redditdl_domain::services::Stage;

use crate::application::services::{DispatchOutcome, HandlerRegistry, RecoveryManager};

pub struct ProcessingStage {
    registry: HandlerRegistry,
    recovery: RecoveryManager,
    dry_run: bool,
}

impl ProcessingStage {
    pub fn new(registry: HandlerRegistry, dry_run: bool) -> Self {
        Self { registry, recovery: RecoveryManager::new(), dry_run }
    }
}

#[async_trait]
impl Stage for ProcessingStage {
    fn name(&self) -> &str {
        "processing"
    }

    fn validate_config(&self, _context: &Context) -> Vec<RedditdlError> {
        Vec::new()
    }

    /// `dry_run` skips this stage entirely (spec.md §6): acquisition,
    /// filter, and export still run.
    async fn process(&self, context: &mut Context) -> Result<StageResult, RedditdlError> {
        let mut result = StageResult::new(self.name());

        if self.dry_run {
            result.record_warning("dry_run enabled, processing skipped");
            result.skipped = true;
            return Ok(result);
        }

        let mut skipped = 0usize;
        let now_epoch = chrono::Utc::now().timestamp();
        let event_bus = context.event_bus().clone();
        let session_id = context.session_id;

        for post in &mut context.posts {
            result.processed_count += 1;
            let post_id = post.id.as_str().to_string();
            match self.registry.dispatch(post, &self.recovery).await {
                DispatchOutcome::Handled(handler_result) => {
                    post.annotations.output_paths.extend(handler_result.files_created);
                    post.annotations.embedded_metadata |= handler_result.embedded_metadata;
                    post.annotations.sidecar_created |= handler_result.sidecar_created;
                    let _ = event_bus.emit(Event::new(
                        now_epoch,
                        session_id,
                        EventType::PostProcessed { post_id, handler: "processing".to_string(), success: true },
                    ));
                }
                DispatchOutcome::Recovered(handler_result) => {
                    post.annotations.output_paths.extend(handler_result.files_created);
                    post.annotations.embedded_metadata |= handler_result.embedded_metadata;
                    post.annotations.sidecar_created |= handler_result.sidecar_created;
                    // The attempt that triggered the retry is not itself
                    // surfaced by `HandlerRegistry::dispatch`; report it
                    // here so subscribers see the error before the
                    // eventual success (spec.md §8 scenario 5).
                    let _ = event_bus.emit(Event::new(
                        now_epoch,
                        session_id,
                        EventType::ErrorOccurred {
                            kind: "processing".to_string(),
                            message: "transient handler failure, retried".to_string(),
                            stage: Some(self.name().to_string()),
                            recoverable: true,
                            extra: Default::default(),
                        },
                    ));
                    let _ = event_bus.emit(Event::new(
                        now_epoch,
                        session_id,
                        EventType::PostProcessed { post_id, handler: "processing".to_string(), success: true },
                    ));
                }
                DispatchOutcome::Skipped => skipped += 1,
                DispatchOutcome::Failed(handler_result) => {
                    let message = handler_result.error.clone().unwrap_or_else(|| "handler failed".to_string());
                    let _ = event_bus.emit(Event::new(
                        now_epoch,
                        session_id,
                        EventType::ErrorOccurred {
                            kind: "processing".to_string(),
                            message: message.clone(),
                            stage: Some(self.name().to_string()),
                            recoverable: false,
                            extra: Default::default(),
                        },
                    ));
                    let _ = event_bus.emit(Event::new(
                        now_epoch,
                        session_id,
                        EventType::PostProcessed { post_id, handler: "processing".to_string(), success: false },
                    ));
                    result.record_error(message);
                }
            }
        }

        result.data.insert("skipped".to_string(), serde_json::Value::from(skipped));
        result.partial_success = result.processed_count > result.error_count;
        Ok(result)
    }
}
