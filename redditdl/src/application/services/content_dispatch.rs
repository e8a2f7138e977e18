// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Content-Handler Dispatch (spec.md §4.4): classifies each post, picks
//! the highest-priority matching handler, and routes handler failures
//! through the recovery manager.

use std::sync::Arc;

use redditdl_domain::entities::{HandlerResult, PostRecord};
use redditdl_domain::repositories::ContentHandler;

use super::filter::classify;
use super::recovery::{RecoveryManager, RecoveryStrategy};

pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn ContentHandler>>,
}

/// Outcome of dispatching one post. `Skipped` means no handler matched;
/// that is not a failure (spec.md §4.4 "If no handler matches, post is
/// skipped, not failed").
pub enum DispatchOutcome {
    Handled(HandlerResult),
    Skipped,
    Recovered(HandlerResult),
    Failed(HandlerResult),
}

impl HandlerRegistry {
    pub fn new(mut handlers: Vec<Arc<dyn ContentHandler>>) -> Self {
        handlers.sort_by_key(|h| h.priority());
        Self { handlers }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Detects the post's content type, finds the highest-priority
    /// handler whose `can_handle` claims it, and processes it. Handler
    /// failures are handed to the recovery manager; a retry strategy is
    /// attempted once before the post counts as failed.
    pub async fn dispatch(&self, post: &PostRecord, recovery: &RecoveryManager) -> DispatchOutcome {
        let content_type = classify(post);

        let Some(handler) = self.handlers.iter().find(|h| h.can_handle(content_type, post)) else {
            return DispatchOutcome::Skipped;
        };

        match handler.process(post).await {
            Ok(result) if result.success => DispatchOutcome::Handled(result),
            Ok(result) => {
                let error = redditdl_domain::error::RedditdlError::processing(
                    result.error.clone().unwrap_or_else(|| "handler reported failure".to_string()),
                    redditdl_domain::error::ErrorContext::new("content_dispatch.process").with_post_id(post.id.as_str()),
                );
                let outcome = recovery.recover(&error);
                if outcome.strategy_used == RecoveryStrategy::Retry {
                    match handler.process(post).await {
                        Ok(retry_result) if retry_result.success => DispatchOutcome::Recovered(retry_result),
                        Ok(retry_result) => DispatchOutcome::Failed(retry_result),
                        Err(_) => DispatchOutcome::Failed(result),
                    }
                } else {
                    DispatchOutcome::Failed(result)
                }
            }
            Err(error) => {
                let outcome = recovery.recover(&error);
                if outcome.strategy_used == RecoveryStrategy::Retry {
                    match handler.process(post).await {
                        Ok(retry_result) if retry_result.success => DispatchOutcome::Recovered(retry_result),
                        Ok(retry_result) => DispatchOutcome::Failed(retry_result),
                        Err(retry_err) => DispatchOutcome::Failed(HandlerResult::failed(retry_err.message, std::time::Duration::ZERO)),
                    }
                } else {
                    DispatchOutcome::Failed(HandlerResult::failed(error.message, std::time::Duration::ZERO))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use redditdl_domain::error::RedditdlError;
    use redditdl_domain::value_objects::{ContentType, PostId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FlakyHandler {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl ContentHandler for FlakyHandler {
        fn name(&self) -> &str {
            "flaky"
        }
        fn priority(&self) -> i32 {
            10
        }
        fn supported_content_types(&self) -> &[ContentType] {
            &[ContentType::External]
        }
        async fn process(&self, _post: &PostRecord) -> Result<HandlerResult, RedditdlError> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(RedditdlError::network("timeout", redditdl_domain::error::ErrorContext::new("test")))
            } else {
                Ok(HandlerResult::ok(Duration::ZERO))
            }
        }
    }

    fn sample_post() -> PostRecord {
        PostRecord::new(
            PostId::new("t3_1").unwrap(),
            "t",
            "a",
            "g",
            "/p",
            "https://example.com",
            0,
            "example.com",
            "link",
        )
    }

    #[tokio::test]
    async fn a_transient_failure_is_retried_and_recovers() {
        let registry = HandlerRegistry::new(vec![Arc::new(FlakyHandler { attempts: AtomicUsize::new(0) })]);
        let recovery = RecoveryManager::new();
        let outcome = registry.dispatch(&sample_post(), &recovery).await;
        assert!(matches!(outcome, DispatchOutcome::Recovered(_)));
    }

    #[tokio::test]
    async fn no_matching_handler_is_skipped_not_failed() {
        let registry = HandlerRegistry::new(vec![]);
        let recovery = RecoveryManager::new();
        let outcome = registry.dispatch(&sample_post(), &recovery).await;
        assert!(matches!(outcome, DispatchOutcome::Skipped));
    }
}
