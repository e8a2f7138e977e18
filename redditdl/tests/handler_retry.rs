// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Scenario 5: a post whose handler fails once with a transient error and
//! succeeds on retry is counted as processed, not failed, and the event
//! bus sees the error before the eventual success.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;

use redditdl::application::use_cases::{default_exporters, run, RunDependencies};
use redditdl::infrastructure::config::RuntimeConfig;
use redditdl::infrastructure::event_bus::TokioEventBus;
use redditdl::infrastructure::scrapers::InMemoryScraper;
use redditdl::infrastructure::state_store::InMemoryStateStore;
use redditdl_domain::entities::{HandlerResult, PostRecord};
use redditdl_domain::error::{ErrorContext, RedditdlError};
use redditdl_domain::events::EventType;
use redditdl_domain::repositories::{ContentHandler, EventBus};
use redditdl_domain::value_objects::{ContentType, PostId};

struct FlakyOnceHandler {
    attempts: AtomicUsize,
}

#[async_trait]
impl ContentHandler for FlakyOnceHandler {
    fn name(&self) -> &str {
        "flaky"
    }
    fn priority(&self) -> i32 {
        1
    }
    fn supported_content_types(&self) -> &[ContentType] {
        &[ContentType::External]
    }
    async fn process(&self, _post: &PostRecord) -> Result<HandlerResult, RedditdlError> {
        if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(RedditdlError::network("connection reset", ErrorContext::new("test.flaky_handler")))
        } else {
            let mut result = HandlerResult::ok(Duration::ZERO);
            result.operations_performed.push("fetch_media".to_string());
            Ok(result)
        }
    }
}

fn sample_post() -> PostRecord {
    PostRecord::new(PostId::new("p1").unwrap(), "t", "alice", "alice", "/perm", "https://example.com/p1", 0, "example.com", "link")
}

#[tokio::test]
async fn a_transient_handler_failure_recovers_on_retry_and_orders_events() {
    let output_dir = std::env::temp_dir().join(format!("redditdl-e2e-retry-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&output_dir);
    std::fs::create_dir_all(&output_dir).unwrap();

    let scraper = InMemoryScraper::new(false);
    scraper.seed("u/alice", vec![sample_post()]);

    let event_bus = Arc::new(TokioEventBus::new());
    let mut events = event_bus.subscribe("");

    let mut config = RuntimeConfig::default();
    config.output_dir = output_dir.to_string_lossy().into_owned();
    config.targets = vec!["u/alice".to_string()];
    config.export_formats = vec!["json".to_string()];

    let deps = RunDependencies {
        scraper: Arc::new(scraper),
        state_store: Arc::new(InMemoryStateStore::new()),
        event_bus: event_bus.clone(),
        content_handlers: vec![Arc::new(FlakyOnceHandler { attempts: AtomicUsize::new(0) })],
        exporters: default_exporters(),
    };

    let metrics = run(&config, deps, 0).await.expect("run should succeed once the handler recovers");
    assert_eq!(metrics.posts_processed, 1);
    assert_eq!(metrics.failed_stages, 0);

    let mut saw_error_before_success = false;
    let mut saw_error = false;
    while let Ok(Some(event)) = tokio::time::timeout(Duration::from_millis(50), events.next()).await {
        match event.event_type {
            EventType::ErrorOccurred { recoverable: true, .. } => saw_error = true,
            EventType::PostProcessed { success: true, .. } if saw_error => saw_error_before_success = true,
            _ => {}
        }
    }
    assert!(saw_error_before_success, "expected an ErrorOccurred event before the successful PostProcessed event");

    let _ = std::fs::remove_dir_all(&output_dir);
}
