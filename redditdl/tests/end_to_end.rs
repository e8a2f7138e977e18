// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end scenarios driving the full `run()` use case against an
//! `InMemoryScraper`, exercising the Acquisition/Filter/Processing/
//! Organization/Export pipeline the way the CLI composition root wires
//! it.

use std::sync::Arc;

use redditdl::application::use_cases::{default_content_handlers, default_exporters, run, RunDependencies};
use redditdl::application::services::filter::Filter;
use redditdl::application::services::filters::ScoreFilter;
use redditdl::application::services::FilterChain;
use redditdl::infrastructure::config::{ErrorHandlingPolicy, FilterComposition, RuntimeConfig};
use redditdl::infrastructure::event_bus::TokioEventBus;
use redditdl::infrastructure::scrapers::InMemoryScraper;
use redditdl::infrastructure::state_store::InMemoryStateStore;
use redditdl_domain::value_objects::PostId;
use redditdl_domain::entities::PostRecord;

fn sample_post(id: &str, author: &str, source_group: &str, score: i64) -> PostRecord {
    let mut post = PostRecord::new(
        PostId::new(id).unwrap(),
        format!("title for {id}"),
        author,
        source_group,
        format!("/r/{source_group}/{id}"),
        format!("https://example.com/{id}"),
        0,
        "example.com",
        "link",
    );
    post.score = score;
    post
}

fn scratch_dir(label: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("redditdl-e2e-{label}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn base_config(output_dir: &std::path::Path) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    config.output_dir = output_dir.to_string_lossy().into_owned();
    config
}

fn dependencies(scraper: InMemoryScraper, output_dir: &std::path::Path) -> RunDependencies {
    RunDependencies {
        scraper: Arc::new(scraper),
        state_store: Arc::new(InMemoryStateStore::new()),
        event_bus: Arc::new(TokioEventBus::new()),
        content_handlers: default_content_handlers(output_dir.to_path_buf()),
        exporters: default_exporters(),
    }
}

/// Scenario 1: single user, dry-run. Processing is skipped; Acquisition,
/// Filter, Organization, and Export still run and succeed, so
/// `skipped_stages == 1` and `successful_stages == 4`.
#[tokio::test]
async fn single_user_dry_run_exports_all_discovered_posts() {
    let output_dir = scratch_dir("dry-run");
    std::fs::create_dir_all(&output_dir).unwrap();

    let scraper = InMemoryScraper::new(false);
    scraper.seed("u/alice", vec![sample_post("p1", "alice", "alice", 1), sample_post("p2", "alice", "alice", 2), sample_post("p3", "alice", "alice", 3)]);

    let mut config = base_config(&output_dir);
    config.targets = vec!["u/alice".to_string()];
    config.dry_run = true;
    config.export_formats = vec!["json".to_string()];

    let metrics = run(&config, dependencies(scraper, &output_dir), 0).await.expect("run should succeed");

    assert_eq!(metrics.failed_stages, 0);
    assert_eq!(metrics.skipped_stages, 1, "processing stage should be skipped under dry_run");
    assert_eq!(metrics.successful_stages, 4, "acquisition, filter, organization, export");
    assert_eq!(metrics.posts_discovered, 3);
    assert_eq!(metrics.posts_processed, 0, "dry_run never dispatches handlers");

    let exported = std::fs::read_dir(&output_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .find(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
        .expect("export stage should have written one json file");
    let contents: serde_json::Value = serde_json::from_slice(&std::fs::read(exported.path()).unwrap()).unwrap();
    let ids: Vec<&str> = contents["posts"].as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);

    let _ = std::fs::remove_dir_all(&output_dir);
}

/// Scenario 2: two subreddits acquired concurrently; both contribute
/// their full post sets into `Context.posts` by the time Export runs.
#[tokio::test]
async fn two_subreddits_contribute_their_full_post_sets() {
    let output_dir = scratch_dir("two-subs");
    std::fs::create_dir_all(&output_dir).unwrap();

    let scraper = InMemoryScraper::new(false);
    scraper.seed("r/foo", (0..5).map(|i| sample_post(&format!("foo{i}"), "a", "foo", 0)).collect());
    scraper.seed("r/bar", (0..5).map(|i| sample_post(&format!("bar{i}"), "a", "bar", 0)).collect());

    let mut config = base_config(&output_dir);
    config.targets = vec!["r/foo".to_string(), "r/bar".to_string()];
    config.concurrent_targets = 2;
    config.post_limit = 5;
    config.dry_run = true;
    config.export_formats = vec!["json".to_string()];

    let metrics = run(&config, dependencies(scraper, &output_dir), 0).await.expect("run should succeed");

    assert_eq!(metrics.posts_discovered, 10);
    assert_eq!(metrics.failed_stages, 0);

    let _ = std::fs::remove_dir_all(&output_dir);
}

/// Scenario 3: AND-composed score filter rejects posts outside the
/// [10, 100] window.
#[test]
fn and_filter_rejects_posts_outside_the_score_window() {
    let filters: Vec<Box<dyn Filter>> = vec![Box::new(ScoreFilter { min: Some(10), max: Some(100) })];
    let chain = FilterChain::new(filters, FilterComposition::And);

    let posts = [sample_post("p1", "a", "g", 5), sample_post("p2", "a", "g", 50), sample_post("p3", "a", "g", 500)];
    let passed: Vec<bool> = posts.iter().map(|p| chain.evaluate(p, p.id.clone()).passed).collect();

    assert_eq!(passed, vec![false, true, false]);
}

/// Scenario 4: an unauthenticated scraper cannot acquire the `saved`
/// feed; the target fails validation/authentication and contributes no
/// posts, so the acquisition stage itself reports failure.
#[tokio::test]
async fn saved_feed_without_authentication_fails_acquisition() {
    let output_dir = scratch_dir("saved-no-auth");
    std::fs::create_dir_all(&output_dir).unwrap();

    let scraper = InMemoryScraper::new(false);

    let mut config = base_config(&output_dir);
    config.targets = vec!["saved".to_string()];
    config.error_handling = ErrorHandlingPolicy::Continue;
    config.export_formats = vec!["json".to_string()];

    let metrics = run(&config, dependencies(scraper, &output_dir), 0).await.expect("continue policy tolerates the failed stage");

    assert_eq!(metrics.posts_discovered, 0);
    assert!(metrics.failed_stages >= 1, "acquisition should be recorded as failed");

    let _ = std::fs::remove_dir_all(&output_dir);
}

/// Boundary behavior: an empty targets set is rejected before any stage
/// runs.
#[tokio::test]
async fn empty_targets_fail_validation() {
    let output_dir = scratch_dir("empty-targets");
    std::fs::create_dir_all(&output_dir).unwrap();

    let scraper = InMemoryScraper::new(false);
    let config = base_config(&output_dir);

    let result = run(&config, dependencies(scraper, &output_dir), 0).await;
    assert!(result.is_err());

    let _ = std::fs::remove_dir_all(&output_dir);
}

/// Boundary behavior: `post_limit = 0` yields no posts without failing
/// the run.
#[tokio::test]
async fn zero_post_limit_yields_no_posts() {
    let output_dir = scratch_dir("zero-limit");
    std::fs::create_dir_all(&output_dir).unwrap();

    let scraper = InMemoryScraper::new(false);
    scraper.seed("u/alice", vec![sample_post("p1", "alice", "alice", 1)]);

    let mut config = base_config(&output_dir);
    config.targets = vec!["u/alice".to_string()];
    config.post_limit = 0;
    config.dry_run = true;
    config.export_formats = vec!["json".to_string()];

    let metrics = run(&config, dependencies(scraper, &output_dir), 0).await.expect("zero limit is not a failure");
    assert_eq!(metrics.posts_discovered, 0);

    let _ = std::fs::remove_dir_all(&output_dir);
}
