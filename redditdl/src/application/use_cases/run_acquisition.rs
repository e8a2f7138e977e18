// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `Run` use case (spec.md §5): composition root for one end-to-end
//! invocation. Builds the `Context`, assembles the Acquisition / Filter /
//! Processing / Organization / Export stages from `RuntimeConfig`, and
//! drives them through a `PipelineExecutor`.

use std::path::PathBuf;
use std::sync::Arc;

use redditdl_domain::entities::{Context, ExecutionMetrics, SessionSnapshot};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::repositories::{ContentHandler, EventBus, Exporter, Scraper, StateStore};
use redditdl_domain::services::Stage;
use redditdl_domain::value_objects::{Listing, Period, SessionId, TargetInfo};

use crate::application::services::acquisition_engine::resolve_target;
use crate::application::services::filters::{DateFilter, DomainFilter, KeywordFilter, MediaTypeFilter, NsfwFilter, ScoreFilter};
use crate::application::services::{AcquisitionEngine, AcquisitionPolicy, FilterChain, HandlerRegistry};
use crate::application::stages::{AcquisitionStage, ExportStage, FilterStage, OrganizationStage, ProcessingStage};
use crate::infrastructure::config::RuntimeConfig;

/// External collaborators the use case does not construct itself, so
/// callers can swap a `SqliteStateStore` for `InMemoryStateStore`, add
/// plugin-sourced handlers, or point at a live `Scraper` without this
/// module changing.
pub struct RunDependencies {
    pub scraper: Arc<dyn Scraper>,
    pub state_store: Arc<dyn StateStore>,
    pub event_bus: Arc<dyn EventBus>,
    pub content_handlers: Vec<Arc<dyn ContentHandler>>,
    pub exporters: Vec<Arc<dyn Exporter>>,
}

/// Reads `config.targets`, `config.targets_file`, and `config.target_user`
/// into a flat target list, resolving each raw string against the
/// configured default listing/period (spec.md §4.2 "Resolution").
fn collect_targets(config: &RuntimeConfig) -> Result<Vec<TargetInfo>, RedditdlError> {
    let mut raw_targets = config.targets.clone();

    if let Some(user) = &config.target_user {
        raw_targets.push(format!("u/{user}"));
    }

    if let Some(path) = &config.targets_file {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RedditdlError::configuration(
                format!("failed to read targets file {}: {}", path.display(), e),
                redditdl_domain::error::ErrorContext::new("run_acquisition.collect_targets"),
            )
        })?;
        raw_targets.extend(contents.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#')).map(String::from));
    }

    let listing = Listing::parse_or_default(&config.listing_type);
    let period = config.time_period.as_deref().map(Period::parse_or_default);

    Ok(raw_targets.iter().map(|raw| resolve_target(raw, listing, period)).collect())
}

fn build_filter_chain(config: &RuntimeConfig) -> FilterChain {
    let filters = &config.filters;
    let mut chain: Vec<Box<dyn crate::application::services::filter::Filter>> = Vec::new();

    if filters.min_score.is_some() || filters.max_score.is_some() {
        chain.push(Box::new(ScoreFilter { min: filters.min_score, max: filters.max_score }));
    }
    if filters.date_from.is_some() || filters.date_to.is_some() {
        chain.push(Box::new(DateFilter { from: filters.date_from.clone(), to: filters.date_to.clone() }));
    }
    if !filters.keywords_include.is_empty() || !filters.keywords_exclude.is_empty() {
        chain.push(Box::new(KeywordFilter {
            include: filters.keywords_include.clone(),
            exclude: filters.keywords_exclude.clone(),
            case_sensitive: false,
            regex: false,
            whole_words: false,
        }));
    }
    if !filters.domains_allow.is_empty() || !filters.domains_block.is_empty() {
        chain.push(Box::new(DomainFilter { allow: filters.domains_allow.clone(), block: filters.domains_block.clone() }));
    }
    if !filters.media_types.is_empty()
        || !filters.exclude_media_types.is_empty()
        || !filters.file_extensions.is_empty()
        || !filters.exclude_file_extensions.is_empty()
    {
        chain.push(Box::new(MediaTypeFilter {
            allow_types: filters.media_types.clone(),
            block_types: filters.exclude_media_types.clone(),
            allow_extensions: filters.file_extensions.clone(),
            block_extensions: filters.exclude_file_extensions.clone(),
        }));
    }
    chain.push(Box::new(NsfwFilter { mode: filters.nsfw_mode }));

    FilterChain::new(chain, filters.filter_composition)
}

fn config_snapshot(config: &RuntimeConfig) -> std::collections::HashMap<String, serde_json::Value> {
    let mut snapshot = std::collections::HashMap::new();
    snapshot.insert("output_dir".to_string(), serde_json::Value::from(config.output_dir.clone()));
    snapshot.insert("organize_by_subreddit".to_string(), serde_json::Value::from(false));
    snapshot.insert("export_formats".to_string(), serde_json::Value::from(config.export_formats.clone()));
    if let Some(dir) = &config.export_dir {
        snapshot.insert("export_dir".to_string(), serde_json::Value::from(dir.clone()));
    }
    snapshot
}

pub async fn run(config: &RuntimeConfig, deps: RunDependencies, now_epoch: i64) -> Result<ExecutionMetrics, RedditdlError> {
    let session_id = SessionId::new();
    let targets = collect_targets(config)?;

    let snapshot = SessionSnapshot::new(session_id, targets.iter().map(TargetInfo::canonical).collect(), now_epoch);
    deps.state_store.create_session(snapshot).await?;

    let mut context = Context::new(session_id, targets, config_snapshot(config), deps.state_store.clone(), deps.event_bus.clone());

    let policy = AcquisitionPolicy {
        max_concurrent: config.clamped_concurrent_targets() as usize,
        timeout_per_target: std::time::Duration::from_secs(config.timeout),
        retry_attempts: config.retries,
        rate_limit_delay: std::time::Duration::from_millis(config.sleep_interval),
        post_limit: config.post_limit as usize,
        ..AcquisitionPolicy::default()
    };
    let acquisition_engine = AcquisitionEngine::new(deps.scraper.clone(), deps.event_bus.clone(), session_id, policy);

    let stages: Vec<Box<dyn Stage>> = vec![
        Box::new(AcquisitionStage::new(acquisition_engine)),
        Box::new(FilterStage::new(build_filter_chain(config))),
        Box::new(ProcessingStage::new(HandlerRegistry::new(deps.content_handlers), config.dry_run)),
        Box::new(OrganizationStage::new()),
        Box::new(ExportStage::new(deps.exporters)),
    ];

    let executor = crate::application::services::PipelineExecutor::new(stages, config.error_handling);
    let result = executor.execute(&mut context, now_epoch).await;

    let status = if result.is_ok() {
        redditdl_domain::entities::SessionStatus::Completed
    } else {
        redditdl_domain::entities::SessionStatus::Failed
    };
    deps.state_store.update_session_status(&session_id, status).await?;
    deps.state_store.close().await?;

    result
}

/// Handlers wired to a shared output directory, in the priority order the
/// registry expects (spec.md §4.4 dispatch order: text, gallery/image,
/// external link last as the catch-all).
pub fn default_content_handlers(output_dir: impl Into<PathBuf> + Clone) -> Vec<Arc<dyn ContentHandler>> {
    vec![
        Arc::new(crate::infrastructure::content_handlers::TextHandler::new(output_dir.clone())),
        Arc::new(crate::infrastructure::content_handlers::ImagePlaceholderHandler::new(output_dir.clone())),
        Arc::new(crate::infrastructure::content_handlers::ExternalLinkHandler::new(output_dir)),
    ]
}

pub fn default_exporters() -> Vec<Arc<dyn Exporter>> {
    vec![Arc::new(crate::infrastructure::exporters::JsonExporter), Arc::new(crate::infrastructure::exporters::CsvExporter)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::event_bus::TokioEventBus;
    use crate::infrastructure::scrapers::InMemoryScraper;
    use crate::infrastructure::state_store::InMemoryStateStore;

    fn test_config() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.targets = vec!["r/rust".to_string()];
        config.output_dir = std::env::temp_dir().join("redditdl-run-test").to_string_lossy().into_owned();
        config.export_formats = vec!["json".to_string()];
        config
    }

    fn test_dependencies() -> RunDependencies {
        RunDependencies {
            scraper: Arc::new(InMemoryScraper::new(false)),
            state_store: Arc::new(InMemoryStateStore::new()),
            event_bus: Arc::new(TokioEventBus::new()),
            content_handlers: default_content_handlers(std::env::temp_dir().join("redditdl-run-test")),
            exporters: default_exporters(),
        }
    }

    #[tokio::test]
    async fn run_completes_for_a_single_subreddit_target() {
        let config = test_config();
        let metrics = run(&config, test_dependencies(), 0).await.expect("run should succeed");
        assert!(metrics.successful_stages >= 1);
    }

    #[test]
    fn collect_targets_merges_cli_targets_and_target_user() {
        let mut config = RuntimeConfig::default();
        config.targets = vec!["r/rust".to_string()];
        config.target_user = Some("someuser".to_string());
        let targets = collect_targets(&config).expect("should collect");
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn collect_targets_errors_on_missing_targets_file() {
        let mut config = RuntimeConfig::default();
        config.targets_file = Some(PathBuf::from("/nonexistent/targets.txt"));
        assert!(collect_targets(&config).is_err());
    }
}
