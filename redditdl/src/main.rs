// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # redditdl CLI
//!
//! Entry point for the `redditdl` binary: parses and validates the
//! command line through `redditdl_bootstrap`, layers CLI flags over the
//! `RuntimeConfig` loaded from disk/environment, wires concrete
//! infrastructure adapters, and drives the `Run` or `ListSessions` use
//! case to completion. Exit codes follow BSD `sysexits.h` conventions
//! via `redditdl_bootstrap::exit_code`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use redditdl::application::use_cases;
use redditdl::infrastructure::config::RuntimeConfig;
use redditdl::infrastructure::event_bus::TokioEventBus;
use redditdl::infrastructure::scrapers::InMemoryScraper;
use redditdl::infrastructure::state_store::{InMemoryStateStore, SqliteStateStore};
use redditdl_bootstrap::cli::ValidatedCommand;
use redditdl_bootstrap::ValidatedCli;
use redditdl_domain::error::RedditdlError;
use redditdl_domain::repositories::StateStore;
use tracing::{error, info};

/// Overlays the flags a user actually passed onto the config loaded from
/// `config/default.toml` / `config/local.toml` / environment, so an unset
/// flag falls back to the layered config rather than clap's own default.
fn apply_run_flags(mut config: RuntimeConfig, command: ValidatedCommand) -> RuntimeConfig {
    let ValidatedCommand::Run {
        targets,
        targets_file,
        listing_type,
        time_period,
        post_limit,
        concurrent_targets,
        output_dir,
        export_formats,
        export_dir,
        dry_run,
        enable_plugins,
        error_handling,
    } = command
    else {
        return config;
    };

    if !targets.is_empty() {
        config.targets = targets;
    }
    if let Some(path) = targets_file {
        config.targets_file = Some(path);
    }
    if let Some(listing) = listing_type {
        config.listing_type = listing;
    }
    if time_period.is_some() {
        config.time_period = time_period;
    }
    if let Some(limit) = post_limit {
        config.post_limit = limit;
    }
    if let Some(concurrency) = concurrent_targets {
        config.concurrent_targets = concurrency as u32;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir.to_string_lossy().into_owned();
    }
    if !export_formats.is_empty() {
        config.export_formats = export_formats;
    }
    if let Some(dir) = export_dir {
        config.export_dir = Some(dir.to_string_lossy().into_owned());
    }
    config.dry_run = dry_run;
    config.enable_plugins = enable_plugins;
    if let Some(policy) = error_handling {
        config.error_handling = match policy.as_str() {
            "halt" => redditdl::infrastructure::config::ErrorHandlingPolicy::Halt,
            "skip" => redditdl::infrastructure::config::ErrorHandlingPolicy::Skip,
            _ => redditdl::infrastructure::config::ErrorHandlingPolicy::Continue,
        };
    }

    config
}

/// Prefers `SqliteStateStore` when `REDDITDL_DATABASE_URL` points at a
/// file, falling back to the in-process store otherwise (spec.md §4.9).
async fn build_state_store() -> Result<Arc<dyn StateStore>, RedditdlError> {
    match std::env::var("REDDITDL_DATABASE_URL") {
        Ok(url) => {
            let store = SqliteStateStore::connect(&url).await?;
            Ok(Arc::new(store))
        }
        Err(_) => Ok(Arc::new(InMemoryStateStore::new())),
    }
}

async fn run_command(cli: &ValidatedCli, config_dir: Option<&str>) -> Result<(), RedditdlError> {
    let command = cli.command.clone();
    let config = RuntimeConfig::load(config_dir).map_err(|e| {
        RedditdlError::configuration(
            format!("failed to load configuration: {e}"),
            redditdl_domain::error::ErrorContext::new("main.run_command"),
        )
    })?;
    let config = apply_run_flags(config, command);

    let output_dir: PathBuf = PathBuf::from(&config.output_dir);
    std::fs::create_dir_all(&output_dir).map_err(|e| {
        RedditdlError::configuration(
            format!("failed to create output directory {}: {e}", output_dir.display()),
            redditdl_domain::error::ErrorContext::new("main.run_command"),
        )
    })?;

    let deps = use_cases::RunDependencies {
        scraper: Arc::new(InMemoryScraper::new(config.client_id.is_some())),
        state_store: build_state_store().await?,
        event_bus: Arc::new(TokioEventBus::new()),
        content_handlers: use_cases::default_content_handlers(output_dir.clone()),
        exporters: use_cases::default_exporters(),
    };

    let now_epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    let metrics = use_cases::run(&config, deps, now_epoch).await?;

    info!(
        discovered = metrics.posts_discovered,
        processed = metrics.posts_processed,
        exported = metrics.posts_exported,
        failed_stages = metrics.failed_stages,
        "run complete"
    );
    println!(
        "discovered {} posts, processed {}, exported {} ({} stage failure(s))",
        metrics.posts_discovered, metrics.posts_processed, metrics.posts_exported, metrics.failed_stages
    );

    Ok(())
}

async fn list_sessions_command(max_age_days: u32) -> Result<(), RedditdlError> {
    let state_store = build_state_store().await?;
    let resumable = state_store.find_resumable().await?;
    let cutoff_secs = max_age_days as i64 * 24 * 60 * 60;
    let now_epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    let mut shown = 0;
    for session in resumable {
        if now_epoch - session.started_at_epoch > cutoff_secs {
            continue;
        }
        println!(
            "{}  status={:?}  targets={}  started={}",
            session.session_id,
            session.status,
            session.targets.join(", "),
            session.started_at_epoch
        );
        shown += 1;
    }
    if shown == 0 {
        println!("no resumable sessions within the last {max_age_days} day(s)");
    }

    state_store.close().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match redditdl_bootstrap::bootstrap_cli() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("redditdl: {e}");
            return ExitCode::from(64); // EX_USAGE
        }
    };

    let log_format = if cli.log_json {
        redditdl::infrastructure::logging::LogFormat::Json
    } else {
        redditdl::infrastructure::logging::LogFormat::Human
    };
    let default_directive = if cli.verbose { "redditdl=debug" } else { "redditdl=info" };
    redditdl::infrastructure::logging::init(log_format, default_directive);

    let _ = dotenvy::dotenv();

    let config_dir = cli.config_dir.as_deref().map(|p| p.to_string_lossy().into_owned());

    let result = match &cli.command {
        ValidatedCommand::Run { .. } => run_command(&cli, config_dir.as_deref()).await,
        ValidatedCommand::ListSessions { max_age_days } => list_sessions_command(*max_age_days).await,
    };

    if let Err(e) = &result {
        error!("redditdl failed: {e}");
        eprintln!("redditdl: {e}");
    }
    redditdl_bootstrap::result_to_exit_code(result)
}
