// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Runtime configuration surface (spec.md §6). Loaded once at startup via
//! the `config` crate layered over a `.env` file (`dotenvy`) and process
//! environment, then frozen into a `Context`'s `ConfigSnapshot`.

use std::collections::HashMap;
use std::path::PathBuf;

use ::config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

fn default_concurrent_targets() -> u32 {
    3
}
fn default_post_limit() -> u32 {
    100
}
fn default_timeout() -> u64 {
    30
}
fn default_retries() -> u32 {
    3
}
fn default_output_dir() -> String {
    "./downloads".to_string()
}
fn default_filename_template() -> String {
    "{id}_{title}".to_string()
}
fn default_error_handling() -> ErrorHandlingPolicy {
    ErrorHandlingPolicy::Continue
}

/// Executor-level policy applied when a stage reports failures
/// (spec.md §6, §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorHandlingPolicy {
    Halt,
    #[default]
    Continue,
    Skip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub min_score: Option<i64>,
    pub max_score: Option<i64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    #[serde(default)]
    pub keywords_include: Vec<String>,
    #[serde(default)]
    pub keywords_exclude: Vec<String>,
    #[serde(default)]
    pub domains_allow: Vec<String>,
    #[serde(default)]
    pub domains_block: Vec<String>,
    #[serde(default)]
    pub media_types: Vec<String>,
    #[serde(default)]
    pub exclude_media_types: Vec<String>,
    #[serde(default)]
    pub file_extensions: Vec<String>,
    #[serde(default)]
    pub exclude_file_extensions: Vec<String>,
    #[serde(default)]
    pub nsfw_mode: NsfwMode,
    #[serde(default)]
    pub filter_composition: FilterComposition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NsfwMode {
    #[default]
    Allow,
    Exclude,
    Only,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterComposition {
    #[default]
    And,
    Or,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_score: None,
            max_score: None,
            date_from: None,
            date_to: None,
            keywords_include: Vec::new(),
            keywords_exclude: Vec::new(),
            domains_allow: Vec::new(),
            domains_block: Vec::new(),
            media_types: Vec::new(),
            exclude_media_types: Vec::new(),
            file_extensions: Vec::new(),
            exclude_file_extensions: Vec::new(),
            nsfw_mode: NsfwMode::default(),
            filter_composition: FilterComposition::default(),
        }
    }
}

/// The full set of keys the core consumes (spec.md §6 configuration
/// table). `dry_run` skips Processing; everything else still runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub targets: Vec<String>,
    pub targets_file: Option<PathBuf>,
    pub target_user: Option<String>,

    #[serde(default = "default_concurrent_targets")]
    pub concurrent_targets: u32,
    #[serde(default)]
    pub listing_type: String,
    pub time_period: Option<String>,

    #[serde(default = "default_post_limit")]
    pub post_limit: u32,
    #[serde(default)]
    pub sleep_interval: u64,
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retries")]
    pub retries: u32,

    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    pub username: Option<String>,
    pub password: Option<String>,

    #[serde(default)]
    pub filters: FilterConfig,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
    #[serde(default)]
    pub embed_metadata: bool,
    #[serde(default)]
    pub create_sidecars: bool,
    #[serde(default)]
    pub enable_plugins: bool,
    #[serde(default)]
    pub handler_config: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub export_formats: Vec<String>,
    pub export_dir: Option<String>,

    #[serde(default = "default_error_handling")]
    pub error_handling: ErrorHandlingPolicy,
    #[serde(default)]
    pub dry_run: bool,
}

fn default_user_agent() -> String {
    format!("redditdl/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            targets_file: None,
            target_user: None,
            concurrent_targets: default_concurrent_targets(),
            listing_type: String::new(),
            time_period: None,
            post_limit: default_post_limit(),
            sleep_interval: 0,
            timeout: default_timeout(),
            retries: default_retries(),
            client_id: None,
            client_secret: None,
            user_agent: default_user_agent(),
            username: None,
            password: None,
            filters: FilterConfig::default(),
            output_dir: default_output_dir(),
            filename_template: default_filename_template(),
            embed_metadata: false,
            create_sidecars: false,
            enable_plugins: false,
            handler_config: HashMap::new(),
            export_formats: Vec::new(),
            export_dir: None,
            error_handling: default_error_handling(),
            dry_run: false,
        }
    }
}

impl RuntimeConfig {
    /// Loads `config/default.toml` (if present), then `config/local.toml`
    /// (if present), then `REDDITDL_*` environment overrides, layering
    /// each on top of the last. Call `dotenvy::dotenv().ok()` before this
    /// so `.env` values land in the process environment first.
    pub fn load(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let dir = config_dir.unwrap_or("config");
        let builder = Config::builder()
            .add_source(File::with_name(&format!("{dir}/default")).required(false))
            .add_source(File::with_name(&format!("{dir}/local")).required(false))
            .add_source(Environment::with_prefix("REDDITDL").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 1-20 per spec.md §6; clamps rather than rejecting, consistent
    /// with the Acquisition Engine's own defensive clamp in §4.2.
    pub fn clamped_concurrent_targets(&self) -> u32 {
        self.concurrent_targets.clamp(1, 20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = RuntimeConfig::default();
        assert_eq!(config.concurrent_targets, 3);
        assert_eq!(config.error_handling, ErrorHandlingPolicy::Continue);
        assert!(!config.dry_run);
    }

    #[test]
    fn concurrent_targets_clamp_to_valid_range() {
        let mut config = RuntimeConfig::default();
        config.concurrent_targets = 99;
        assert_eq!(config.clamped_concurrent_targets(), 20);
        config.concurrent_targets = 0;
        assert_eq!(config.clamped_concurrent_targets(), 1);
    }
}
