// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! CLI structure and `clap` parsing. Security validation happens in
//! `validator` after parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "redditdl")]
#[command(about = concat!("redditdl v", env!("CARGO_PKG_VERSION")))]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory holding default.toml / local.toml configuration layers
    #[arg(short, long)]
    pub config_dir: Option<PathBuf>,

    /// Emit logs as JSON instead of human-readable text
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Acquire, filter, process, and export posts for one or more targets
    Run {
        /// Target strings: a user (`u/name`), subreddit (`r/name`), `saved`,
        /// `upvoted`, or a direct post URL. Repeatable.
        #[arg(short, long)]
        target: Vec<String>,

        /// Read additional newline-separated targets from a file
        #[arg(long)]
        targets_file: Option<PathBuf>,

        /// Listing type for subreddit targets (hot, new, top, rising)
        #[arg(long)]
        listing_type: Option<String>,

        /// Time period for `top` listings (hour, day, week, month, year, all)
        #[arg(long)]
        time_period: Option<String>,

        /// Maximum posts to fetch per target
        #[arg(long)]
        post_limit: Option<u32>,

        /// Number of targets fetched concurrently (1-20)
        #[arg(long)]
        concurrent_targets: Option<usize>,

        /// Directory handlers write output into
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Export formats to write (repeatable): json, csv
        #[arg(long)]
        export_format: Vec<String>,

        /// Directory export artifacts are written into
        #[arg(long)]
        export_dir: Option<PathBuf>,

        /// Run acquisition, filtering, and export, but skip Processing
        #[arg(long)]
        dry_run: bool,

        /// Load plugin content handlers after a static risk scan
        #[arg(long)]
        enable_plugins: bool,

        /// Stage error-handling policy
        #[arg(long, value_parser = parse_error_handling)]
        error_handling: Option<String>,
    },

    /// List sessions eligible for resumption
    ListSessions {
        /// Only list sessions last touched within this many days
        #[arg(long, default_value = "7")]
        max_age_days: u32,
    },
}

fn parse_error_handling(s: &str) -> Result<String, String> {
    match s.to_lowercase().as_str() {
        "halt" | "continue" | "skip" => Ok(s.to_lowercase()),
        _ => Err(format!("invalid error-handling policy '{}'. valid options: halt, continue, skip", s)),
    }
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_handling_accepts_known_policies() {
        assert_eq!(parse_error_handling("halt").unwrap(), "halt");
        assert_eq!(parse_error_handling("CONTINUE").unwrap(), "continue");
        assert_eq!(parse_error_handling("Skip").unwrap(), "skip");
    }

    #[test]
    fn parse_error_handling_rejects_unknown_policies() {
        assert!(parse_error_handling("retry").is_err());
    }
}
