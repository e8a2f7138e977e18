// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Layer
//!
//! Sits outside the domain/application/infrastructure layers and owns
//! everything a process needs before the first [`Stage`](redditdl_domain::services::Stage)
//! runs:
//!
//! - **CLI parsing** (`cli`) - clap definitions plus post-parse security
//!   validation (path traversal, injection patterns, protected directories).
//! - **Configuration** (`config`) - immutable bootstrap-phase settings
//!   derived from the validated CLI.
//! - **Platform abstraction** (`platform`) - CPU/memory/privilege queries
//!   behind a trait, Unix and Windows implementations selected at compile
//!   time.
//! - **Signal handling** (`signals`) - SIGTERM/SIGINT/SIGHUP on Unix,
//!   Ctrl+C on Windows, routed into a `ShutdownCoordinator`.
//! - **Shutdown coordination** (`shutdown`) - cancellation token plus a
//!   grace period before in-flight acquisition/export tasks are abandoned.
//! - **Exit codes** (`exit_code`) - `sysexits.h`-style mapping from
//!   application errors to process exit status.
//! - **Logging** (`logger`) - a thin trait over `tracing` used before the
//!   full subscriber is installed, with no-op and capturing variants for
//!   tests.
//!
//! Enterprise layers never depend back on this crate.

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod platform;
pub mod shutdown;
pub mod signals;

pub use cli::{parse_and_validate, ValidatedCli, ValidatedCommand};
pub use exit_code::{map_error_to_exit_code, result_to_exit_code, ExitCode};

/// Parses and security-validates the process arguments. This is the first
/// call `main` makes; clap handles `--help`/`--version` by exiting the
/// process before this function returns.
pub fn bootstrap_cli() -> Result<ValidatedCli, cli::ParseError> {
    cli::parse_and_validate()
}
