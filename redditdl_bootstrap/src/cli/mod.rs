// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! CLI parsing and post-parse security validation, composed into a single
//! `parse_and_validate` entry point called from `main`.

mod parser;
mod validator;

use std::path::PathBuf;

pub use parser::{Cli, Commands};
pub use validator::{SecureArgParser, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct ValidatedCli {
    pub command: ValidatedCommand,
    pub verbose: bool,
    pub config_dir: Option<PathBuf>,
    pub log_json: bool,
}

#[derive(Debug, Clone)]
pub enum ValidatedCommand {
    Run {
        targets: Vec<String>,
        targets_file: Option<PathBuf>,
        listing_type: Option<String>,
        time_period: Option<String>,
        post_limit: Option<u32>,
        concurrent_targets: Option<usize>,
        output_dir: Option<PathBuf>,
        export_formats: Vec<String>,
        export_dir: Option<PathBuf>,
        dry_run: bool,
        enable_plugins: bool,
        error_handling: Option<String>,
    },
    ListSessions {
        max_age_days: u32,
    },
}

/// Parses `std::env::args`, then runs every value through the security
/// validator before handing a `ValidatedCli` to the application layer.
pub fn parse_and_validate() -> Result<ValidatedCli, ParseError> {
    let cli = parser::parse_cli();
    validate_cli(cli)
}

fn validate_cli(cli: Cli) -> Result<ValidatedCli, ParseError> {
    let config_dir = match &cli.config_dir {
        Some(p) => Some(SecureArgParser::validate_existing_path(&p.to_string_lossy())?),
        None => None,
    };

    let command = match cli.command {
        Commands::Run {
            target,
            targets_file,
            listing_type,
            time_period,
            post_limit,
            concurrent_targets,
            output_dir,
            export_format,
            export_dir,
            dry_run,
            enable_plugins,
            error_handling,
        } => {
            SecureArgParser::validate_argument_count(target.len())?;
            for t in &target {
                SecureArgParser::validate_argument(t)?;
            }
            for f in &export_format {
                SecureArgParser::validate_argument(f)?;
            }
            if let Some(lt) = &listing_type {
                SecureArgParser::validate_argument(lt)?;
            }
            if let Some(tp) = &time_period {
                SecureArgParser::validate_argument(tp)?;
            }
            let concurrent_targets = match concurrent_targets {
                Some(n) => Some(SecureArgParser::validate_number("concurrent_targets", n, Some(1), Some(20))?),
                None => None,
            };

            ValidatedCommand::Run {
                targets: target,
                targets_file: SecureArgParser::validate_optional_path(
                    targets_file.as_deref().map(|p| p.to_str().unwrap_or_default()),
                    true,
                )?,
                listing_type,
                time_period,
                post_limit,
                concurrent_targets,
                output_dir: SecureArgParser::validate_optional_path(
                    output_dir.as_deref().map(|p| p.to_str().unwrap_or_default()),
                    false,
                )?,
                export_formats: export_format,
                export_dir: SecureArgParser::validate_optional_path(
                    export_dir.as_deref().map(|p| p.to_str().unwrap_or_default()),
                    false,
                )?,
                dry_run,
                enable_plugins,
                error_handling,
            }
        }
        Commands::ListSessions { max_age_days } => {
            let max_age_days = SecureArgParser::validate_number("max_age_days", max_age_days, Some(1), Some(3650))?;
            ValidatedCommand::ListSessions { max_age_days }
        }
    };

    Ok(ValidatedCli { command, verbose: cli.verbose, config_dir, log_json: cli.log_json })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_command(target: Vec<&str>) -> Cli {
        Cli {
            command: Commands::Run {
                target: target.into_iter().map(String::from).collect(),
                targets_file: None,
                listing_type: Some("hot".to_string()),
                time_period: None,
                post_limit: Some(25),
                concurrent_targets: Some(4),
                output_dir: None,
                export_format: vec!["json".to_string()],
                export_dir: None,
                dry_run: false,
                enable_plugins: false,
                error_handling: Some("continue".to_string()),
            },
            verbose: false,
            config_dir: None,
            log_json: false,
        }
    }

    #[test]
    fn validates_a_well_formed_run_command() {
        let cli = run_command(vec!["r/rust", "u/someuser"]);
        let validated = validate_cli(cli).expect("should validate");
        match validated.command {
            ValidatedCommand::Run { targets, concurrent_targets, .. } => {
                assert_eq!(targets, vec!["r/rust", "u/someuser"]);
                assert_eq!(concurrent_targets, Some(4));
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn rejects_targets_with_dangerous_patterns() {
        let cli = run_command(vec!["r/rust; rm -rf /"]);
        assert!(validate_cli(cli).is_err());
    }

    #[test]
    fn rejects_out_of_range_concurrency() {
        let mut cli = run_command(vec!["r/rust"]);
        if let Commands::Run { concurrent_targets, .. } = &mut cli.command {
            *concurrent_targets = Some(500);
        }
        assert!(validate_cli(cli).is_err());
    }

    #[test]
    fn list_sessions_validates_max_age() {
        let cli = Cli {
            command: Commands::ListSessions { max_age_days: 30 },
            verbose: false,
            config_dir: None,
            log_json: false,
        };
        let validated = validate_cli(cli).expect("should validate");
        match validated.command {
            ValidatedCommand::ListSessions { max_age_days } => assert_eq!(max_age_days, 30),
            _ => panic!("expected ListSessions command"),
        }
    }
}
