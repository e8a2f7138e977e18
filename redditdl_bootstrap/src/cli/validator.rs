// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Security-first validation of parsed CLI arguments, run after `clap`
//! parsing and before any value reaches the application layer.
//!
//! Dangerous patterns blocked: path traversal (`..`), home-directory
//! expansion (`~`), variable expansion (`$`), command substitution
//! (backticks), command chaining (`;` `&` `|`), redirection (`>` `<`),
//! and embedded newlines/carriage-returns/null bytes. Path arguments are
//! additionally canonicalized and checked against a protected-directory
//! list so `--output-dir /etc` cannot be used to write outside the
//! intended tree.

use std::path::{Path, PathBuf};
use thiserror::Error;

const MAX_ARG_COUNT: usize = 100;
const MAX_ARG_LENGTH: usize = 1000;
const MAX_PATH_LENGTH: usize = 4096;

const DANGEROUS_PATTERNS: &[&str] = &["..", "~", "$", "`", ";", "&", "|", ">", "<", "\n", "\r", "\0"];

const PROTECTED_DIRS: &[&str] = &["/etc", "/bin", "/sbin", "/usr/bin", "/usr/sbin", "/boot", "/sys", "/proc", "/dev"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("too many arguments (max {MAX_ARG_COUNT})")]
    TooManyArguments,

    #[error("argument too long (max {MAX_ARG_LENGTH} characters): {0}")]
    ArgumentTooLong(String),

    #[error("dangerous pattern detected in argument: {pattern} in {arg}")]
    DangerousPattern { pattern: String, arg: String },

    #[error("path exceeds maximum length (max {MAX_PATH_LENGTH})")]
    PathTooLong,

    #[error("access to protected system directory denied: {0}")]
    ProtectedDirectory(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid value for {arg}: {reason}")]
    InvalidValue { arg: String, reason: String },
}

pub struct SecureArgParser;

impl SecureArgParser {
    pub fn validate_argument_count(count: usize) -> Result<(), ValidationError> {
        if count > MAX_ARG_COUNT {
            return Err(ValidationError::TooManyArguments);
        }
        Ok(())
    }

    /// Checks length and dangerous patterns. Does not touch the filesystem,
    /// so it is safe to call on targets, templates, and other free-form
    /// strings that are not paths.
    pub fn validate_argument(arg: &str) -> Result<(), ValidationError> {
        if arg.len() > MAX_ARG_LENGTH {
            return Err(ValidationError::ArgumentTooLong(arg.chars().take(50).collect::<String>() + "..."));
        }

        for pattern in DANGEROUS_PATTERNS {
            if arg.contains(pattern) {
                return Err(ValidationError::DangerousPattern { pattern: pattern.to_string(), arg: arg.to_string() });
            }
        }

        Ok(())
    }

    /// Validates a directory path that need not already exist (e.g.
    /// `--output-dir`): checks the string for dangerous patterns, then
    /// canonicalizes the deepest existing ancestor to rule out a
    /// protected-directory escape.
    pub fn validate_output_path(path: &str) -> Result<PathBuf, ValidationError> {
        Self::validate_argument(path).map_err(|e| match e {
            ValidationError::ArgumentTooLong(_) => ValidationError::InvalidPath(format!("path too long: {}", path)),
            ValidationError::DangerousPattern { pattern, .. } => {
                ValidationError::InvalidPath(format!("path contains dangerous pattern '{}': {}", pattern, path))
            }
            other => other,
        })?;

        let candidate = PathBuf::from(path);
        let anchor = Self::deepest_existing_ancestor(&candidate);
        let canonical_anchor =
            anchor.canonicalize().map_err(|e| ValidationError::InvalidPath(format!("{}: {}", path, e)))?;

        if canonical_anchor.to_string_lossy().len() > MAX_PATH_LENGTH {
            return Err(ValidationError::PathTooLong);
        }

        for protected in PROTECTED_DIRS {
            if canonical_anchor.starts_with(protected) {
                return Err(ValidationError::ProtectedDirectory(canonical_anchor.display().to_string()));
            }
        }

        Ok(candidate)
    }

    /// Validates a path that must already exist (e.g. `--targets-file`).
    pub fn validate_existing_path(path: &str) -> Result<PathBuf, ValidationError> {
        Self::validate_argument(path).map_err(|e| match e {
            ValidationError::ArgumentTooLong(_) => ValidationError::InvalidPath(format!("path too long: {}", path)),
            ValidationError::DangerousPattern { pattern, .. } => {
                ValidationError::InvalidPath(format!("path contains dangerous pattern '{}': {}", pattern, path))
            }
            other => other,
        })?;

        let canonical = Path::new(path)
            .canonicalize()
            .map_err(|e| ValidationError::InvalidPath(format!("{}: {}", path, e)))?;

        if canonical.to_string_lossy().len() > MAX_PATH_LENGTH {
            return Err(ValidationError::PathTooLong);
        }

        for protected in PROTECTED_DIRS {
            if canonical.starts_with(protected) {
                return Err(ValidationError::ProtectedDirectory(canonical.display().to_string()));
            }
        }

        Ok(canonical)
    }

    pub fn validate_optional_path(path: Option<&str>, must_exist: bool) -> Result<Option<PathBuf>, ValidationError> {
        match path {
            Some(p) if must_exist => Self::validate_existing_path(p).map(Some),
            Some(p) => Self::validate_output_path(p).map(Some),
            None => Ok(None),
        }
    }

    pub fn validate_number<T>(arg_name: &str, value: T, min: Option<T>, max: Option<T>) -> Result<T, ValidationError>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if let Some(min_val) = min {
            if value < min_val {
                return Err(ValidationError::InvalidValue {
                    arg: arg_name.to_string(),
                    reason: format!("value {} is less than minimum {}", value, min_val),
                });
            }
        }

        if let Some(max_val) = max {
            if value > max_val {
                return Err(ValidationError::InvalidValue {
                    arg: arg_name.to_string(),
                    reason: format!("value {} is greater than maximum {}", value, max_val),
                });
            }
        }

        Ok(value)
    }

    fn deepest_existing_ancestor(path: &Path) -> PathBuf {
        let mut current = path.to_path_buf();
        loop {
            if current.exists() {
                return current;
            }
            match current.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => current = parent.to_path_buf(),
                _ => return PathBuf::from("."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_safe_arguments() {
        assert!(SecureArgParser::validate_argument("u/someuser").is_ok());
        assert!(SecureArgParser::validate_argument("r/rust").is_ok());
        assert!(SecureArgParser::validate_argument("hot").is_ok());
    }

    #[test]
    fn rejects_too_long_arguments() {
        let long_arg = "a".repeat(MAX_ARG_LENGTH + 1);
        assert!(matches!(SecureArgParser::validate_argument(&long_arg), Err(ValidationError::ArgumentTooLong(_))));
    }

    #[test]
    fn detects_dangerous_patterns() {
        let dangerous = vec!["../etc/passwd", "~/.ssh/id_rsa", "$(whoami)", "`ls`", "file;rm -rf /", "file|pipe"];
        for arg in dangerous {
            assert!(
                matches!(SecureArgParser::validate_argument(arg), Err(ValidationError::DangerousPattern { .. })),
                "failed to detect dangerous pattern in: {}",
                arg
            );
        }
    }

    #[test]
    fn rejects_protected_output_directories() {
        let result = SecureArgParser::validate_output_path("/etc/redditdl");
        assert!(matches!(result, Err(ValidationError::ProtectedDirectory(_))));
    }

    #[test]
    fn validates_number_range() {
        assert_eq!(SecureArgParser::validate_number("concurrent_targets", 4u32, Some(1), Some(20)).unwrap(), 4);
        assert!(SecureArgParser::validate_number("concurrent_targets", 50u32, Some(1), Some(20)).is_err());
        assert!(SecureArgParser::validate_number("concurrent_targets", 0u32, Some(1), Some(20)).is_err());
    }

    #[test]
    fn argument_count_limit_is_enforced() {
        assert!(SecureArgParser::validate_argument_count(MAX_ARG_COUNT).is_ok());
        assert!(SecureArgParser::validate_argument_count(MAX_ARG_COUNT + 1).is_err());
    }
}
