// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! Structured errors for the acquisition/filter/processing/export pipeline.
//! Every failure that might matter for recovery is represented as a typed
//! `RedditdlError` carrying an `ErrorContext`, never as a free-form string
//! thrown across a stage boundary.
//!
//! ## Error Kinds
//!
//! The kinds mirror the taxonomy in spec.md §4.7: `Configuration`,
//! `Validation`, `Authentication`, `Network`, `TargetNotFound`,
//! `TargetAccessDenied`, `Processing`, `UnsupportedFormat`, `Filesystem`,
//! and a fallthrough `Unknown`. Each kind has a default recovery strategy
//! (see `redditdl::application::services::recovery`), which callers may
//! override per call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// High-level classification of a failure, independent of the message text.
///
/// Used by the recovery manager to pick a default strategy and by the
/// auditor to bucket `SecurityEvent`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Authentication,
    Network,
    TargetNotFound,
    TargetAccessDenied,
    Processing,
    UnsupportedFormat,
    Filesystem,
    Unknown,
}

impl ErrorKind {
    /// Numeric code used in `ErrorRecord.code` and user-facing diagnostics.
    pub fn code(&self) -> u32 {
        match self {
            ErrorKind::Configuration => 1000,
            ErrorKind::Validation => 1100,
            ErrorKind::Authentication => 1200,
            ErrorKind::Network => 1300,
            ErrorKind::TargetNotFound => 1400,
            ErrorKind::TargetAccessDenied => 1500,
            ErrorKind::Processing => 1600,
            ErrorKind::UnsupportedFormat => 1700,
            ErrorKind::Filesystem => 1800,
            ErrorKind::Unknown => 1900,
        }
    }

    /// Whether errors of this kind are, by default, worth retrying.
    ///
    /// `Network` covers transient connectivity failures; rate-limit
    /// violations are surfaced as `Network` too (the upstream client layer
    /// has no separate "rate limited" kind in this core).
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::Network)
    }

    /// Fatal kinds abort a run immediately regardless of the executor's
    /// configured error-handling policy (spec.md §7).
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorKind::Configuration | ErrorKind::Authentication)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Validation => "validation",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Network => "network",
            ErrorKind::TargetNotFound => "target_not_found",
            ErrorKind::TargetAccessDenied => "target_access_denied",
            ErrorKind::Processing => "processing",
            ErrorKind::UnsupportedFormat => "unsupported_format",
            ErrorKind::Filesystem => "filesystem",
            ErrorKind::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Where in the run a `RedditdlError` originated.
///
/// `operation` is always present; the rest are filled in by whichever layer
/// has the information (a stage fills `stage`, the acquisition engine fills
/// `target`, a content handler fills `post_id`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    pub operation: String,
    pub stage: Option<String>,
    pub target: Option<String>,
    pub post_id: Option<String>,
    pub session_id: Option<String>,
    pub correlation_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Default::default()
        }
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_post_id(mut self, post_id: impl Into<String>) -> Self {
        self.post_id = Some(post_id.into());
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}

/// A single recommended follow-up action for a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoverySuggestion {
    pub action: String,
    pub description: String,
    pub automatic: bool,
    pub priority: u8,
}

impl RecoverySuggestion {
    pub fn new(action: impl Into<String>, description: impl Into<String>, automatic: bool, priority: u8) -> Self {
        Self {
            action: action.into(),
            description: description.into(),
            automatic,
            priority,
        }
    }
}

/// Domain error type threaded through every capability boundary.
///
/// `thiserror` gives us `Display`/`std::error::Error` for free; the kind,
/// context, and suggestions carry the structured data recovery/audit code
/// actually acts on.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct RedditdlError {
    pub kind: ErrorKind,
    pub message: String,
    pub context: ErrorContext,
    pub suggestions: Vec<RecoverySuggestion>,
    /// Chained cause, flattened to its display text (domain errors are
    /// `Clone`, so we cannot hold a boxed `dyn Error` cause directly).
    pub cause: Option<String>,
}

impl RedditdlError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, context: ErrorContext) -> Self {
        Self {
            kind,
            message: message.into(),
            context,
            suggestions: Vec::new(),
            cause: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: RecoverySuggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    pub fn configuration(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::new(ErrorKind::Configuration, message, context)
    }

    pub fn validation(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::new(ErrorKind::Validation, message, context)
    }

    pub fn authentication(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::new(ErrorKind::Authentication, message, context)
    }

    pub fn network(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::new(ErrorKind::Network, message, context)
    }

    pub fn target_not_found(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::new(ErrorKind::TargetNotFound, message, context)
    }

    pub fn target_access_denied(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::new(ErrorKind::TargetAccessDenied, message, context)
    }

    pub fn processing(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::new(ErrorKind::Processing, message, context)
    }

    pub fn unsupported_format(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::new(ErrorKind::UnsupportedFormat, message, context)
    }

    pub fn filesystem(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::new(ErrorKind::Filesystem, message, context)
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind.is_transient()
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl From<std::io::Error> for RedditdlError {
    fn from(err: std::io::Error) -> Self {
        RedditdlError::filesystem(err.to_string(), ErrorContext::new("io"))
    }
}

impl From<serde_json::Error> for RedditdlError {
    fn from(err: serde_json::Error) -> Self {
        RedditdlError::new(ErrorKind::UnsupportedFormat, err.to_string(), ErrorContext::new("serde_json"))
    }
}

/// One occurrence of a failure, as persisted for the audit trail and the
/// user-visible final status report (spec.md §3 `ErrorRecord`, §7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub code: u32,
    pub message: String,
    pub context: ErrorContext,
    pub suggestions: Vec<RecoverySuggestion>,
    pub cause_chain: Vec<String>,
}

impl From<&RedditdlError> for ErrorRecord {
    fn from(err: &RedditdlError) -> Self {
        let mut cause_chain = Vec::new();
        if let Some(cause) = &err.cause {
            cause_chain.push(cause.clone());
        }
        Self {
            kind: err.kind,
            code: err.kind.code(),
            message: err.message.clone(),
            context: err.context.clone(),
            suggestions: err.suggestions.clone(),
            cause_chain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_are_transient_and_non_fatal() {
        let err = RedditdlError::network("timed out", ErrorContext::new("scraper.fetch"));
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
    }

    #[test]
    fn configuration_errors_are_fatal() {
        let err = RedditdlError::configuration("missing targets", ErrorContext::new("acquisition.resolve"));
        assert!(err.is_fatal());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn error_record_flattens_cause_chain() {
        let err = RedditdlError::processing("boom", ErrorContext::new("handler.process")).with_cause("root cause");
        let record: ErrorRecord = (&err).into();
        assert_eq!(record.cause_chain, vec!["root cause".to_string()]);
        assert_eq!(record.code, ErrorKind::Processing.code());
    }
}
