// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Recovery manager (spec.md §4.7): maps an `ErrorKind` to a strategy and
//! reports what it decided, without itself re-invoking the failed
//! operation (callers own the retry).

use redditdl_domain::error::{ErrorKind, RedditdlError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    Retry,
    Skip,
    Ignore,
    Abort,
}

#[derive(Debug, Clone)]
pub struct RecoveryOutcome {
    pub success: bool,
    pub strategy_used: RecoveryStrategy,
    pub message: String,
}

#[derive(Default)]
pub struct RecoveryManager;

impl RecoveryManager {
    pub fn new() -> Self {
        Self
    }

    /// Chooses a strategy per `ErrorKind` (spec.md §4.7): `retry` for
    /// transient network/rate-limit failures, `abort` for fatal kinds,
    /// `skip` for unrecoverable per-item issues, `ignore` otherwise.
    pub fn strategy_for(&self, kind: ErrorKind) -> RecoveryStrategy {
        if kind.is_fatal() {
            return RecoveryStrategy::Abort;
        }
        if kind.is_transient() {
            return RecoveryStrategy::Retry;
        }
        match kind {
            ErrorKind::TargetNotFound | ErrorKind::TargetAccessDenied | ErrorKind::UnsupportedFormat | ErrorKind::Processing => {
                RecoveryStrategy::Skip
            }
            ErrorKind::Validation => RecoveryStrategy::Ignore,
            _ => RecoveryStrategy::Skip,
        }
    }

    pub fn recover(&self, error: &RedditdlError) -> RecoveryOutcome {
        let strategy = self.strategy_for(error.kind);
        let message = match strategy {
            RecoveryStrategy::Retry => format!("{} is transient; caller should retry", error.kind),
            RecoveryStrategy::Skip => format!("skipping item after {} error: {}", error.kind, error.message),
            RecoveryStrategy::Ignore => format!("ignoring recoverable warning: {}", error.message),
            RecoveryStrategy::Abort => format!("{} is fatal; aborting run", error.kind),
        };
        RecoveryOutcome {
            success: !matches!(strategy, RecoveryStrategy::Abort),
            strategy_used: strategy,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::error::ErrorContext;

    #[test]
    fn network_errors_recommend_retry() {
        let manager = RecoveryManager::new();
        let err = RedditdlError::network("timeout", ErrorContext::new("scraper.fetch"));
        let outcome = manager.recover(&err);
        assert_eq!(outcome.strategy_used, RecoveryStrategy::Retry);
        assert!(outcome.success);
    }

    #[test]
    fn configuration_errors_abort() {
        let manager = RecoveryManager::new();
        let err = RedditdlError::configuration("missing client_id", ErrorContext::new("acquisition.resolve"));
        let outcome = manager.recover(&err);
        assert_eq!(outcome.strategy_used, RecoveryStrategy::Abort);
        assert!(!outcome.success);
    }

    #[test]
    fn target_not_found_is_skipped() {
        let manager = RecoveryManager::new();
        let err = RedditdlError::target_not_found("u/ghost not found", ErrorContext::new("acquisition.fetch"));
        assert_eq!(manager.recover(&err).strategy_used, RecoveryStrategy::Skip);
    }
}
