// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `SecurityEvent` and `DetectorVerdict` (spec.md §4.7 auditor / suspicious
//! activity detector).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecuritySeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityEvent {
    pub severity: SecuritySeverity,
    pub category: String,
    pub description: String,
    pub session_id: Option<String>,
    pub target: Option<String>,
    pub timestamp_epoch: i64,
}

impl SecurityEvent {
    pub fn new(
        severity: SecuritySeverity,
        category: impl Into<String>,
        description: impl Into<String>,
        timestamp_epoch: i64,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            description: description.into(),
            session_id: None,
            target: None,
            timestamp_epoch,
        }
    }
}

/// The suspicious-activity detector's verdict on a run or a single action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorVerdict {
    pub suspicious: bool,
    pub reasons: Vec<String>,
    pub events: Vec<SecurityEvent>,
}

impl DetectorVerdict {
    pub fn clean() -> Self {
        Self {
            suspicious: false,
            reasons: Vec::new(),
            events: Vec::new(),
        }
    }
}
