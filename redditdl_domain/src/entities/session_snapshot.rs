// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `SessionSnapshot` (SPEC_FULL.md §3 ADDED): the persisted shape a
//! `StateStore` reads and writes, letting an interrupted run resume.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::value_objects::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Running,
    Completed,
    Failed,
    Interrupted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub targets: Vec<String>,
    pub status: SessionStatus,
    pub metadata: HashMap<String, String>,
    pub last_completed_stage: Option<String>,
    pub processed_post_ids: Vec<String>,
    pub started_at_epoch: i64,
    pub updated_at_epoch: i64,
}

impl SessionSnapshot {
    pub fn new(session_id: SessionId, targets: Vec<String>, started_at_epoch: i64) -> Self {
        Self {
            session_id,
            targets,
            status: SessionStatus::Running,
            metadata: HashMap::new(),
            last_completed_stage: None,
            processed_post_ids: Vec::new(),
            started_at_epoch,
            updated_at_epoch: started_at_epoch,
        }
    }

    /// Eligible for `StateStore::find_resumable` when it never reached a
    /// terminal status (spec.md §4.9 `InMemoryStateStore`/`SqliteStateStore`).
    pub fn is_resumable(&self) -> bool {
        matches!(self.status, SessionStatus::Running | SessionStatus::Interrupted)
    }
}
