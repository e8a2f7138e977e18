// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `Context` (spec.md §4.1): the mutable state threaded by reference
//! through every stage of one pipeline run.

use std::collections::HashMap;
use std::sync::Arc;

use crate::entities::post_record::PostRecord;
use crate::entities::stage_result::StageResult;
use crate::repositories::{EventBus, StateStore};
use crate::value_objects::{SessionId, TargetInfo};

/// Read-only run configuration a stage may consult (limits, output
/// directory, requested format, filter expression, etc). Kept as a loose
/// string/JSON map here so the domain crate does not depend on the
/// application layer's concrete `RunConfig` type.
pub type ConfigSnapshot = HashMap<String, serde_json::Value>;

pub struct Context {
    pub session_id: SessionId,
    pub targets: Vec<TargetInfo>,
    pub posts: Vec<PostRecord>,
    pub config: ConfigSnapshot,
    pub stage_results: HashMap<String, StageResult>,
    state_store: Arc<dyn StateStore>,
    event_bus: Arc<dyn EventBus>,
}

impl Context {
    pub fn new(
        session_id: SessionId,
        targets: Vec<TargetInfo>,
        config: ConfigSnapshot,
        state_store: Arc<dyn StateStore>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            session_id,
            targets,
            posts: Vec::new(),
            config,
            stage_results: HashMap::new(),
            state_store,
            event_bus,
        }
    }

    pub fn state_store(&self) -> &Arc<dyn StateStore> {
        &self.state_store
    }

    pub fn event_bus(&self) -> &Arc<dyn EventBus> {
        &self.event_bus
    }

    pub fn record_stage_result(&mut self, result: StageResult) {
        self.stage_results.insert(result.stage_name.clone(), result);
    }

    pub fn stage_result(&self, stage_name: &str) -> Option<&StageResult> {
        self.stage_results.get(stage_name)
    }
}
