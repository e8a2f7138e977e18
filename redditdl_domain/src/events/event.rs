// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The event envelope and its payload variants (spec.md §4.1/§4.7;
//! SPEC_FULL.md §4.8 ADDED event bus).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::value_objects::SessionId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub timestamp_epoch: i64,
    pub session_id: SessionId,
    pub correlation_id: Option<String>,
    pub event_type: EventType,
}

impl Event {
    pub fn new(timestamp_epoch: i64, session_id: SessionId, event_type: EventType) -> Self {
        Self {
            timestamp_epoch,
            session_id,
            correlation_id: None,
            event_type,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// The topic string subscribers filter on (SPEC_FULL.md §4.8
    /// `TokioEventBus` topic selectors).
    pub fn topic(&self) -> &'static str {
        self.event_type.topic()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventType {
    StageStarted {
        name: String,
        config: HashMap<String, serde_json::Value>,
    },
    StageCompleted {
        name: String,
        duration_ms: u64,
        processed: usize,
        succeeded: usize,
        failed: usize,
        data: HashMap<String, serde_json::Value>,
    },
    StageFailed {
        name: String,
        duration_ms: u64,
        error: String,
        error_code: u32,
        config: HashMap<String, serde_json::Value>,
    },
    ErrorOccurred {
        kind: String,
        message: String,
        stage: Option<String>,
        recoverable: bool,
        extra: HashMap<String, serde_json::Value>,
    },
    PostDiscovered {
        source: String,
        target: String,
        content_type: String,
        count: usize,
        preview: Vec<String>,
    },
    PostProcessed {
        post_id: String,
        handler: String,
        success: bool,
    },
    Statistics {
        name: String,
        value: f64,
        tags: HashMap<String, String>,
    },
}

impl EventType {
    pub fn topic(&self) -> &'static str {
        match self {
            EventType::StageStarted { .. } => "stage.started",
            EventType::StageCompleted { .. } => "stage.completed",
            EventType::StageFailed { .. } => "stage.failed",
            EventType::ErrorOccurred { .. } => "error",
            EventType::PostDiscovered { .. } => "post.discovered",
            EventType::PostProcessed { .. } => "post.processed",
            EventType::Statistics { .. } => "statistics",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_discovered_preview_is_capped_by_caller_not_the_type() {
        let event_type = EventType::PostDiscovered {
            source: "in_memory".into(),
            target: "r/rust".into(),
            content_type: "link".into(),
            count: 10,
            preview: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(event_type.topic(), "post.discovered");
    }
}
