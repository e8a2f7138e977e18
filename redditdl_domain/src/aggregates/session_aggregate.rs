// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `SessionAggregate`: the consistency boundary around one acquisition
//! run's lifecycle (spec.md §4.1 run lifecycle; SPEC_FULL.md §4.8 events).
//!
//! Tracks which stages have started/completed/failed for the current
//! session and raises the corresponding `Event`s, mirroring an
//! event-sourced aggregate: state changes are expressed as events first,
//! applied to in-memory state second, and handed to the event bus /
//! state store by the caller once committed.

use crate::entities::session_snapshot::{SessionSnapshot, SessionStatus};
use crate::entities::stage_result::StageResult;
use crate::error::RedditdlError;
use crate::events::{Event, EventType};
use crate::value_objects::SessionId;

#[derive(Debug, Clone)]
pub struct SessionAggregate {
    snapshot: SessionSnapshot,
    version: u64,
    uncommitted_events: Vec<Event>,
}

impl SessionAggregate {
    pub fn new(session_id: SessionId, targets: Vec<String>, started_at_epoch: i64) -> Self {
        Self {
            snapshot: SessionSnapshot::new(session_id, targets, started_at_epoch),
            version: 1,
            uncommitted_events: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.snapshot.session_id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn uncommitted_events(&self) -> &[Event] {
        &self.uncommitted_events
    }

    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    pub fn record_stage_started(&mut self, stage_name: &str, now_epoch: i64) {
        self.add_event(EventType::StageStarted {
            name: stage_name.to_string(),
            config: Default::default(),
        }, now_epoch);
    }

    /// Applies a completed stage's result to the session, raising
    /// `StageCompleted` or `StageFailed` depending on `StageResult::success`.
    pub fn record_stage_result(&mut self, result: &StageResult, now_epoch: i64) -> Result<(), RedditdlError> {
        self.snapshot.last_completed_stage = Some(result.stage_name.clone());
        self.snapshot.updated_at_epoch = now_epoch;

        let event_type = if result.success() {
            EventType::StageCompleted {
                name: result.stage_name.clone(),
                duration_ms: result.duration.as_millis() as u64,
                processed: result.processed_count,
                succeeded: result.processed_count.saturating_sub(result.error_count),
                failed: result.error_count,
                data: result.data.clone(),
            }
        } else {
            EventType::StageFailed {
                name: result.stage_name.clone(),
                duration_ms: result.duration.as_millis() as u64,
                error: result.errors.first().cloned().unwrap_or_default(),
                error_code: 0,
                config: Default::default(),
            }
        };
        self.add_event(event_type, now_epoch);
        Ok(())
    }

    pub fn complete(&mut self, now_epoch: i64) {
        self.snapshot.status = SessionStatus::Completed;
        self.snapshot.updated_at_epoch = now_epoch;
    }

    pub fn fail(&mut self, now_epoch: i64) {
        self.snapshot.status = SessionStatus::Failed;
        self.snapshot.updated_at_epoch = now_epoch;
    }

    fn add_event(&mut self, event_type: EventType, now_epoch: i64) {
        self.version += 1;
        self.uncommitted_events
            .push(Event::new(now_epoch, self.snapshot.session_id.clone(), event_type));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn stage_failure_raises_stage_failed_event() {
        let mut aggregate = SessionAggregate::new(SessionId::new(), vec!["r/rust".into()], 0);
        let mut result = StageResult::new("acquisition");
        result.record_error("network timeout");
        aggregate.record_stage_result(&result, 1).unwrap();

        assert_eq!(aggregate.uncommitted_events().len(), 1);
        match &aggregate.uncommitted_events()[0].event_type {
            EventType::StageFailed { name, .. } => assert_eq!(name, "acquisition"),
            other => panic!("expected StageFailed, got {other:?}"),
        }
    }

    #[test]
    fn stage_success_raises_stage_completed_event() {
        let mut aggregate = SessionAggregate::new(SessionId::new(), vec!["r/rust".into()], 0);
        let mut result = StageResult::new("filter");
        result.processed_count = 5;
        result.duration = Duration::from_millis(10);
        aggregate.record_stage_result(&result, 1).unwrap();

        match &aggregate.uncommitted_events()[0].event_type {
            EventType::StageCompleted { succeeded, .. } => assert_eq!(*succeeded, 5),
            other => panic!("expected StageCompleted, got {other:?}"),
        }
    }
}
