// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `InMemoryStateStore` (SPEC_FULL.md §4.9): a `StateStore` backed by a
//! process-local map, for tests and single-process dry runs.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use redditdl_domain::entities::{SessionSnapshot, SessionStatus};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::repositories::StateStore;
use redditdl_domain::value_objects::SessionId;

#[derive(Default)]
pub struct InMemoryStateStore {
    sessions: Mutex<HashMap<SessionId, SessionSnapshot>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn create_session(&self, snapshot: SessionSnapshot) -> Result<(), RedditdlError> {
        self.sessions.lock().insert(snapshot.session_id, snapshot);
        Ok(())
    }

    async fn update_session_status(&self, session_id: &SessionId, status: SessionStatus) -> Result<(), RedditdlError> {
        let mut sessions = self.sessions.lock();
        if let Some(snapshot) = sessions.get_mut(session_id) {
            snapshot.status = status;
        }
        Ok(())
    }

    async fn set_metadata(&self, session_id: &SessionId, key: &str, value: &str) -> Result<(), RedditdlError> {
        let mut sessions = self.sessions.lock();
        if let Some(snapshot) = sessions.get_mut(session_id) {
            snapshot.metadata.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    async fn find_resumable(&self) -> Result<Vec<SessionSnapshot>, RedditdlError> {
        let mut resumable: Vec<SessionSnapshot> = self
            .sessions
            .lock()
            .values()
            .filter(|s| s.is_resumable())
            .cloned()
            .collect();
        resumable.sort_by(|a, b| b.started_at_epoch.cmp(&a.started_at_epoch));
        Ok(resumable)
    }

    async fn close(&self) -> Result<(), RedditdlError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_resumable_excludes_completed_sessions() {
        let store = InMemoryStateStore::new();
        let running = SessionSnapshot::new(SessionId::new(), vec!["u/alice".into()], 0);
        let mut completed = SessionSnapshot::new(SessionId::new(), vec!["u/bob".into()], 0);
        completed.status = SessionStatus::Completed;

        store.create_session(running.clone()).await.unwrap();
        store.create_session(completed).await.unwrap();

        let resumable = store.find_resumable().await.unwrap();
        assert_eq!(resumable.len(), 1);
        assert_eq!(resumable[0].session_id, running.session_id);
    }
}
