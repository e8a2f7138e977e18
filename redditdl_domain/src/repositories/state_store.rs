// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `StateStore` port (SPEC_FULL.md §4.9 ADDED): session persistence so
//! an interrupted run can resume instead of restarting from scratch.

use async_trait::async_trait;

use crate::entities::session_snapshot::SessionSnapshot;
use crate::error::RedditdlError;
use crate::value_objects::SessionId;

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn create_session(&self, snapshot: SessionSnapshot) -> Result<(), RedditdlError>;

    async fn update_session_status(
        &self,
        session_id: &SessionId,
        status: crate::entities::session_snapshot::SessionStatus,
    ) -> Result<(), RedditdlError>;

    async fn set_metadata(&self, session_id: &SessionId, key: &str, value: &str) -> Result<(), RedditdlError>;

    /// Sessions left `Running` or `Interrupted` by a prior process,
    /// newest first.
    async fn find_resumable(&self) -> Result<Vec<SessionSnapshot>, RedditdlError>;

    async fn close(&self) -> Result<(), RedditdlError>;
}
