// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `SqliteStateStore` (SPEC_FULL.md §4.9): a durable `StateStore` so an
//! interrupted run can be resumed from disk, following the teacher's
//! `infrastructure::repositories::schema` pattern of applying its schema
//! on first connect rather than requiring an out-of-band migration step.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use tracing::info;

use redditdl_domain::entities::{SessionSnapshot, SessionStatus};
use redditdl_domain::error::{ErrorContext, RedditdlError};
use redditdl_domain::repositories::StateStore;
use redditdl_domain::value_objects::SessionId;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    session_id TEXT PRIMARY KEY,
    targets_json TEXT NOT NULL,
    status TEXT NOT NULL,
    metadata_json TEXT NOT NULL,
    last_completed_stage TEXT,
    processed_post_ids_json TEXT NOT NULL,
    started_at_epoch INTEGER NOT NULL,
    updated_at_epoch INTEGER NOT NULL
);
"#;

pub struct SqliteStateStore {
    pool: SqlitePool,
}

impl SqliteStateStore {
    pub async fn connect(database_url: &str) -> Result<Self, RedditdlError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| RedditdlError::filesystem(e.to_string(), ErrorContext::new("sqlite_connect")))?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| RedditdlError::filesystem(e.to_string(), ErrorContext::new("sqlite_migrate")))?;

        info!(database_url, "sqlite state store schema ready");
        Ok(Self { pool })
    }

    fn row_to_snapshot(row: &sqlx::sqlite::SqliteRow) -> Result<SessionSnapshot, RedditdlError> {
        let session_id: String = row.try_get("session_id").map_err(sqlx_err)?;
        let targets_json: String = row.try_get("targets_json").map_err(sqlx_err)?;
        let status: String = row.try_get("status").map_err(sqlx_err)?;
        let metadata_json: String = row.try_get("metadata_json").map_err(sqlx_err)?;
        let last_completed_stage: Option<String> = row.try_get("last_completed_stage").map_err(sqlx_err)?;
        let processed_json: String = row.try_get("processed_post_ids_json").map_err(sqlx_err)?;
        let started_at_epoch: i64 = row.try_get("started_at_epoch").map_err(sqlx_err)?;
        let updated_at_epoch: i64 = row.try_get("updated_at_epoch").map_err(sqlx_err)?;

        Ok(SessionSnapshot {
            session_id: SessionId::parse(&session_id)
                .map_err(|e| RedditdlError::processing(e, ErrorContext::new("parse_session_id")))?,
            targets: serde_json::from_str(&targets_json)?,
            status: match status.as_str() {
                "running" => SessionStatus::Running,
                "completed" => SessionStatus::Completed,
                "failed" => SessionStatus::Failed,
                _ => SessionStatus::Interrupted,
            },
            metadata: serde_json::from_str(&metadata_json)?,
            last_completed_stage,
            processed_post_ids: serde_json::from_str(&processed_json)?,
            started_at_epoch,
            updated_at_epoch,
        })
    }
}

fn sqlx_err(e: sqlx::Error) -> RedditdlError {
    RedditdlError::filesystem(e.to_string(), ErrorContext::new("sqlite_row"))
}

fn status_str(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Running => "running",
        SessionStatus::Completed => "completed",
        SessionStatus::Failed => "failed",
        SessionStatus::Interrupted => "interrupted",
    }
}

#[async_trait]
impl StateStore for SqliteStateStore {
    async fn create_session(&self, snapshot: SessionSnapshot) -> Result<(), RedditdlError> {
        sqlx::query(
            "INSERT INTO sessions (session_id, targets_json, status, metadata_json, last_completed_stage, \
             processed_post_ids_json, started_at_epoch, updated_at_epoch) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(snapshot.session_id.to_string())
        .bind(serde_json::to_string(&snapshot.targets)?)
        .bind(status_str(snapshot.status))
        .bind(serde_json::to_string(&snapshot.metadata)?)
        .bind(&snapshot.last_completed_stage)
        .bind(serde_json::to_string(&snapshot.processed_post_ids)?)
        .bind(snapshot.started_at_epoch)
        .bind(snapshot.updated_at_epoch)
        .execute(&self.pool)
        .await
        .map_err(sqlx_err)?;
        Ok(())
    }

    async fn update_session_status(&self, session_id: &SessionId, status: SessionStatus) -> Result<(), RedditdlError> {
        sqlx::query("UPDATE sessions SET status = ? WHERE session_id = ?")
            .bind(status_str(status))
            .bind(session_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(sqlx_err)?;
        Ok(())
    }

    async fn set_metadata(&self, session_id: &SessionId, key: &str, value: &str) -> Result<(), RedditdlError> {
        let row = sqlx::query("SELECT metadata_json FROM sessions WHERE session_id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_err)?;

        let Some(row) = row else { return Ok(()) };
        let existing: String = row.try_get("metadata_json").map_err(sqlx_err)?;
        let mut metadata: std::collections::HashMap<String, String> = serde_json::from_str(&existing)?;
        metadata.insert(key.to_string(), value.to_string());

        sqlx::query("UPDATE sessions SET metadata_json = ? WHERE session_id = ?")
            .bind(serde_json::to_string(&metadata)?)
            .bind(session_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(sqlx_err)?;
        Ok(())
    }

    async fn find_resumable(&self) -> Result<Vec<SessionSnapshot>, RedditdlError> {
        let rows = sqlx::query(
            "SELECT * FROM sessions WHERE status IN ('running', 'interrupted') ORDER BY started_at_epoch DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(sqlx_err)?;

        rows.iter().map(Self::row_to_snapshot).collect()
    }

    async fn close(&self) -> Result<(), RedditdlError> {
        self.pool.close().await;
        Ok(())
    }
}
