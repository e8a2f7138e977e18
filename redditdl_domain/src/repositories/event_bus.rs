// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `EventBus` port (SPEC_FULL.md §4.8 ADDED): decouples stages and
//! services from whatever delivers events to subscribers.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::RedditdlError;
use crate::events::Event;

#[async_trait]
pub trait EventBus: Send + Sync {
    /// Blocking emit: returns once every subscriber's bounded channel has
    /// accepted the event (or been dropped as lagging).
    fn emit(&self, event: Event) -> Result<(), RedditdlError>;

    /// Fire-and-forget emit for hot paths that cannot await backpressure.
    async fn emit_async(&self, event: Event) -> Result<(), RedditdlError>;

    /// Subscribe to events matching a topic prefix (`""` matches everything).
    fn subscribe(&self, topic: &str) -> BoxStream<'static, Event>;
}
