// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `ContentHandler` port (spec.md §4.4): the Content-Handler Registry
//! dispatches to implementations of this trait by priority order.

use async_trait::async_trait;

use crate::entities::handler_result::HandlerResult;
use crate::entities::post_record::PostRecord;
use crate::error::RedditdlError;
use crate::value_objects::ContentType;

#[async_trait]
pub trait ContentHandler: Send + Sync {
    /// Stable name used in logs, metrics, and `StageResult::data` keys.
    fn name(&self) -> &str;

    /// Dispatch priority: lower numbers run first when more than one
    /// handler claims the same post (spec.md §4.4 dispatch order).
    fn priority(&self) -> i32;

    fn supported_content_types(&self) -> &[ContentType];

    /// Whether this handler claims the given post. Default delegates to
    /// `supported_content_types`; handlers with finer-grained rules
    /// (domain allow-lists, extension checks) override this.
    fn can_handle(&self, content_type: ContentType, _post: &PostRecord) -> bool {
        self.supported_content_types().contains(&content_type)
    }

    async fn process(&self, post: &PostRecord) -> Result<HandlerResult, RedditdlError>;
}
