// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `Scraper` port (spec.md §4.2): the Acquisition Engine's only
//! dependency on "how posts actually get fetched". Swappable per target
//! kind, mockable in tests.

use async_trait::async_trait;

use crate::entities::post_record::PostRecord;
use crate::error::RedditdlError;
use crate::value_objects::{Period, TargetInfo};

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Short identifier surfaced in logs/metrics, e.g. `"in_memory"`.
    fn scraper_type(&self) -> &'static str;

    /// Whether this scraper needs an authenticated session for the given
    /// target (spec.md §4.2 `requires_authentication`).
    fn requires_authentication(&self, target: &TargetInfo) -> bool;

    async fn fetch_user_posts(&self, username: &str, limit: usize) -> Result<Vec<PostRecord>, RedditdlError>;

    async fn fetch_subreddit_posts(
        &self,
        subreddit: &str,
        listing: crate::value_objects::Listing,
        period: Option<Period>,
        limit: usize,
    ) -> Result<Vec<PostRecord>, RedditdlError>;

    async fn fetch_saved(&self, limit: usize) -> Result<Vec<PostRecord>, RedditdlError>;

    async fn fetch_upvoted(&self, limit: usize) -> Result<Vec<PostRecord>, RedditdlError>;

    async fn fetch_url(&self, url: &str) -> Result<Vec<PostRecord>, RedditdlError>;
}
