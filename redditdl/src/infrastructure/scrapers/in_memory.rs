// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `InMemoryScraper` (SPEC_FULL.md §4.9): a pre-seeded `Scraper` used by
//! tests and `--offline` fixture runs.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use redditdl_domain::entities::PostRecord;
use redditdl_domain::error::{ErrorContext, RedditdlError};
use redditdl_domain::repositories::Scraper;
use redditdl_domain::value_objects::{Listing, Period, TargetInfo};

/// Keyed by `"u/<name>"`, `"r/<name>"`, `"saved"`, `"upvoted"`, or the raw
/// URL, so tests can seed exactly the fixture a target will resolve to.
#[derive(Default)]
pub struct InMemoryScraper {
    fixtures: Mutex<HashMap<String, Vec<PostRecord>>>,
    authenticated: bool,
}

impl InMemoryScraper {
    pub fn new(authenticated: bool) -> Self {
        Self {
            fixtures: Mutex::new(HashMap::new()),
            authenticated,
        }
    }

    pub fn seed(&self, key: impl Into<String>, posts: Vec<PostRecord>) {
        self.fixtures.lock().insert(key.into(), posts);
    }

    fn lookup(&self, key: &str, limit: usize) -> Vec<PostRecord> {
        self.fixtures
            .lock()
            .get(key)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .collect()
    }
}

#[async_trait]
impl Scraper for InMemoryScraper {
    fn scraper_type(&self) -> &'static str {
        "in_memory"
    }

    fn requires_authentication(&self, target: &TargetInfo) -> bool {
        target.requires_authentication() && !self.authenticated
    }

    async fn fetch_user_posts(&self, username: &str, limit: usize) -> Result<Vec<PostRecord>, RedditdlError> {
        Ok(self.lookup(&format!("u/{username}"), limit))
    }

    async fn fetch_subreddit_posts(
        &self,
        subreddit: &str,
        _listing: Listing,
        _period: Option<Period>,
        limit: usize,
    ) -> Result<Vec<PostRecord>, RedditdlError> {
        Ok(self.lookup(&format!("r/{subreddit}"), limit))
    }

    async fn fetch_saved(&self, limit: usize) -> Result<Vec<PostRecord>, RedditdlError> {
        if !self.authenticated {
            return Err(RedditdlError::validation(
                "saved feed requires an authenticated scraper",
                ErrorContext::new("fetch_saved"),
            ));
        }
        Ok(self.lookup("saved", limit))
    }

    async fn fetch_upvoted(&self, limit: usize) -> Result<Vec<PostRecord>, RedditdlError> {
        if !self.authenticated {
            return Err(RedditdlError::validation(
                "upvoted feed requires an authenticated scraper",
                ErrorContext::new("fetch_upvoted"),
            ));
        }
        Ok(self.lookup("upvoted", limit))
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<PostRecord>, RedditdlError> {
        let posts = self.lookup(url, usize::MAX);
        if posts.is_empty() {
            return Err(RedditdlError::target_not_found(
                format!("no fixture seeded for url {url}"),
                ErrorContext::new("fetch_url").with_target(url),
            ));
        }
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::value_objects::PostId;

    fn sample_post(id: &str) -> PostRecord {
        PostRecord::new(
            PostId::new(id).unwrap(),
            "t",
            "a",
            "rust",
            "/perm",
            "https://example.com",
            0,
            "example.com",
            "link",
        )
    }

    #[tokio::test]
    async fn fetch_saved_without_auth_fails() {
        let scraper = InMemoryScraper::new(false);
        let result = scraper.fetch_saved(10).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn fetch_user_posts_respects_limit() {
        let scraper = InMemoryScraper::new(false);
        scraper.seed("u/alice", vec![sample_post("p1"), sample_post("p2"), sample_post("p3")]);
        let posts = scraper.fetch_user_posts("alice", 2).await.unwrap();
        assert_eq!(posts.len(), 2);
    }
}
