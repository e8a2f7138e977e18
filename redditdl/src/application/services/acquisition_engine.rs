// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Acquisition Engine (spec.md §4.2): resolves raw target strings into
//! `TargetInfo`, fans the batch out over a `Scraper` with bounded
//! concurrency, per-target timeout, and retry, and reports per-target and
//! aggregate results.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use regex::Regex;
use tokio::sync::Semaphore;
use tokio::time::sleep;

use redditdl_domain::entities::PostRecord;
use redditdl_domain::error::RedditdlError;
use redditdl_domain::events::{Event, EventType};
use redditdl_domain::repositories::{EventBus, Scraper};
use redditdl_domain::value_objects::{Listing, Period, SessionId, TargetInfo, TargetKind};

/// A raw target string resolved to `TargetInfo`, following the forms
/// `u/<name>`, `/u/<name>`, `r/<name>`, `/r/<name>`, `saved`, `upvoted`,
/// bare subreddit name (`^[A-Za-z0-9_]+$`), or an absolute URL
/// (spec.md §4.2 "Resolution").
pub fn resolve_target(raw: &str, default_listing: Listing, default_period: Option<Period>) -> TargetInfo {
    let trimmed = raw.trim();
    let bare_subreddit = Regex::new(r"^[A-Za-z0-9_]+$").expect("static regex is valid");

    let kind = if let Some(name) = trimmed.strip_prefix("u/").or_else(|| trimmed.strip_prefix("/u/")) {
        TargetKind::User { name: name.to_string() }
    } else if let Some(name) = trimmed.strip_prefix("r/").or_else(|| trimmed.strip_prefix("/r/")) {
        subreddit_target(name, default_listing, default_period)
    } else if trimmed.eq_ignore_ascii_case("saved") {
        TargetKind::Saved
    } else if trimmed.eq_ignore_ascii_case("upvoted") {
        TargetKind::Upvoted
    } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        TargetKind::Url { url: trimmed.to_string() }
    } else if bare_subreddit.is_match(trimmed) {
        TargetKind::Subreddit {
            name: trimmed.to_string(),
            listing: default_listing,
            period: if default_listing.requires_period() { default_period } else { None },
        }
    } else {
        TargetKind::Unknown { raw: trimmed.to_string() }
    };

    TargetInfo::new(kind, raw)
}

/// Splits `name[?listing=<l>&period=<p>]`, the form `TargetInfo::canonical`
/// renders subreddit targets in, so re-resolving a canonical string is a
/// fixed point (spec.md §8 property R2) instead of treating the query
/// string as part of the subreddit name.
fn subreddit_target(name_and_query: &str, default_listing: Listing, default_period: Option<Period>) -> TargetKind {
    let (name, query) = match name_and_query.split_once('?') {
        Some((name, query)) => (name, Some(query)),
        None => (name_and_query, None),
    };

    let mut listing = default_listing;
    let mut period = None;
    if let Some(query) = query {
        for pair in query.split('&') {
            match pair.split_once('=') {
                Some(("listing", value)) => listing = Listing::parse_or_default(value),
                Some(("period", value)) => period = Some(Period::parse_or_default(value)),
                _ => {}
            }
        }
    }
    if !listing.requires_period() {
        period = None;
    } else if period.is_none() {
        period = default_period;
    }

    TargetKind::Subreddit { name: name.to_string(), listing, period }
}

#[derive(Debug, Clone)]
pub struct TargetProcessingResult {
    pub target: TargetInfo,
    pub posts: Vec<PostRecord>,
    pub success: bool,
    pub error: Option<String>,
    pub duration: Duration,
    pub metadata: HashMap<String, String>,
}

pub struct AcquisitionPolicy {
    pub max_concurrent: usize,
    pub timeout_per_target: Duration,
    pub rate_limit_delay: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub fail_fast: bool,
    pub post_limit: usize,
}

impl Default for AcquisitionPolicy {
    fn default() -> Self {
        Self {
            max_concurrent: 3,
            timeout_per_target: Duration::from_secs(300),
            rate_limit_delay: Duration::ZERO,
            retry_attempts: 0,
            retry_delay: Duration::from_secs(1),
            fail_fast: false,
            post_limit: 100,
        }
    }
}

impl AcquisitionPolicy {
    /// `max_concurrent` is clamped to 1-20 (spec.md §4.2).
    pub fn clamped_max_concurrent(&self) -> usize {
        self.max_concurrent.clamp(1, 20)
    }
}

pub struct AcquisitionEngine {
    scraper: Arc<dyn Scraper>,
    event_bus: Arc<dyn EventBus>,
    session_id: SessionId,
    policy: AcquisitionPolicy,
}

impl AcquisitionEngine {
    pub fn new(scraper: Arc<dyn Scraper>, event_bus: Arc<dyn EventBus>, session_id: SessionId, policy: AcquisitionPolicy) -> Self {
        Self { scraper, event_bus, session_id, policy }
    }

    pub async fn run(&self, targets: &[TargetInfo], now_epoch: i64) -> Vec<TargetProcessingResult> {
        let semaphore = Arc::new(Semaphore::new(self.policy.clamped_max_concurrent()));
        let mut tasks = Vec::with_capacity(targets.len());

        for (index, target) in targets.iter().cloned().enumerate() {
            if index > 0 {
                sleep(self.policy.rate_limit_delay).await;
            }
            let permit = semaphore.clone();
            let scraper = self.scraper.clone();
            let event_bus = self.event_bus.clone();
            let session_id = self.session_id;
            let timeout = self.policy.timeout_per_target;
            let retry_attempts = self.policy.retry_attempts;
            let retry_delay = self.policy.retry_delay;
            let post_limit = self.policy.post_limit;

            tasks.push(tokio::spawn(async move {
                let _permit = permit.acquire_owned().await.expect("semaphore not closed");
                fetch_with_retry(
                    &target,
                    &scraper,
                    &event_bus,
                    session_id,
                    timeout,
                    retry_attempts,
                    retry_delay,
                    post_limit,
                    now_epoch,
                )
                .await
            }));
        }

        let joined = join_all(tasks).await;
        let mut results = Vec::with_capacity(joined.len());
        for handle in joined {
            let result = handle.expect("acquisition task panicked");
            if self.policy.fail_fast && !result.success {
                results.push(result);
                break;
            }
            results.push(result);
        }
        results
    }
}

#[allow(clippy::too_many_arguments)]
async fn fetch_with_retry(
    target: &TargetInfo,
    scraper: &Arc<dyn Scraper>,
    event_bus: &Arc<dyn EventBus>,
    session_id: SessionId,
    timeout: Duration,
    retry_attempts: u32,
    retry_delay: Duration,
    post_limit: usize,
    now_epoch: i64,
) -> TargetProcessingResult {
    let start = Instant::now();
    let mut attempt = 0;

    loop {
        let outcome = tokio::time::timeout(timeout, fetch_once(target, scraper, post_limit)).await;

        let (success, posts, error) = match outcome {
            Ok(Ok(posts)) => (true, posts, None),
            Ok(Err(err)) => (false, Vec::new(), Some((err.message.clone(), err.kind.is_transient()))),
            Err(_) => (false, Vec::new(), Some(("timed out".to_string(), true))),
        };

        if success {
            if !posts.is_empty() {
                let preview = posts.iter().take(3).map(|p| p.id.to_string()).collect();
                let _ = event_bus.emit(Event::new(
                    now_epoch,
                    session_id,
                    EventType::PostDiscovered {
                        source: scraper.scraper_type().to_string(),
                        target: target.canonical(),
                        content_type: target.label().to_string(),
                        count: posts.len(),
                        preview,
                    },
                ));
            }
            return TargetProcessingResult {
                target: target.clone(),
                posts,
                success: true,
                error: None,
                duration: start.elapsed(),
                metadata: HashMap::new(),
            };
        }

        let (message, retryable) = error.expect("non-success branch always carries an error");
        if retryable && attempt < retry_attempts {
            attempt += 1;
            sleep(retry_delay).await;
            continue;
        }

        return TargetProcessingResult {
            target: target.clone(),
            posts: Vec::new(),
            success: false,
            error: Some(message),
            duration: start.elapsed(),
            metadata: HashMap::new(),
        };
    }
}

async fn fetch_once(target: &TargetInfo, scraper: &Arc<dyn Scraper>, post_limit: usize) -> Result<Vec<PostRecord>, RedditdlError> {
    if target.requires_authentication() && scraper.requires_authentication(target) {
        return Err(RedditdlError::validation(
            format!("{} requires an authenticated scraper", target.canonical()),
            redditdl_domain::error::ErrorContext::new("acquisition.fetch").with_target(target.canonical()),
        ));
    }

    match &target.kind {
        TargetKind::User { name } => scraper.fetch_user_posts(name, post_limit).await,
        TargetKind::Subreddit { name, listing, period } => scraper.fetch_subreddit_posts(name, *listing, *period, post_limit).await,
        TargetKind::Saved => scraper.fetch_saved(post_limit).await,
        TargetKind::Upvoted => scraper.fetch_upvoted(post_limit).await,
        TargetKind::Url { url } => scraper.fetch_url(url).await,
        TargetKind::Unknown { raw } => Err(RedditdlError::validation(
            format!("unrecognized target `{raw}`"),
            redditdl_domain::error::ErrorContext::new("acquisition.resolve").with_target(raw.clone()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::value_objects::Listing;

    #[test]
    fn resolves_user_and_subreddit_forms() {
        let user = resolve_target("u/alice", Listing::Hot, None);
        assert_eq!(user.kind, TargetKind::User { name: "alice".into() });

        let subreddit = resolve_target("/r/rust", Listing::Hot, None);
        assert!(matches!(subreddit.kind, TargetKind::Subreddit { ref name, .. } if name == "rust"));

        let bare = resolve_target("rust", Listing::Hot, None);
        assert!(matches!(bare.kind, TargetKind::Subreddit { ref name, .. } if name == "rust"));
    }

    #[test]
    fn resolves_saved_upvoted_and_url() {
        assert_eq!(resolve_target("saved", Listing::Hot, None).kind, TargetKind::Saved);
        assert_eq!(resolve_target("upvoted", Listing::Hot, None).kind, TargetKind::Upvoted);
        assert!(matches!(resolve_target("https://example.com/p/1", Listing::Hot, None).kind, TargetKind::Url { .. }));
    }

    #[test]
    fn non_matching_strings_resolve_to_unknown() {
        assert!(matches!(resolve_target("not a valid target!!", Listing::Hot, None).kind, TargetKind::Unknown { .. }));
    }
}
