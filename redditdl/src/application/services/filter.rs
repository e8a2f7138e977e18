// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `Filter` capability (spec.md §4.3) and a content-type classifier
//! shared by the Filter Chain and the Content-Handler Dispatch.

use redditdl_domain::entities::PostRecord;
use redditdl_domain::value_objects::{ContentType, IMAGE_EXTENSIONS, KNOWN_MEDIA_DOMAINS, VIDEO_EXTENSIONS};

/// A single configurable predicate in the Filter Chain. Implementors
/// must not panic; a `Result::Err` is treated by the chain as an
/// uncertain result and the post is included by default.
pub trait Filter: Send + Sync {
    fn name(&self) -> &'static str;
    fn validate_config(&self) -> Vec<String>;
    fn evaluate(&self, post: &PostRecord) -> Result<bool, String>;
}

/// Deterministic classifier (spec.md §4.4 "Detection"): explicit flags,
/// then URL/domain patterns, then a type-appropriate fallback.
pub fn classify(post: &PostRecord) -> ContentType {
    if post.crosspost_parent_id.is_some() {
        return ContentType::Crosspost;
    }
    if post.poll.is_some() {
        return ContentType::Poll;
    }
    if !post.gallery_urls.is_empty() {
        return ContentType::Gallery;
    }
    if post.flags.is_self {
        return ContentType::Text;
    }

    let url = post.media_url().unwrap_or(&post.url);
    let lower = url.to_ascii_lowercase();

    if post.flags.is_video || VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return ContentType::Video;
    }
    if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return ContentType::Image;
    }
    if KNOWN_MEDIA_DOMAINS.iter().any(|domain| post.domain.eq_ignore_ascii_case(domain)) {
        return ContentType::Image;
    }

    if post.flags.is_self {
        ContentType::Text
    } else {
        ContentType::External
    }
}
