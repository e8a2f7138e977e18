// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # `PostRecord`
//!
//! The central entity flowing through the pipeline (spec.md §3). Created by
//! Acquisition, pruned by Filter, additively annotated by Processing
//! (output paths, embedding status — see the Open Question resolution in
//! spec.md §9: Processing handlers may only add annotations, never mutate
//! acquired fields), and read-only from Export onward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::PostId;

/// A poll option and its vote count, as carried by poll posts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollOption {
    pub text: String,
    pub vote_count: Option<u64>,
}

/// A poll's full payload, when present on a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollData {
    pub options: Vec<PollOption>,
    pub voting_end_timestamp: Option<i64>,
    pub total_vote_count: Option<u64>,
}

/// An award applied to a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Award {
    pub name: String,
    pub count: u32,
}

/// Boolean flags carried by a post, grouped to keep `PostRecord`'s field
/// list from sprawling (spec.md §3 "boolean flags").
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostFlags {
    pub is_video: bool,
    pub is_self: bool,
    pub is_nsfw: bool,
    pub spoiler: bool,
    pub archived: bool,
    pub locked: bool,
    pub stickied: bool,
    pub edited: bool,
}

/// Output files and annotations a `ContentHandler` attaches to a post
/// after processing. Additive only (see module docs); never read by
/// Acquisition or Filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingAnnotations {
    pub output_paths: Vec<String>,
    pub embedded_metadata: bool,
    pub sidecar_created: bool,
}

/// A single acquired post, with every field the core cares about
/// (spec.md §3 `PostRecord`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    pub title: String,
    pub author: String,
    pub source_group: String,
    pub permalink: String,
    pub url: String,
    pub media_url_field: Option<String>,
    pub url_overridden_by_dest: Option<String>,
    pub created_at_epoch: i64,
    pub created_at_iso: String,
    pub flags: PostFlags,
    pub score: i64,
    pub comment_count: u64,
    pub gallery_urls: Vec<String>,
    pub poll: Option<PollData>,
    pub awards: Vec<Award>,
    pub domain: String,
    pub post_type: String,
    pub crosspost_parent_id: Option<String>,
    pub selftext: String,
    pub annotations: ProcessingAnnotations,
    /// Preserves the raw upstream payload for exporters/debugging. Never
    /// read by core acquisition/filter/dispatch logic (see SPEC_FULL.md §3).
    pub raw: serde_json::Value,
}

impl PostRecord {
    /// Builds a `PostRecord`, computing the derived `created_at_iso` and
    /// validating the non-empty-id invariant (spec.md §3, §8 boundary:
    /// "Missing `id` in a raw post -> that post is rejected").
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PostId,
        title: impl Into<String>,
        author: impl Into<String>,
        source_group: impl Into<String>,
        permalink: impl Into<String>,
        url: impl Into<String>,
        created_at_epoch: i64,
        domain: impl Into<String>,
        post_type: impl Into<String>,
    ) -> Self {
        let created_at_iso = Self::format_iso(created_at_epoch);
        Self {
            id,
            title: title.into(),
            author: author.into(),
            source_group: source_group.into(),
            permalink: permalink.into(),
            url: url.into(),
            media_url_field: None,
            url_overridden_by_dest: None,
            created_at_epoch,
            created_at_iso,
            flags: PostFlags::default(),
            score: 0,
            comment_count: 0,
            gallery_urls: Vec::new(),
            poll: None,
            awards: Vec::new(),
            domain: domain.into(),
            post_type: post_type.into(),
            crosspost_parent_id: None,
            selftext: String::new(),
            annotations: ProcessingAnnotations::default(),
            raw: serde_json::Value::Null,
        }
    }

    /// Formats an epoch-seconds timestamp as `YYYY-MM-DDTHH:MM:SSZ`.
    /// Falls back to the current UTC second if the epoch is out of range
    /// (spec.md §3 invariant: `created_at_iso` is always well-formed).
    fn format_iso(epoch: i64) -> String {
        DateTime::from_timestamp(epoch, 0)
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string()
    }

    /// Media-URL priority resolution (spec.md §3 invariant, §8 property
    /// P5): `media_url > url_overridden_by_dest > url`, skipping blanks,
    /// `None` if every candidate is blank.
    pub fn media_url(&self) -> Option<&str> {
        [
            self.media_url_field.as_deref(),
            self.url_overridden_by_dest.as_deref(),
            Some(self.url.as_str()),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
    }

    pub fn matches_iso_format(&self) -> bool {
        let s = &self.created_at_iso;
        s.len() == 20 && s.ends_with('Z') && s.as_bytes()[10] == b'T'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PostRecord {
        PostRecord::new(
            PostId::new("t3_1").unwrap(),
            "title",
            "alice",
            "rust",
            "/r/rust/comments/1",
            "https://example.com/a",
            1_700_000_000,
            "example.com",
            "link",
        )
    }

    #[test]
    fn created_at_iso_is_well_formed() {
        let post = sample();
        assert!(post.matches_iso_format(), "{}", post.created_at_iso);
    }

    #[test]
    fn media_url_priority_prefers_media_url_field() {
        let mut post = sample();
        post.media_url_field = Some("https://media.example.com/x.jpg".into());
        post.url_overridden_by_dest = Some("https://dest.example.com/x".into());
        assert_eq!(post.media_url(), Some("https://media.example.com/x.jpg"));
    }

    #[test]
    fn media_url_priority_skips_blanks() {
        let mut post = sample();
        post.media_url_field = Some("   ".into());
        post.url_overridden_by_dest = Some("".into());
        assert_eq!(post.media_url(), Some("https://example.com/a"));
    }

    #[test]
    fn media_url_is_none_when_all_blank() {
        let mut post = sample();
        post.url = String::new();
        assert_eq!(post.media_url(), None);
    }

    proptest::proptest! {
        /// P4: `created_at_iso` is always well-formed, for any epoch,
        /// including out-of-range values `DateTime::from_timestamp` rejects.
        #[test]
        fn p4_created_at_iso_is_always_well_formed(epoch in proptest::num::i64::ANY) {
            let post = PostRecord::new(PostId::new("p").unwrap(), "t", "a", "g", "/p", "https://example.com", epoch, "example.com", "link");
            proptest::prop_assert!(post.matches_iso_format(), "{}", post.created_at_iso);
        }

        /// P5: `media_url` is the first non-blank of
        /// `media_url_field > url_overridden_by_dest > url`, or `None` if
        /// every candidate is blank.
        #[test]
        fn p5_media_url_priority(
            media_url_field in proptest::option::of("( *|https://media.example.com/[a-z]{1,8})"),
            url_overridden_by_dest in proptest::option::of("( *|https://dest.example.com/[a-z]{1,8})"),
            url in "( *|https://example.com/[a-z]{1,8})",
        ) {
            let mut post = sample();
            post.media_url_field = media_url_field.clone();
            post.url_overridden_by_dest = url_overridden_by_dest.clone();
            post.url = url.clone();

            let expected = [media_url_field.as_deref(), url_overridden_by_dest.as_deref(), Some(url.as_str())]
                .into_iter()
                .flatten()
                .find(|s| !s.trim().is_empty());

            proptest::prop_assert_eq!(post.media_url(), expected);
        }
    }
}
