// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use redditdl_domain::entities::PostRecord;

use crate::application::services::filter::Filter;
use crate::infrastructure::config::NsfwMode;

/// `include`: any; `exclude`: `is_nsfw == false`; `only`: `is_nsfw ==
/// true` (spec.md §4.3).
pub struct NsfwFilter {
    pub mode: NsfwMode,
}

impl Filter for NsfwFilter {
    fn name(&self) -> &'static str {
        "nsfw"
    }

    fn validate_config(&self) -> Vec<String> {
        Vec::new()
    }

    fn evaluate(&self, post: &PostRecord) -> Result<bool, String> {
        Ok(match self.mode {
            NsfwMode::Allow => true,
            NsfwMode::Exclude => !post.flags.is_nsfw,
            NsfwMode::Only => post.flags.is_nsfw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::value_objects::PostId;

    fn post(is_nsfw: bool) -> PostRecord {
        let mut post = PostRecord::new(
            PostId::new("t3_1").unwrap(),
            "t",
            "a",
            "g",
            "/p",
            "https://example.com",
            0,
            "example.com",
            "link",
        );
        post.flags.is_nsfw = is_nsfw;
        post
    }

    #[test]
    fn exclude_mode_rejects_nsfw_posts() {
        let filter = NsfwFilter { mode: NsfwMode::Exclude };
        assert!(!filter.evaluate(&post(true)).unwrap());
        assert!(filter.evaluate(&post(false)).unwrap());
    }

    #[test]
    fn only_mode_admits_nsfw_posts_exclusively() {
        let filter = NsfwFilter { mode: NsfwMode::Only };
        assert!(filter.evaluate(&post(true)).unwrap());
        assert!(!filter.evaluate(&post(false)).unwrap());
    }
}
