// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use redditdl_domain::entities::PostRecord;

use crate::application::services::filter::{classify, Filter};

/// Post's inferred type and URL extension must satisfy both the
/// allow/block type sets and the allow/block extension sets (spec.md
/// §4.3).
pub struct MediaTypeFilter {
    pub allow_types: Vec<String>,
    pub block_types: Vec<String>,
    pub allow_extensions: Vec<String>,
    pub block_extensions: Vec<String>,
}

fn extension_of(url: &str) -> Option<String> {
    url.rsplit('/').next()?.rsplit('.').next().map(|ext| format!(".{}", ext.to_ascii_lowercase()))
}

impl Filter for MediaTypeFilter {
    fn name(&self) -> &'static str {
        "media_type"
    }

    fn validate_config(&self) -> Vec<String> {
        Vec::new()
    }

    fn evaluate(&self, post: &PostRecord) -> Result<bool, String> {
        let content_type = classify(post).as_str();

        let type_allowed =
            self.allow_types.is_empty() || self.allow_types.iter().any(|t| t.eq_ignore_ascii_case(content_type));
        let type_blocked = self.block_types.iter().any(|t| t.eq_ignore_ascii_case(content_type));

        let url = post.media_url().unwrap_or(&post.url);
        let extension = extension_of(url);

        let extension_allowed = self.allow_extensions.is_empty()
            || extension.as_deref().is_some_and(|ext| self.allow_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        let extension_blocked =
            extension.as_deref().is_some_and(|ext| self.block_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));

        Ok(type_allowed && !type_blocked && extension_allowed && !extension_blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::value_objects::PostId;

    fn image_post() -> PostRecord {
        PostRecord::new(
            PostId::new("t3_1").unwrap(),
            "t",
            "a",
            "g",
            "/p",
            "https://i.redd.it/photo.jpg",
            0,
            "i.redd.it",
            "image",
        )
    }

    #[test]
    fn blocked_extension_rejects_even_if_type_allowed() {
        let filter = MediaTypeFilter {
            allow_types: vec!["image".into()],
            block_types: vec![],
            allow_extensions: vec![],
            block_extensions: vec![".jpg".into()],
        };
        assert!(!filter.evaluate(&image_post()).unwrap());
    }

    #[test]
    fn unset_lists_admit_everything() {
        let filter = MediaTypeFilter {
            allow_types: vec![],
            block_types: vec![],
            allow_extensions: vec![],
            block_extensions: vec![],
        };
        assert!(filter.evaluate(&image_post()).unwrap());
    }
}
