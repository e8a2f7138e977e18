// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use redditdl_domain::entities::PostRecord;

use crate::application::services::filter::Filter;

/// `domain ∈ allow` (if non-empty) AND `domain ∉ block` (spec.md §4.3).
pub struct DomainFilter {
    pub allow: Vec<String>,
    pub block: Vec<String>,
}

impl Filter for DomainFilter {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn validate_config(&self) -> Vec<String> {
        Vec::new()
    }

    fn evaluate(&self, post: &PostRecord) -> Result<bool, String> {
        let domain = post.domain.to_ascii_lowercase();
        let allowed = self.allow.is_empty() || self.allow.iter().any(|d| d.eq_ignore_ascii_case(&domain));
        let blocked = self.block.iter().any(|d| d.eq_ignore_ascii_case(&domain));
        Ok(allowed && !blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::value_objects::PostId;

    fn post_from(domain: &str) -> PostRecord {
        PostRecord::new(
            PostId::new("t3_1").unwrap(),
            "t",
            "a",
            "g",
            "/p",
            "https://example.com",
            0,
            domain,
            "link",
        )
    }

    #[test]
    fn empty_allow_list_admits_everything_not_blocked() {
        let filter = DomainFilter {
            allow: vec![],
            block: vec!["spam.example".into()],
        };
        assert!(filter.evaluate(&post_from("example.com")).unwrap());
        assert!(!filter.evaluate(&post_from("spam.example")).unwrap());
    }

    #[test]
    fn non_empty_allow_list_rejects_unlisted_domains() {
        let filter = DomainFilter {
            allow: vec!["imgur.com".into()],
            block: vec![],
        };
        assert!(!filter.evaluate(&post_from("example.com")).unwrap());
    }
}
