// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use redditdl_domain::entities::PostRecord;

use crate::application::services::filter::Filter;

/// `min ≤ post.score ≤ max`; an unset bound is ignored (spec.md §4.3).
pub struct ScoreFilter {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Filter for ScoreFilter {
    fn name(&self) -> &'static str {
        "score"
    }

    fn validate_config(&self) -> Vec<String> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => vec!["score filter: min exceeds max".to_string()],
            _ => Vec::new(),
        }
    }

    fn evaluate(&self, post: &PostRecord) -> Result<bool, String> {
        let above_min = self.min.is_none_or(|min| post.score >= min);
        let below_max = self.max.is_none_or(|max| post.score <= max);
        Ok(above_min && below_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::value_objects::PostId;

    fn post_with_score(score: i64) -> PostRecord {
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
        post.score = score;
        post
    }

    #[test]
    fn rejects_below_minimum() {
        let filter = ScoreFilter { min: Some(10), max: None };
        assert!(!filter.evaluate(&post_with_score(5)).unwrap());
    }

    #[test]
    fn unset_bounds_are_ignored() {
        let filter = ScoreFilter { min: None, max: None };
        assert!(filter.evaluate(&post_with_score(-100)).unwrap());
    }
}
