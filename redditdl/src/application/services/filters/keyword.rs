// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use redditdl_domain::entities::PostRecord;
use regex::Regex;

use crate::application::services::filter::Filter;

/// All `include` terms present AND no `exclude` term present in
/// `title + selftext` (spec.md §4.3).
pub struct KeywordFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub case_sensitive: bool,
    pub regex: bool,
    pub whole_words: bool,
}

impl KeywordFilter {
    fn matches(&self, haystack: &str, term: &str) -> Result<bool, String> {
        if self.regex {
            let pattern = if self.whole_words { format!(r"\b{term}\b") } else { term.to_string() };
            let re = if self.case_sensitive {
                Regex::new(&pattern)
            } else {
                Regex::new(&format!("(?i){pattern}"))
            }
            .map_err(|e| format!("keyword filter: invalid regex `{term}`: {e}"))?;
            return Ok(re.is_match(haystack));
        }

        let (haystack, term) = if self.case_sensitive {
            (haystack.to_string(), term.to_string())
        } else {
            (haystack.to_ascii_lowercase(), term.to_ascii_lowercase())
        };

        if self.whole_words {
            Ok(haystack.split_whitespace().any(|word| word == term))
        } else {
            Ok(haystack.contains(&term))
        }
    }
}

impl Filter for KeywordFilter {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn validate_config(&self) -> Vec<String> {
        if !self.regex {
            return Vec::new();
        }
        self.include
            .iter()
            .chain(self.exclude.iter())
            .filter_map(|term| Regex::new(term).err().map(|e| format!("keyword filter: invalid regex `{term}`: {e}")))
            .collect()
    }

    fn evaluate(&self, post: &PostRecord) -> Result<bool, String> {
        let haystack = format!("{} {}", post.title, post.selftext);

        for term in &self.include {
            if !self.matches(&haystack, term)? {
                return Ok(false);
            }
        }
        for term in &self.exclude {
            if self.matches(&haystack, term)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::value_objects::PostId;

    fn post(title: &str, selftext: &str) -> PostRecord {
        let mut post = PostRecord::new(
            PostId::new("t3_1").unwrap(),
            title,
            "a",
            "g",
            "/p",
            "https://example.com",
            0,
            "example.com",
            "link",
        );
        post.selftext = selftext.to_string();
        post
    }

    #[test]
    fn requires_every_include_term() {
        let filter = KeywordFilter {
            include: vec!["rust".into(), "async".into()],
            exclude: vec![],
            case_sensitive: false,
            regex: false,
            whole_words: false,
        };
        assert!(filter.evaluate(&post("Rust async patterns", "")).unwrap());
        assert!(!filter.evaluate(&post("Rust sync patterns", "")).unwrap());
    }

    #[test]
    fn any_exclude_term_rejects() {
        let filter = KeywordFilter {
            include: vec![],
            exclude: vec!["spoiler".into()],
            case_sensitive: false,
            regex: false,
            whole_words: false,
        };
        assert!(!filter.evaluate(&post("Big spoiler inside", "")).unwrap());
    }
}
