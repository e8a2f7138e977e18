// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Filter Chain (spec.md §4.3): composes `Filter`s with AND/OR semantics
//! and records a `FilterDecision` per post. A filter that errors is
//! treated as an uncertain pass (safe failure), with a warning.

use std::time::Instant;

use redditdl_domain::entities::PostRecord;
use redditdl_domain::value_objects::{FilterDecision, PostId};

use crate::infrastructure::config::FilterComposition;

use super::filter::Filter;

pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
    composition: FilterComposition,
}

pub struct FilterOutcome {
    pub passed: bool,
    pub decision: FilterDecision,
    pub warnings: Vec<String>,
}

impl FilterChain {
    pub fn new(filters: Vec<Box<dyn Filter>>, composition: FilterComposition) -> Self {
        Self { filters, composition }
    }

    pub fn validate_config(&self) -> Vec<String> {
        self.filters.iter().flat_map(|f| f.validate_config()).collect()
    }

    /// Evaluates every filter for `post` and folds the results per the
    /// chain's composition tag. An empty chain passes everything
    /// (spec.md §4.3 "Composition").
    pub fn evaluate(&self, post: &PostRecord, post_id: PostId) -> FilterOutcome {
        let start = Instant::now();
        let mut warnings = Vec::new();
        let mut results = Vec::with_capacity(self.filters.len());
        let mut failing_reasons = Vec::new();
        let mut passing_reasons = Vec::new();

        for filter in &self.filters {
            match filter.evaluate(post) {
                Ok(result) => {
                    results.push(result);
                    if result {
                        passing_reasons.push(filter.name());
                    } else {
                        failing_reasons.push(filter.name());
                    }
                }
                Err(error) => {
                    warnings.push(format!("{} filter failed, admitting post by default: {error}", filter.name()));
                    results.push(true);
                    passing_reasons.push(filter.name());
                }
            }
        }

        let passed = if self.filters.is_empty() {
            true
        } else {
            match self.composition {
                FilterComposition::And => results.iter().all(|r| *r),
                FilterComposition::Or => results.iter().any(|r| *r),
            }
        };

        let reason = if passed {
            format!("passed: {}", passing_reasons.join(","))
        } else {
            format!("rejected by: {}", failing_reasons.join(","))
        };

        FilterOutcome {
            passed,
            decision: FilterDecision::new(post_id, passed, reason, start.elapsed()),
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::value_objects::PostId;

    struct Always(bool);
    impl Filter for Always {
        fn name(&self) -> &'static str {
            "always"
        }
        fn validate_config(&self) -> Vec<String> {
            Vec::new()
        }
        fn evaluate(&self, _post: &PostRecord) -> Result<bool, String> {
            Ok(self.0)
        }
    }

    struct AlwaysErrors;
    impl Filter for AlwaysErrors {
        fn name(&self) -> &'static str {
            "flaky"
        }
        fn validate_config(&self) -> Vec<String> {
            Vec::new()
        }
        fn evaluate(&self, _post: &PostRecord) -> Result<bool, String> {
            Err("boom".to_string())
        }
    }

    fn sample_post() -> PostRecord {
        PostRecord::new(
            PostId::new("t3_1").unwrap(),
            "t",
            "a",
            "g",
            "/p",
            "https://example.com",
            0,
            "example.com",
            "link",
        )
    }

    #[test]
    fn and_composition_requires_every_filter_to_pass() {
        let chain = FilterChain::new(vec![Box::new(Always(true)), Box::new(Always(false))], FilterComposition::And);
        let outcome = chain.evaluate(&sample_post(), PostId::new("t3_1").unwrap());
        assert!(!outcome.passed);
    }

    #[test]
    fn or_composition_passes_if_any_filter_passes() {
        let chain = FilterChain::new(vec![Box::new(Always(true)), Box::new(Always(false))], FilterComposition::Or);
        let outcome = chain.evaluate(&sample_post(), PostId::new("t3_1").unwrap());
        assert!(outcome.passed);
    }

    #[test]
    fn empty_chain_passes_everything() {
        let chain = FilterChain::new(vec![], FilterComposition::And);
        let outcome = chain.evaluate(&sample_post(), PostId::new("t3_1").unwrap());
        assert!(outcome.passed);
    }

    #[test]
    fn a_failing_filter_admits_the_post_with_a_warning() {
        let chain = FilterChain::new(vec![Box::new(AlwaysErrors)], FilterComposition::And);
        let outcome = chain.evaluate(&sample_post(), PostId::new("t3_1").unwrap());
        assert!(outcome.passed);
        assert_eq!(outcome.warnings.len(), 1);
    }
}
