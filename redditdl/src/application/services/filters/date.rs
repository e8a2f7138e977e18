// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use chrono::DateTime;
use redditdl_domain::entities::PostRecord;

use crate::application::services::filter::Filter;

/// `from ≤ post.created_at ≤ to`, inclusive (spec.md §4.3). Bounds accept
/// either epoch seconds or an RFC 3339 timestamp.
pub struct DateFilter {
    pub from: Option<String>,
    pub to: Option<String>,
}

fn parse_bound(value: &str) -> Option<i64> {
    if let Ok(epoch) = value.parse::<i64>() {
        return Some(epoch);
    }
    DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.timestamp())
}

impl Filter for DateFilter {
    fn name(&self) -> &'static str {
        "date"
    }

    fn validate_config(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(from) = &self.from {
            if parse_bound(from).is_none() {
                errors.push(format!("date filter: unparseable `from` value `{from}`"));
            }
        }
        if let Some(to) = &self.to {
            if parse_bound(to).is_none() {
                errors.push(format!("date filter: unparseable `to` value `{to}`"));
            }
        }
        errors
    }

    fn evaluate(&self, post: &PostRecord) -> Result<bool, String> {
        let epoch = post.created_at_epoch;

        if let Some(from) = &self.from {
            let bound = parse_bound(from).ok_or_else(|| format!("unparseable from bound `{from}`"))?;
            if epoch < bound {
                return Ok(false);
            }
        }
        if let Some(to) = &self.to {
            let bound = parse_bound(to).ok_or_else(|| format!("unparseable to bound `{to}`"))?;
            if epoch > bound {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
