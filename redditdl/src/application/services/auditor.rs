// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Process-wide auditor and suspicious-activity detector (spec.md §4.7).
//! Keeps a sliding window of recent `SecurityEvent`s and raises
//! higher-severity verdicts when recognizable attack patterns appear.

use std::collections::{HashSet, VecDeque};

use parking_lot::Mutex;
use redditdl_domain::entities::{DetectorVerdict, SecurityEvent, SecuritySeverity};

const WINDOW_SIZE: usize = 100;
const WINDOW_SECONDS: i64 = 300;
const SAME_KEY_FAILURE_THRESHOLD: usize = 5;
const ACCESS_DENIED_THRESHOLD: usize = 5;
const DISTINCT_RESOURCE_THRESHOLD: usize = 15;
const DEFAULT_RATE_THRESHOLD: usize = 10;

#[derive(Debug, Clone)]
struct AuditRecord {
    category: String,
    key: String,
    resource: Option<String>,
    severity: SecuritySeverity,
    timestamp_epoch: i64,
}

pub struct Auditor {
    window: Mutex<VecDeque<AuditRecord>>,
}

impl Auditor {
    pub fn new() -> Self {
        Self {
            window: Mutex::new(VecDeque::with_capacity(WINDOW_SIZE)),
        }
    }

    /// Records one event (auth success/failure, file op, config op,
    /// plugin op, validation failure, rate-limit hit) and returns the
    /// detector's current verdict over the trimmed window.
    pub fn record(
        &self,
        category: &str,
        key: &str,
        resource: Option<&str>,
        severity: SecuritySeverity,
        now_epoch: i64,
    ) -> DetectorVerdict {
        let mut window = self.window.lock();
        window.push_back(AuditRecord {
            category: category.to_string(),
            key: key.to_string(),
            resource: resource.map(str::to_string),
            severity,
            timestamp_epoch: now_epoch,
        });
        while window.len() > WINDOW_SIZE {
            window.pop_front();
        }
        while window.front().is_some_and(|r| now_epoch - r.timestamp_epoch > WINDOW_SECONDS) {
            window.pop_front();
        }

        self.evaluate(&window, now_epoch)
    }

    fn evaluate(&self, window: &VecDeque<AuditRecord>, now_epoch: i64) -> DetectorVerdict {
        let mut reasons = Vec::new();
        let mut events = Vec::new();

        let key_counts = count_by(window.iter().map(|r| r.key.as_str()));
        if let Some((key, count)) = key_counts.into_iter().find(|(_, count)| *count >= SAME_KEY_FAILURE_THRESHOLD) {
            reasons.push(format!("{count} failures recorded for key `{key}`"));
            events.push(SecurityEvent::new(
                SecuritySeverity::Warning,
                "repeated_failure",
                format!("{count} failures for key `{key}` in the last {WINDOW_SECONDS}s"),
                now_epoch,
            ));
        }

        let category_counts = count_by(window.iter().map(|r| r.category.as_str()));
        if let Some((category, count)) = category_counts
            .iter()
            .find(|(_, count)| *count > DEFAULT_RATE_THRESHOLD)
            .map(|(c, n)| (c.to_string(), *n))
        {
            reasons.push(format!("event rate for `{category}` exceeded threshold ({count} events)"));
            events.push(SecurityEvent::new(
                SecuritySeverity::Critical,
                "rate_exceeded",
                format!("{count} `{category}` events in the last {WINDOW_SECONDS}s"),
                now_epoch,
            ));
        }

        let access_denied = window.iter().filter(|r| r.category == "access_denied").count();
        if access_denied >= ACCESS_DENIED_THRESHOLD {
            reasons.push(format!("{access_denied} access-denied events (privilege-escalation pattern)"));
            events.push(SecurityEvent::new(
                SecuritySeverity::Critical,
                "access_denied_pattern",
                format!("{access_denied} access-denied events in the last {WINDOW_SECONDS}s"),
                now_epoch,
            ));
        }

        let distinct_resources: HashSet<&str> = window.iter().filter_map(|r| r.resource.as_deref()).collect();
        if distinct_resources.len() >= DISTINCT_RESOURCE_THRESHOLD {
            reasons.push(format!("{} distinct resources touched (scanning pattern)", distinct_resources.len()));
            events.push(SecurityEvent::new(
                SecuritySeverity::Warning,
                "scanning_pattern",
                format!("{} distinct resources touched in the last {WINDOW_SECONDS}s", distinct_resources.len()),
                now_epoch,
            ));
        }

        if reasons.is_empty() {
            DetectorVerdict::clean()
        } else {
            DetectorVerdict { suspicious: true, reasons, events }
        }
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}

fn count_by<'a>(items: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in items {
        if let Some(entry) = counts.iter_mut().find(|(k, _)| *k == item) {
            entry.1 += 1;
        } else {
            counts.push((item, 1));
        }
    }
    counts
}
