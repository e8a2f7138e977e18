// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Static risk scan for plugin manifests (spec.md §4.4 "Plugins"): a
//! textual scan for disallowed patterns, producing a risk level and the
//! findings that drove it. No code execution is involved.

use redditdl_domain::entities::PluginRiskLevel;

/// Patterns that bump a plugin's risk level, grouped by the severity they
/// contribute. Mirrors spec.md's "disallowed imports/calls" list: process
/// execution, dynamic evaluation, reflection abuse, network bypass.
const CRITICAL_PATTERNS: &[&str] = &["std::process::Command", "subprocess", "exec(", "eval("];
const HIGH_PATTERNS: &[&str] = &["unsafe ", "std::mem::transmute", "libloading"];
const MEDIUM_PATTERNS: &[&str] = &["reqwest::", "std::net::"];

pub struct ScanFinding {
    pub pattern: String,
    pub risk: PluginRiskLevel,
}

/// Scans plugin source text (or manifest-declared capability list) for
/// disallowed patterns and returns the highest risk level found plus
/// every matching finding.
pub fn scan(source: &str) -> (PluginRiskLevel, Vec<ScanFinding>) {
    let mut findings = Vec::new();
    let mut highest = PluginRiskLevel::Low;

    for pattern in CRITICAL_PATTERNS {
        if source.contains(pattern) {
            findings.push(ScanFinding {
                pattern: (*pattern).to_string(),
                risk: PluginRiskLevel::Critical,
            });
            highest = PluginRiskLevel::Critical;
        }
    }
    for pattern in HIGH_PATTERNS {
        if source.contains(pattern) {
            findings.push(ScanFinding {
                pattern: (*pattern).to_string(),
                risk: PluginRiskLevel::High,
            });
            if highest < PluginRiskLevel::High {
                highest = PluginRiskLevel::High;
            }
        }
    }
    for pattern in MEDIUM_PATTERNS {
        if source.contains(pattern) {
            findings.push(ScanFinding {
                pattern: (*pattern).to_string(),
                risk: PluginRiskLevel::Medium,
            });
            if highest < PluginRiskLevel::Medium {
                highest = PluginRiskLevel::Medium;
            }
        }
    }

    (highest, findings)
}

/// `high` and above are blocked from loading (spec.md §4.4).
pub fn is_blocked(risk: PluginRiskLevel) -> bool {
    risk >= PluginRiskLevel::High
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_source_is_low_risk() {
        let (risk, findings) = scan("fn process() { 1 + 1; }");
        assert_eq!(risk, PluginRiskLevel::Low);
        assert!(findings.is_empty());
    }

    #[test]
    fn process_spawn_is_critical_and_blocked() {
        let (risk, _) = scan("std::process::Command::new(\"rm\")");
        assert_eq!(risk, PluginRiskLevel::Critical);
        assert!(is_blocked(risk));
    }

    #[test]
    fn medium_risk_is_not_blocked() {
        let (risk, _) = scan("reqwest::get(url)");
        assert_eq!(risk, PluginRiskLevel::Medium);
        assert!(!is_blocked(risk));
    }
}
