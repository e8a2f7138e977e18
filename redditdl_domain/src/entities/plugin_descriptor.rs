// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `PluginDescriptor` / `PluginRiskLevel` (spec.md §4.4 plugin manager).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginRiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for PluginRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PluginRiskLevel::Low => "low",
            PluginRiskLevel::Medium => "medium",
            PluginRiskLevel::High => "high",
            PluginRiskLevel::Critical => "critical",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub version: String,
    pub entry_point: String,
    pub risk_level: PluginRiskLevel,
    pub risk_findings: Vec<String>,
    pub enabled: bool,
}

impl PluginDescriptor {
    /// Plugins at `Critical` risk are never auto-enabled, regardless of
    /// the caller's requested `enabled` flag (spec.md §4.4 security gating).
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        entry_point: impl Into<String>,
        risk_level: PluginRiskLevel,
    ) -> Self {
        let enabled = risk_level != PluginRiskLevel::Critical;
        Self {
            name: name.into(),
            version: version.into(),
            entry_point: entry_point.into(),
            risk_level,
            risk_findings: Vec::new(),
            enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_risk_plugins_are_not_auto_enabled() {
        let plugin = PluginDescriptor::new("p", "1.0", "entry", PluginRiskLevel::Critical);
        assert!(!plugin.enabled);
    }

    #[test]
    fn low_risk_plugins_are_enabled_by_default() {
        let plugin = PluginDescriptor::new("p", "1.0", "entry", PluginRiskLevel::Low);
        assert!(plugin.enabled);
    }
}
