// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Target resolution value objects (spec.md §3 `TargetInfo`, §4.2).
//!
//! Parsing raw target strings into a `TargetInfo` is the Acquisition
//! Engine's job (`redditdl::application::services::acquisition_engine`);
//! this module only defines the resolved shape and its invariants so the
//! rest of the core can depend on a validated value rather than a string.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Subreddit listing ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Listing {
    Hot,
    New,
    Top,
    Controversial,
    Rising,
}

impl Listing {
    /// Unknown listing strings default to `New` (spec.md §4.2).
    pub fn parse_or_default(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "hot" => Listing::Hot,
            "new" => Listing::New,
            "top" => Listing::Top,
            "controversial" => Listing::Controversial,
            "rising" => Listing::Rising,
            _ => Listing::New,
        }
    }

    /// `top`/`controversial` are the only listings that take a time period.
    pub fn requires_period(&self) -> bool {
        matches!(self, Listing::Top | Listing::Controversial)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Listing::Hot => "hot",
            Listing::New => "new",
            Listing::Top => "top",
            Listing::Controversial => "controversial",
            Listing::Rising => "rising",
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time scope for `top`/`controversial` listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    pub fn parse_or_default(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Period::Hour,
            "day" => Period::Day,
            "week" => Period::Week,
            "month" => Period::Month,
            "year" => Period::Year,
            "all" => Period::All,
            _ => Period::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Hour => "hour",
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The variant tag a raw target string resolves to (spec.md §3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    User {
        name: String,
    },
    Subreddit {
        name: String,
        listing: Listing,
        period: Option<Period>,
    },
    Saved,
    Upvoted,
    Url {
        url: String,
    },
    Unknown {
        raw: String,
    },
}

/// A resolved acquisition target.
///
/// `original_input` is preserved verbatim for diagnostics; `kind` is the
/// canonical, validated form the rest of the core consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    pub kind: TargetKind,
    pub original_input: String,
    pub metadata: HashMap<String, String>,
}

impl TargetInfo {
    pub fn new(kind: TargetKind, original_input: impl Into<String>) -> Self {
        Self {
            kind,
            original_input: original_input.into(),
            metadata: HashMap::new(),
        }
    }

    /// `saved`/`upvoted` require an authenticated scraper (spec.md §3, §4.2).
    pub fn requires_authentication(&self) -> bool {
        matches!(self.kind, TargetKind::Saved | TargetKind::Upvoted)
    }

    /// Renders the target back to the canonical string form a user could
    /// type to produce the same `TargetInfo` (spec.md §8 property R2).
    pub fn canonical(&self) -> String {
        match &self.kind {
            TargetKind::User { name } => format!("u/{name}"),
            TargetKind::Subreddit {
                name,
                listing,
                period,
            } => match period {
                Some(p) if listing.requires_period() => format!("r/{name}?listing={listing}&period={p}"),
                _ => format!("r/{name}?listing={listing}"),
            },
            TargetKind::Saved => "saved".to_string(),
            TargetKind::Upvoted => "upvoted".to_string(),
            TargetKind::Url { url } => url.clone(),
            TargetKind::Unknown { raw } => raw.clone(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            TargetKind::User { .. } => "user",
            TargetKind::Subreddit { .. } => "subreddit",
            TargetKind::Saved => "saved",
            TargetKind::Upvoted => "upvoted",
            TargetKind::Url { .. } => "url",
            TargetKind::Unknown { .. } => "unknown",
        }
    }
}

impl fmt::Display for TargetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_listing_defaults_to_new() {
        assert_eq!(Listing::parse_or_default("weekly-best"), Listing::New);
    }

    #[test]
    fn saved_and_upvoted_require_auth() {
        let saved = TargetInfo::new(TargetKind::Saved, "saved");
        let user = TargetInfo::new(TargetKind::User { name: "alice".into() }, "u/alice");
        assert!(saved.requires_authentication());
        assert!(!user.requires_authentication());
    }

    #[test]
    fn canonical_round_trip_subreddit_with_period() {
        let target = TargetInfo::new(
            TargetKind::Subreddit {
                name: "rust".into(),
                listing: Listing::Top,
                period: Some(Period::Week),
            },
            "r/rust",
        );
        assert_eq!(target.canonical(), "r/rust?listing=top&period=week");
    }
}
