// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Rate-limit class tags (spec.md §4.5) and their default tunables.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitClass {
    Api,
    Public,
    Downloads,
    Database,
}

impl RateLimitClass {
    pub const ALL: [RateLimitClass; 4] = [
        RateLimitClass::Api,
        RateLimitClass::Public,
        RateLimitClass::Downloads,
        RateLimitClass::Database,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitClass::Api => "api",
            RateLimitClass::Public => "public",
            RateLimitClass::Downloads => "downloads",
            RateLimitClass::Database => "database",
        }
    }

    /// Default tunables from spec.md §4.5's defaults table.
    pub fn defaults(&self) -> RateLimitDefaults {
        match self {
            RateLimitClass::Api => RateLimitDefaults {
                refill_rate: 1.4,
                burst: 3,
                max_concurrent: 5,
                base_backoff_factor: 2.0,
                max_backoff_secs: 30.0,
            },
            RateLimitClass::Public => RateLimitDefaults {
                refill_rate: 0.16,
                burst: 2,
                max_concurrent: 3,
                base_backoff_factor: 3.0,
                max_backoff_secs: 60.0,
            },
            RateLimitClass::Downloads => RateLimitDefaults {
                refill_rate: 2.0,
                burst: 10,
                max_concurrent: 15,
                base_backoff_factor: 1.5,
                max_backoff_secs: 20.0,
            },
            RateLimitClass::Database => RateLimitDefaults {
                refill_rate: 10.0,
                burst: 50,
                max_concurrent: 20,
                base_backoff_factor: 1.2,
                max_backoff_secs: 5.0,
            },
        }
    }
}

impl fmt::Display for RateLimitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tunable parameters for one rate-limit class's token bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitDefaults {
    pub refill_rate: f64,
    pub burst: u32,
    pub max_concurrent: usize,
    pub base_backoff_factor: f64,
    pub max_backoff_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_defaults_match_spec_table() {
        let d = RateLimitClass::Api.defaults();
        assert_eq!(d.refill_rate, 1.4);
        assert_eq!(d.burst, 3);
        assert_eq!(d.max_concurrent, 5);
    }
}
