// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Post identifier value object.
//!
//! Upstream post ids are opaque platform-assigned strings (e.g. `t3_abc123`);
//! wrapping them keeps call sites from accidentally comparing a post id to
//! an unrelated string (a permalink, a username).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(String);

impl PostId {
    /// Fails if `id` is empty; every `PostRecord` must carry a non-empty id
    /// (spec.md §3 invariant, and the "missing id" boundary behavior in
    /// §8: a raw post with no id is rejected, not defaulted).
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("post id must not be empty".to_string());
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PostId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_id() {
        assert!(PostId::new("").is_err());
        assert!(PostId::new("   ").is_err());
    }

    #[test]
    fn accepts_non_empty_id() {
        let id = PostId::new("t3_abc123").unwrap();
        assert_eq!(id.as_str(), "t3_abc123");
    }
}
