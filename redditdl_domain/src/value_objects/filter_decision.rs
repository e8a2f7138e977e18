// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `FilterDecision` record (spec.md §3): recorded for every post on every
//! run and exported as debug metadata.

use crate::value_objects::post_id::PostId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDecision {
    pub post_id: PostId,
    pub passed: bool,
    pub reason: String,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl FilterDecision {
    pub fn new(post_id: PostId, passed: bool, reason: impl Into<String>, duration: Duration) -> Self {
        Self {
            post_id,
            passed,
            reason: reason.into(),
            duration,
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u128(d.as_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(d)?;
        Ok(Duration::from_millis(millis))
    }
}
