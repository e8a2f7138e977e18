// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `HandlerResult` (spec.md §4.4): what a `ContentHandler::process` call
//! returns for a single post.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerResult {
    pub success: bool,
    pub files_created: Vec<String>,
    pub operations_performed: Vec<String>,
    pub embedded_metadata: bool,
    pub sidecar_created: bool,
    #[serde(with = "crate::entities::duration_millis")]
    pub duration: Duration,
    pub error: Option<String>,
}

impl HandlerResult {
    pub fn ok(duration: Duration) -> Self {
        Self {
            success: true,
            files_created: Vec::new(),
            operations_performed: Vec::new(),
            embedded_metadata: false,
            sidecar_created: false,
            duration,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>, duration: Duration) -> Self {
        Self {
            success: false,
            files_created: Vec::new(),
            operations_performed: Vec::new(),
            embedded_metadata: false,
            sidecar_created: false,
            duration,
            error: Some(error.into()),
        }
    }
}
