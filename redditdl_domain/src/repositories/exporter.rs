// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `Exporter` port (spec.md §4.1 export stage) and its registry
//! contract, used to write the final post set to a concrete sink.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::post_record::PostRecord;
use crate::error::RedditdlError;

/// Static capability description for one exporter, used by the CLI to
/// list available `--format` values and validate the one requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    pub format_name: String,
    pub file_extension: String,
    pub supports_append: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportResult {
    pub records_written: usize,
    pub output_path: String,
    pub bytes_written: u64,
}

#[async_trait]
pub trait Exporter: Send + Sync {
    fn format_info(&self) -> FormatInfo;

    async fn export(&self, posts: &[PostRecord], destination: &str) -> Result<ExportResult, RedditdlError>;
}
