// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `JsonExporter` (SPEC_FULL.md §4.9): writes `Context.posts` as a JSON
//! array under a stable `"posts"` key. `serde_json`'s struct field order
//! is declaration order, so repeated exports of the same data are
//! byte-identical (spec.md §8 R1).

use async_trait::async_trait;
use serde::Serialize;
use tokio::fs;

use redditdl_domain::entities::PostRecord;
use redditdl_domain::error::RedditdlError;
use redditdl_domain::repositories::{ExportResult, Exporter, FormatInfo};

#[derive(Serialize)]
struct JsonExport<'a> {
    posts: &'a [PostRecord],
}

pub struct JsonExporter;

#[async_trait]
impl Exporter for JsonExporter {
    fn format_info(&self) -> FormatInfo {
        FormatInfo {
            format_name: "json".to_string(),
            file_extension: ".json".to_string(),
            supports_append: false,
        }
    }

    async fn export(&self, posts: &[PostRecord], destination: &str) -> Result<ExportResult, RedditdlError> {
        let payload = JsonExport { posts };
        let bytes = serde_json::to_vec_pretty(&payload)?;
        fs::write(destination, &bytes).await?;
        Ok(ExportResult {
            records_written: posts.len(),
            output_path: destination.to_string(),
            bytes_written: bytes.len() as u64,
        })
    }
}
