// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `CsvExporter` (SPEC_FULL.md §4.9): header + one row per post, column
//! order fixed so repeated exports are row-identical (spec.md §8 R1).

use async_trait::async_trait;

use redditdl_domain::entities::PostRecord;
use redditdl_domain::error::RedditdlError;
use redditdl_domain::repositories::{ExportResult, Exporter, FormatInfo};

const HEADER: &[&str] = &[
    "id", "title", "author", "source_group", "permalink", "url", "media_url", "created_at_iso", "score",
    "comment_count", "domain", "post_type", "is_nsfw",
];

pub struct CsvExporter;

#[async_trait]
impl Exporter for CsvExporter {
    fn format_info(&self) -> FormatInfo {
        FormatInfo {
            format_name: "csv".to_string(),
            file_extension: ".csv".to_string(),
            supports_append: true,
        }
    }

    async fn export(&self, posts: &[PostRecord], destination: &str) -> Result<ExportResult, RedditdlError> {
        let mut writer = csv::WriterBuilder::new()
            .from_path(destination)
            .map_err(|e| RedditdlError::filesystem(e.to_string(), Default::default()))?;

        writer
            .write_record(HEADER)
            .map_err(|e| RedditdlError::filesystem(e.to_string(), Default::default()))?;

        for post in posts {
            writer
                .write_record([
                    post.id.as_str(),
                    &post.title,
                    &post.author,
                    &post.source_group,
                    &post.permalink,
                    &post.url,
                    post.media_url().unwrap_or(""),
                    &post.created_at_iso,
                    &post.score.to_string(),
                    &post.comment_count.to_string(),
                    &post.domain,
                    &post.post_type,
                    &post.flags.is_nsfw.to_string(),
                ])
                .map_err(|e| RedditdlError::filesystem(e.to_string(), Default::default()))?;
        }

        writer
            .flush()
            .map_err(|e| RedditdlError::filesystem(e.to_string(), Default::default()))?;

        let bytes_written = std::fs::metadata(destination).map(|m| m.len()).unwrap_or(0);
        Ok(ExportResult {
            records_written: posts.len(),
            output_path: destination.to_string(),
            bytes_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::value_objects::PostId;
    use tempfile::tempdir;

    #[tokio::test]
    async fn exporting_writes_header_plus_one_row_per_post() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let posts = vec![PostRecord::new(
            PostId::new("p1").unwrap(),
            "title",
            "alice",
            "rust",
            "/perm",
            "https://example.com",
            0,
            "example.com",
            "link",
        )];

        let exporter = CsvExporter;
        let result = exporter.export(&posts, path.to_str().unwrap()).await.unwrap();
        assert_eq!(result.records_written, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
