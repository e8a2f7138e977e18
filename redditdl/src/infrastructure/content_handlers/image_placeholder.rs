// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `ImagePlaceholderHandler` (SPEC_FULL.md §4.9): stands in for the real
//! image/video/gallery downloader. Writes a metadata sidecar recording
//! what would have been fetched, without performing network I/O.

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tokio::fs;

use redditdl_domain::entities::{HandlerResult, PostRecord};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::repositories::ContentHandler;
use redditdl_domain::value_objects::ContentType;

#[derive(Serialize)]
struct Sidecar<'a> {
    post_id: &'a str,
    media_url: Option<&'a str>,
    content_type: &'a str,
}

pub struct ImagePlaceholderHandler {
    output_dir: PathBuf,
}

impl ImagePlaceholderHandler {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ContentHandler for ImagePlaceholderHandler {
    fn name(&self) -> &str {
        "image_placeholder"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn supported_content_types(&self) -> &[ContentType] {
        &[ContentType::Image, ContentType::Video, ContentType::Gallery]
    }

    async fn process(&self, post: &PostRecord) -> Result<HandlerResult, RedditdlError> {
        let start = Instant::now();
        fs::create_dir_all(&self.output_dir).await?;
        let sidecar = Sidecar {
            post_id: post.id.as_str(),
            media_url: post.media_url(),
            content_type: "media",
        };
        let path = self.output_dir.join(format!("{}.metadata.json", post.id.as_str()));
        fs::write(&path, serde_json::to_vec_pretty(&sidecar)?).await?;

        let mut result = HandlerResult::ok(start.elapsed());
        result.files_created.push(path.to_string_lossy().into_owned());
        result.operations_performed.push("write_metadata_sidecar".into());
        result.embedded_metadata = true;
        result.sidecar_created = true;
        Ok(result)
    }
}
