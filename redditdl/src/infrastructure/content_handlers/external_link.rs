// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `ExternalLinkHandler` (SPEC_FULL.md §4.9): writes a marker file
//! recording the external URL instead of following it.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Instant;
use tokio::fs;

use redditdl_domain::entities::{HandlerResult, PostRecord};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::repositories::ContentHandler;
use redditdl_domain::value_objects::ContentType;

pub struct ExternalLinkHandler {
    output_dir: PathBuf,
}

impl ExternalLinkHandler {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ContentHandler for ExternalLinkHandler {
    fn name(&self) -> &str {
        "external_link"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn supported_content_types(&self) -> &[ContentType] {
        &[ContentType::External, ContentType::Crosspost]
    }

    async fn process(&self, post: &PostRecord) -> Result<HandlerResult, RedditdlError> {
        let start = Instant::now();
        fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(format!("{}.url", post.id.as_str()));
        let target = post.media_url().unwrap_or(&post.url).to_string();
        fs::write(&path, format!("[InternetShortcut]\nURL={target}\n")).await?;

        let mut result = HandlerResult::ok(start.elapsed());
        result.files_created.push(path.to_string_lossy().into_owned());
        result.operations_performed.push("write_marker".into());
        Ok(result)
    }
}
