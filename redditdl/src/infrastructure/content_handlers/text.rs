// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `TextHandler` (SPEC_FULL.md §4.9): writes a self-post's body to a
//! sidecar text file under `output_dir`, no network access.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Instant;
use tokio::fs;

use redditdl_domain::entities::{HandlerResult, PostRecord};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::repositories::ContentHandler;
use redditdl_domain::value_objects::ContentType;

pub struct TextHandler {
    output_dir: PathBuf,
}

impl TextHandler {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl ContentHandler for TextHandler {
    fn name(&self) -> &str {
        "text"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn supported_content_types(&self) -> &[ContentType] {
        &[ContentType::Text]
    }

    async fn process(&self, post: &PostRecord) -> Result<HandlerResult, RedditdlError> {
        let start = Instant::now();
        fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(format!("{}.txt", post.id.as_str()));
        let body = format!("{}\n\n{}", post.title, post.selftext);
        fs::write(&path, body).await?;

        let mut result = HandlerResult::ok(start.elapsed());
        result.files_created.push(path.to_string_lossy().into_owned());
        result.operations_performed.push("write_sidecar".into());
        result.sidecar_created = true;
        Ok(result)
    }
}
