// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The Export stage: resolves `export_formats` against the registered
//! `Exporter`s and writes one artifact per requested format
//! (spec.md §4.1 "Export stage", §6 filename template).

use std::sync::Arc;

use async_trait::async_trait;

use redditdl_domain::entities::{Context, StageResult};
use redditdl_domain::error::RedditdlError;
use redditdl_domain::repositories::Exporter;
use redditdl_domain::services::Stage;

pub struct ExportStage {
    exporters: Vec<Arc<dyn Exporter>>,
}

impl ExportStage {
    pub fn new(exporters: Vec<Arc<dyn Exporter>>) -> Self {
        Self { exporters }
    }

    fn find(&self, format: &str) -> Option<&Arc<dyn Exporter>> {
        self.exporters.iter().find(|exporter| exporter.format_info().format_name.eq_ignore_ascii_case(format))
    }
}

#[async_trait]
impl Stage for ExportStage {
    fn name(&self) -> &str {
        "export"
    }

    fn validate_config(&self, context: &Context) -> Vec<RedditdlError> {
        let formats = requested_formats(context);
        formats
            .iter()
            .filter(|format| self.find(format).is_none())
            .map(|format| {
                RedditdlError::configuration(
                    format!("no exporter registered for format `{format}`"),
                    redditdl_domain::error::ErrorContext::new("export.validate"),
                )
            })
            .collect()
    }

    async fn process(&self, context: &mut Context) -> Result<StageResult, RedditdlError> {
        let mut result = StageResult::new(self.name());
        let formats = requested_formats(context);
        let dir = export_dir(context);
        let prefix = export_prefix(context);
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");

        for format in formats {
            result.processed_count += 1;
            let Some(exporter) = self.find(&format) else {
                result.record_error(format!("no exporter registered for format `{format}`"));
                continue;
            };

            let extension = exporter.format_info().file_extension;
            let destination = format!("{dir}/{prefix}_{timestamp}{extension}");

            match exporter.export(&context.posts, &destination).await {
                Ok(export_result) => {
                    result.data.insert(
                        format!("export.{format}"),
                        serde_json::json!({
                            "records_written": export_result.records_written,
                            "output_path": export_result.output_path,
                            "bytes_written": export_result.bytes_written,
                        }),
                    );
                }
                Err(error) => result.record_error(format!("{format}: {}", error.message)),
            }
        }

        result.partial_success = result.error_count == 0;
        Ok(result)
    }
}

fn requested_formats(context: &Context) -> Vec<String> {
    context
        .config
        .get("export_formats")
        .and_then(|v| v.as_array())
        .map(|values| values.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

fn export_dir(context: &Context) -> String {
    context
        .config
        .get("export_dir")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .or_else(|| context.config.get("output_dir").and_then(|v| v.as_str()).map(str::to_string))
        .unwrap_or_else(|| "./downloads".to_string())
}

fn export_prefix(context: &Context) -> String {
    context
        .config
        .get("export_prefix")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| "redditdl_export".to_string())
}
