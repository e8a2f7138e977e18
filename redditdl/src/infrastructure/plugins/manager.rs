// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Plugin manager (spec.md §4.4): discovers external `ContentHandler`s,
//! scans them before load, and registers the allowed ones identically to
//! built-ins. Discovery here is an explicit call
//! (`PluginManager::register_candidate`) rather than directory scanning
//! with reflection, per spec.md §9's "explicit registration" redesign.

use std::sync::Arc;

use parking_lot::Mutex;
use redditdl_domain::entities::PluginDescriptor;
use redditdl_domain::repositories::ContentHandler;
use tracing::{info, warn};

use super::security_scan::{is_blocked, scan};

pub struct PluginManager {
    descriptors: Mutex<Vec<PluginDescriptor>>,
    handlers: Mutex<Vec<Arc<dyn ContentHandler>>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            descriptors: Mutex::new(Vec::new()),
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Scans `source` and, if it clears the risk gate, registers
    /// `handler` alongside the built-in handlers.
    pub fn register_candidate(
        &self,
        name: impl Into<String>,
        version: impl Into<String>,
        entry_point: impl Into<String>,
        source: &str,
        handler: Arc<dyn ContentHandler>,
    ) -> PluginDescriptor {
        let (risk, findings) = scan(source);
        let mut descriptor = PluginDescriptor::new(name, version, entry_point, risk);
        descriptor.risk_findings = findings.into_iter().map(|f| format!("{}: {}", f.risk, f.pattern)).collect();

        if is_blocked(risk) {
            descriptor.enabled = false;
            warn!(plugin = %descriptor.name, %risk, "plugin blocked by security scan");
        } else {
            info!(plugin = %descriptor.name, %risk, "plugin registered");
            self.handlers.lock().push(handler);
        }

        self.descriptors.lock().push(descriptor.clone());
        descriptor
    }

    pub fn handlers(&self) -> Vec<Arc<dyn ContentHandler>> {
        self.handlers.lock().clone()
    }

    pub fn descriptors(&self) -> Vec<PluginDescriptor> {
        self.descriptors.lock().clone()
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redditdl_domain::entities::{HandlerResult, PostRecord};
    use redditdl_domain::error::RedditdlError;
    use redditdl_domain::value_objects::ContentType;
    use std::time::Duration;

    struct NoopHandler;

    #[async_trait::async_trait]
    impl ContentHandler for NoopHandler {
        fn name(&self) -> &str {
            "noop"
        }
        fn priority(&self) -> i32 {
            100
        }
        fn supported_content_types(&self) -> &[ContentType] {
            &[ContentType::Text]
        }
        async fn process(&self, _post: &PostRecord) -> Result<HandlerResult, RedditdlError> {
            Ok(HandlerResult::ok(Duration::ZERO))
        }
    }

    #[test]
    fn high_risk_plugin_is_not_registered() {
        let manager = PluginManager::new();
        manager.register_candidate(
            "evil",
            "0.1",
            "entry",
            "std::process::Command::new(\"rm\")",
            Arc::new(NoopHandler),
        );
        assert!(manager.handlers().is_empty());
        assert_eq!(manager.descriptors().len(), 1);
        assert!(!manager.descriptors()[0].enabled);
    }

    #[test]
    fn low_risk_plugin_is_registered() {
        let manager = PluginManager::new();
        manager.register_candidate("ok", "0.1", "entry", "fn x() {}", Arc::new(NoopHandler));
        assert_eq!(manager.handlers().len(), 1);
    }
}
