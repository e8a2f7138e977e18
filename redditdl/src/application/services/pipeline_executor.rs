// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Pipeline Executor (spec.md §4.1): drives an ordered `Stage` list
//! through `Context`, applying the configured error-handling policy and
//! emitting lifecycle events.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::warn;

use redditdl_domain::entities::{Context, ExecutionMetrics, StageResult};
use redditdl_domain::error::{ErrorContext, RedditdlError};
use redditdl_domain::events::{Event, EventType};
use redditdl_domain::services::Stage;

use crate::infrastructure::config::ErrorHandlingPolicy;

use super::recovery::{RecoveryManager, RecoveryStrategy};

/// A synchronous pre/post-execution hook. Failures are logged, never
/// abort the run (spec.md §4.1 "Hooks").
pub trait ExecutorHook: Send + Sync {
    fn name(&self) -> &str;
    fn call(&self, context: &Context) -> Result<(), RedditdlError>;
}

pub struct PipelineExecutor {
    stages: Vec<Box<dyn Stage>>,
    pre_hooks: Vec<Box<dyn ExecutorHook>>,
    post_hooks: Vec<Box<dyn ExecutorHook>>,
    recovery: RecoveryManager,
    error_handling: ErrorHandlingPolicy,
    running: AtomicBool,
}

impl PipelineExecutor {
    pub fn new(stages: Vec<Box<dyn Stage>>, error_handling: ErrorHandlingPolicy) -> Self {
        Self {
            stages,
            pre_hooks: Vec::new(),
            post_hooks: Vec::new(),
            recovery: RecoveryManager::new(),
            error_handling,
            running: AtomicBool::new(false),
        }
    }

    pub fn with_pre_hook(mut self, hook: Box<dyn ExecutorHook>) -> Self {
        self.pre_hooks.push(hook);
        self
    }

    pub fn with_post_hook(mut self, hook: Box<dyn ExecutorHook>) -> Self {
        self.post_hooks.push(hook);
        self
    }

    pub fn add_stage(&mut self, stage: Box<dyn Stage>, position: Option<usize>) {
        match position {
            Some(index) if index <= self.stages.len() => self.stages.insert(index, stage),
            _ => self.stages.push(stage),
        }
    }

    pub fn remove_stage(&mut self, name: &str) {
        self.stages.retain(|s| s.name() != name);
    }

    pub fn reorder(&mut self, names: &[&str]) {
        let mut reordered = Vec::with_capacity(self.stages.len());
        for name in names {
            if let Some(index) = self.stages.iter().position(|s| s.name() == *name) {
                reordered.push(self.stages.remove(index));
            }
        }
        reordered.extend(self.stages.drain(..));
        self.stages = reordered;
    }

    /// Runs the full execution algorithm (spec.md §4.1 steps 1-5).
    pub async fn execute(&self, context: &mut Context, now_epoch: i64) -> Result<ExecutionMetrics, RedditdlError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(RedditdlError::configuration(
                "pipeline executor is already running",
                ErrorContext::new("pipeline_executor.execute"),
            ));
        }
        let guard = scopeguard(&self.running);

        self.run_hooks(&self.pre_hooks, context);

        if let Some(error) = self.validate_all_stages(context) {
            drop(guard);
            return Err(error);
        }

        let mut metrics = ExecutionMetrics::default();

        for stage in &self.stages {
            let name = stage.name().to_string();
            let _ = context.event_bus().emit(Event::new(
                now_epoch,
                context.session_id,
                EventType::StageStarted { name: name.clone(), config: context.config.clone() },
            ));

            if let Err(error) = stage.pre_process(context).await {
                warn!(stage = %name, error = %error.message, "pre_process failed, continuing");
            }

            let start = Instant::now();
            let mut outcome = stage.process(context).await;

            if let Err(error) = &outcome {
                let wrapped = RedditdlError::processing(error.message.clone(), error.context.clone().with_stage(name.clone()));
                let recovery = self.recovery.recover(&wrapped);
                if recovery.strategy_used == RecoveryStrategy::Retry {
                    outcome = stage.process(context).await;
                }
            }

            let duration = start.elapsed();

            match outcome {
                Ok(result) => {
                    if result.skipped {
                        metrics.skipped_stages += 1;
                    } else {
                        metrics.record_stage(result.success());
                    }
                    record_post_counts(&mut metrics, &name, &result, context);
                    let _ = stage.post_process(context, &result).await;
                    let event = if result.success() {
                        EventType::StageCompleted {
                            name: name.clone(),
                            duration_ms: duration.as_millis() as u64,
                            processed: result.processed_count,
                            succeeded: result.processed_count.saturating_sub(result.error_count),
                            failed: result.error_count,
                            data: result.data.clone(),
                        }
                    } else {
                        EventType::StageFailed {
                            name: name.clone(),
                            duration_ms: duration.as_millis() as u64,
                            error: result.errors.join("; "),
                            error_code: redditdl_domain::error::ErrorKind::Processing.code(),
                            config: context.config.clone(),
                        }
                    };
                    let _ = context.event_bus().emit(Event::new(now_epoch, context.session_id, event));
                    context.record_stage_result(result.clone());

                    if !result.success() {
                        match self.error_handling {
                            ErrorHandlingPolicy::Halt => {
                                drop(guard);
                                return Err(RedditdlError::processing(
                                    format!("stage `{name}` failed: {}", result.errors.join("; ")),
                                    ErrorContext::new("pipeline_executor.execute").with_stage(name),
                                ));
                            }
                            ErrorHandlingPolicy::Continue => continue,
                            ErrorHandlingPolicy::Skip => break,
                        }
                    }
                }
                Err(error) => {
                    let failed_result = StageResult {
                        stage_name: name.clone(),
                        processed_count: 0,
                        error_count: 1,
                        errors: vec![error.message.clone()],
                        warnings: Vec::new(),
                        data: Default::default(),
                        duration,
                        partial_success: false,
                        skipped: false,
                    };
                    metrics.record_stage(false);
                    context.record_stage_result(failed_result);
                    let _ = context.event_bus().emit(Event::new(
                        now_epoch,
                        context.session_id,
                        EventType::StageFailed {
                            name: name.clone(),
                            duration_ms: duration.as_millis() as u64,
                            error: error.message.clone(),
                            error_code: error.kind.code(),
                            config: context.config.clone(),
                        },
                    ));

                    match self.error_handling {
                        ErrorHandlingPolicy::Halt => {
                            drop(guard);
                            return Err(error);
                        }
                        ErrorHandlingPolicy::Continue => continue,
                        ErrorHandlingPolicy::Skip => break,
                    }
                }
            }
        }

        self.run_hooks(&self.post_hooks, context);
        drop(guard);
        Ok(metrics)
    }

    fn validate_all_stages(&self, context: &Context) -> Option<RedditdlError> {
        let mut names = HashSet::new();
        for stage in &self.stages {
            if !names.insert(stage.name().to_string()) {
                return Some(RedditdlError::configuration(
                    format!("duplicate stage name `{}`", stage.name()),
                    ErrorContext::new("pipeline_executor.validate"),
                ));
            }
        }

        let mut errors = Vec::new();
        for stage in &self.stages {
            errors.extend(stage.validate_config(context));
        }

        if errors.is_empty() {
            None
        } else {
            let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            Some(RedditdlError::configuration(messages.join("; "), ErrorContext::new("pipeline_executor.validate")))
        }
    }

    fn run_hooks(&self, hooks: &[Box<dyn ExecutorHook>], context: &Context) {
        for hook in hooks {
            if let Err(error) = hook.call(context) {
                warn!(hook = hook.name(), error = %error.message, "executor hook failed, continuing");
            }
        }
    }
}

/// Surfaces per-post counts onto `ExecutionMetrics` by recognizing the
/// well-known stage names (spec.md §4.1 stage list), so the CLI's run
/// summary reflects more than just pass/fail stage counts.
fn record_post_counts(metrics: &mut ExecutionMetrics, stage_name: &str, result: &StageResult, context: &Context) {
    match stage_name {
        "acquisition" => metrics.posts_discovered = context.posts.len(),
        "filter" => {
            if let Some(filtered_out) = result.data.get("filtered_out").and_then(|v| v.as_u64()) {
                metrics.posts_filtered_out = filtered_out as usize;
            }
        }
        "processing" => {
            if !result.skipped {
                metrics.posts_processed = result.processed_count;
            }
        }
        "export" => metrics.posts_exported = context.posts.len(),
        _ => {}
    }
}

/// Clears the re-entry guard when execution ends, including on early
/// returns.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn scopeguard(flag: &AtomicBool) -> RunningGuard<'_> {
    RunningGuard(flag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use redditdl_domain::value_objects::SessionId;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::infrastructure::event_bus::TokioEventBus;
    use crate::infrastructure::state_store::InMemoryStateStore;

    struct AlwaysSucceeds;
    #[async_trait]
    impl Stage for AlwaysSucceeds {
        fn name(&self) -> &str {
            "always_succeeds"
        }
        fn validate_config(&self, _context: &Context) -> Vec<RedditdlError> {
            Vec::new()
        }
        async fn process(&self, _context: &mut Context) -> Result<StageResult, RedditdlError> {
            Ok(StageResult {
                stage_name: "always_succeeds".to_string(),
                processed_count: 1,
                error_count: 0,
                errors: Vec::new(),
                warnings: Vec::new(),
                data: Default::default(),
                duration: Duration::ZERO,
                partial_success: false,
                skipped: false,
            })
        }
    }

    struct AlwaysFails;
    #[async_trait]
    impl Stage for AlwaysFails {
        fn name(&self) -> &str {
            "always_fails"
        }
        fn validate_config(&self, _context: &Context) -> Vec<RedditdlError> {
            Vec::new()
        }
        async fn process(&self, _context: &mut Context) -> Result<StageResult, RedditdlError> {
            Err(RedditdlError::processing("boom", ErrorContext::new("test")))
        }
    }

    fn fresh_context() -> Context {
        Context::new(
            SessionId::new(),
            Vec::new(),
            Default::default(),
            Arc::new(InMemoryStateStore::new()),
            Arc::new(TokioEventBus::new()),
        )
    }

    #[tokio::test]
    async fn halt_policy_stops_on_first_failure() {
        let executor = PipelineExecutor::new(vec![Box::new(AlwaysFails), Box::new(AlwaysSucceeds)], ErrorHandlingPolicy::Halt);
        let mut context = fresh_context();
        let result = executor.execute(&mut context, 0).await;
        assert!(result.is_err());
        assert!(context.stage_result("always_succeeds").is_none());
    }

    #[tokio::test]
    async fn continue_policy_runs_every_stage() {
        let executor = PipelineExecutor::new(vec![Box::new(AlwaysFails), Box::new(AlwaysSucceeds)], ErrorHandlingPolicy::Continue);
        let mut context = fresh_context();
        let metrics = executor.execute(&mut context, 0).await.unwrap();
        assert_eq!(metrics.failed_stages, 1);
        assert_eq!(metrics.successful_stages, 1);
        assert!(context.stage_result("always_succeeds").is_some());
    }

    #[tokio::test]
    async fn duplicate_stage_names_abort_before_any_stage_runs() {
        let executor = PipelineExecutor::new(vec![Box::new(AlwaysSucceeds), Box::new(AlwaysSucceeds)], ErrorHandlingPolicy::Continue);
        let mut context = fresh_context();
        let result = executor.execute(&mut context, 0).await;
        assert!(result.is_err());
        assert!(context.stage_result("always_succeeds").is_none());
    }
}
