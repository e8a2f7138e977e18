// /////////////////////////////////////////////////////////////////////////////
// redditdl
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Adaptive worker pools for I/O-bound work, and a fixed pool for
//! CPU-bound work (spec.md §4.6).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Snapshot of one pool's state (spec.md §3 `PoolMetrics`).
#[derive(Debug, Clone, Copy)]
pub struct PoolMetrics {
    pub active_workers: usize,
    pub queued_tasks: usize,
    pub completed: u64,
    pub failed: u64,
    pub avg_task_millis: f64,
    pub last_scale: Option<Instant>,
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("pool queue is full")]
    QueueFull,
}

struct ScalingPolicy {
    min_workers: usize,
    max_workers: usize,
    scale_up_threshold: f64,
    scale_down_threshold: f64,
    scale_interval: Duration,
}

/// One adaptive pool: a semaphore-bounded worker count that scales
/// between `min` and `max` based on queue pressure (spec.md §4.6).
pub struct AdaptivePool {
    name: &'static str,
    policy: ScalingPolicy,
    workers: AtomicUsize,
    semaphore: Arc<Semaphore>,
    queued: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    total_task_millis: Mutex<f64>,
    last_scale: Mutex<Option<Instant>>,
}

impl AdaptivePool {
    pub fn new(name: &'static str, min_workers: usize, max_workers: usize) -> Self {
        Self {
            name,
            policy: ScalingPolicy {
                min_workers,
                max_workers,
                scale_up_threshold: 0.75,
                scale_down_threshold: 0.25,
                scale_interval: Duration::from_secs(5),
            },
            workers: AtomicUsize::new(min_workers),
            semaphore: Arc::new(Semaphore::new(max_workers)),
            queued: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            total_task_millis: Mutex::new(0.0),
            last_scale: Mutex::new(None),
        }
    }

    /// Submits a task, waiting for a worker slot up to a short grace
    /// period before failing with `QueueFull` (spec.md §4.6).
    pub async fn submit<F, T>(&self, task: F) -> Result<T, PoolError>
    where
        F: std::future::Future<Output = T>,
    {
        self.queued.fetch_add(1, Ordering::SeqCst);
        let permit = tokio::time::timeout(Duration::from_secs(5), self.semaphore.clone().acquire_owned())
            .await
            .map_err(|_| PoolError::QueueFull)
            .and_then(|r| r.map_err(|_| PoolError::QueueFull));
        self.queued.fetch_sub(1, Ordering::SeqCst);

        let _permit = permit?;
        let start = Instant::now();
        let result = task.await;
        let elapsed = start.elapsed();

        self.completed.fetch_add(1, Ordering::SeqCst);
        *self.total_task_millis.lock() += elapsed.as_secs_f64() * 1000.0;

        self.maybe_scale();
        Ok(result)
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn metrics(&self) -> PoolMetrics {
        let completed = self.completed.load(Ordering::SeqCst) as u64;
        let avg = if completed == 0 {
            0.0
        } else {
            *self.total_task_millis.lock() / completed as f64
        };
        PoolMetrics {
            active_workers: self.workers.load(Ordering::SeqCst),
            queued_tasks: self.queued.load(Ordering::SeqCst),
            completed,
            failed: self.failed.load(Ordering::SeqCst) as u64,
            avg_task_millis: avg,
            last_scale: *self.last_scale.lock(),
        }
    }

    /// Scale decision obeys a minimum interval between scale events
    /// (spec.md §4.6 "obeys a minimum interval").
    fn maybe_scale(&self) {
        let mut last_scale = self.last_scale.lock();
        if let Some(last) = *last_scale {
            if last.elapsed() < self.policy.scale_interval {
                return;
            }
        }

        let workers = self.workers.load(Ordering::SeqCst);
        let queued = self.queued.load(Ordering::SeqCst);
        let utilization = queued as f64 / workers.max(1) as f64;

        if utilization > self.policy.scale_up_threshold && workers < self.policy.max_workers {
            self.workers.fetch_add(1, Ordering::SeqCst);
            *last_scale = Some(Instant::now());
            debug!(pool = self.name, workers = workers + 1, "scaled up");
        } else if utilization < self.policy.scale_down_threshold && workers > self.policy.min_workers && queued == 0 {
            self.workers.fetch_sub(1, Ordering::SeqCst);
            *last_scale = Some(Instant::now());
            debug!(pool = self.name, workers = workers - 1, "scaled down");
        }
    }
}

/// Holds the named pools the rest of the application submits work to
/// (spec.md §4.6 "async, downloads, processing, thread").
pub struct WorkerPoolManager {
    pub async_pool: Arc<AdaptivePool>,
    pub downloads_pool: Arc<AdaptivePool>,
    pub processing_pool: Arc<AdaptivePool>,
    pub thread_pool: Arc<AdaptivePool>,
}

impl WorkerPoolManager {
    pub fn new() -> Self {
        let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4);
        let thread_pool_size = (cores * 4).min(32);
        info!(cores, thread_pool_size, "initializing worker pool manager");
        Self {
            async_pool: Arc::new(AdaptivePool::new("async", 2, 20)),
            downloads_pool: Arc::new(AdaptivePool::new("downloads", 2, 15)),
            processing_pool: Arc::new(AdaptivePool::new("processing", 2, 10)),
            thread_pool: Arc::new(AdaptivePool::new("thread", thread_pool_size, thread_pool_size)),
        }
    }
}

impl Default for WorkerPoolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_runs_the_task_and_counts_it() {
        let pool = AdaptivePool::new("test", 1, 2);
        let result = pool.submit(async { 1 + 1 }).await.unwrap();
        assert_eq!(result, 2);
        assert_eq!(pool.metrics().completed, 1);
    }
}
