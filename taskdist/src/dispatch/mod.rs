/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Concurrent execution of assigned tasks.
//!
//! [`Dispatcher::run`] spawns one tokio task per [`Assignment`].  Each worker
//! sleeps for its processing time plus its network latency and then reports a
//! [`Completion`].  The dispatcher waits for every worker before returning,
//! collecting completions in the order the workers finish.
//!
//! ```text
//!               ┌─► worker(task 0 @ node 1) ─┐
//! assignments ──┼─► worker(task 1 @ node 2) ─┼──► join all ──► Vec<Completion>
//!               └─► worker(task 2 @ node 3) ─┘
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tokio::task::{Id, JoinSet};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::delay::DelayRange;
use crate::task::{Assignment, Completion, TaskId};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A worker task panicked.  The remaining workers were still awaited.
    #[error("worker for task {task} panicked")]
    WorkerPanicked { task: TaskId },

    /// A worker task was cancelled before it could finish.
    #[error("worker for task {task} was cancelled before completion")]
    WorkerCancelled { task: TaskId },
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Dispatcher {
    processing: DelayRange,
}

impl Dispatcher {
    pub fn new(processing: DelayRange) -> Self {
        Self { processing }
    }

    pub fn processing(&self) -> DelayRange {
        self.processing
    }

    /// Spawn a worker for every assignment and wait for all of them.
    ///
    /// Processing times are drawn from `rng` up front, in assignment order,
    /// so a seeded RNG reproduces the same delays on every run.
    /// `on_complete` is called once per worker, in completion order.
    ///
    /// # Errors
    /// The first [`DispatchError`] seen, reported only after every other
    /// worker has finished.
    pub async fn run<R, F>(
        &self,
        assignments: Vec<Assignment>,
        rng: &mut R,
        on_complete: F,
    ) -> Result<Vec<Completion>, DispatchError>
    where
        R: Rng + ?Sized,
        F: FnMut(&Completion),
    {
        self.run_with(assignments, rng, on_complete, simulate_task).await
    }

    /// [`run`](Self::run) with the worker body supplied by the caller.
    async fn run_with<R, F, W, Fut>(
        &self,
        assignments: Vec<Assignment>,
        rng: &mut R,
        mut on_complete: F,
        worker: W,
    ) -> Result<Vec<Completion>, DispatchError>
    where
        R: Rng + ?Sized,
        F: FnMut(&Completion),
        W: Fn(Assignment, Duration) -> Fut,
        Fut: Future<Output = Completion> + Send + 'static,
    {
        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let worker_count = assignments.len();
        info!(worker_count, "spawning workers");

        let mut workers = JoinSet::new();
        let mut task_of: HashMap<Id, TaskId> = HashMap::with_capacity(worker_count);
        for assignment in assignments {
            let task = assignment.task.id;
            let processing = self.processing.sample(rng);
            let handle = workers.spawn(worker(assignment, processing));
            task_of.insert(handle.id(), task);
        }

        let mut completions = Vec::with_capacity(worker_count);
        let mut first_error: Option<DispatchError> = None;

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(completion) => {
                    on_complete(&completion);
                    completions.push(completion);
                }
                Err(e) => {
                    // Every spawned id was recorded above
                    let task = task_of.get(&e.id()).copied().unwrap_or_default();
                    let err = if e.is_panic() {
                        DispatchError::WorkerPanicked { task }
                    } else {
                        DispatchError::WorkerCancelled { task }
                    };
                    error!(task = %task, error = %err, "worker failed");
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                info!(completed = completions.len(), "all workers finished");
                Ok(completions)
            }
        }
    }
}

/// Body of one simulated worker.
async fn simulate_task(assignment: Assignment, processing: Duration) -> Completion {
    let Assignment {
        task,
        node,
        network_latency,
    } = assignment;

    debug!(
        task = %task.id,
        node = %node,
        processing_ms = processing.as_secs_f64() * 1_000.0,
        latency_ms = network_latency.as_secs_f64() * 1_000.0,
        "worker started"
    );

    let started = Instant::now();
    tokio::time::sleep(processing.saturating_add(network_latency)).await;
    let elapsed = started.elapsed();

    info!(
        task = %task.id,
        node = %node,
        elapsed_ms = elapsed.as_secs_f64() * 1_000.0,
        "task completed"
    );

    Completion {
        task: task.id,
        node,
        processing,
        network_latency,
        elapsed,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
