/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the distribution simulator.
//!
//! Three types model the three stages of one run:
//!
//! ```text
//! Task  ──(RoundRobinScheduler)──►  Assignment  ──(Dispatcher)──►  Completion
//!  ↑ input                           ↑ node + latency              ↑ worker report
//! ```
//!
//! # Ownership model
//! `Vec<Task>` is moved into the scheduler, which produces one owned
//! `Assignment` per task.  Each `Assignment` is then moved into the spawned
//! worker future, so no task is ever shared between workers.

use std::fmt;
use std::time::Duration;

// ── TaskId ────────────────────────────────────────────────────────────────────

/// Identity of a simulated task.
///
/// Displays as the bare number so completion lines read `Task 3 ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Task (input) ──────────────────────────────────────────────────────────────

/// One unit of simulated work.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Task {
    pub id: TaskId,
}

impl Task {
    pub fn new(id: u32) -> Self {
        Self { id: TaskId(id) }
    }

    /// Tasks with ids `0..count`, in ascending order.
    pub fn batch(count: u32) -> Vec<Task> {
        (0..count).map(Task::new).collect()
    }
}

// ── Assignment (scheduler output) ─────────────────────────────────────────────

/// A task bound to a node, together with the network latency drawn for it
/// when it was assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub task: Task,

    /// Name of the node the task was sent to.
    pub node: String,

    /// Simulated network latency added on top of processing time.
    pub network_latency: Duration,
}

// ── Completion (worker report) ────────────────────────────────────────────────

/// Report produced by a worker once its simulated work has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub task: TaskId,
    pub node: String,

    /// Processing time drawn for this task.
    pub processing: Duration,

    /// Network latency carried over from the [`Assignment`].
    pub network_latency: Duration,

    /// Time from spawn until the worker finished, as measured by the worker.
    pub elapsed: Duration,
}

impl Completion {
    /// The full simulated delay: processing plus network latency.
    pub fn total_delay(&self) -> Duration {
        self.processing.saturating_add(self.network_latency)
    }

    /// Human-readable completion line printed by the binary.
    pub fn report_line(&self) -> String {
        format!("Task {} completed on Node {}", self.task, self.node)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
