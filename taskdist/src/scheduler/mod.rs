/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Round-robin task scheduler.
//!
//! [`RoundRobinScheduler`] walks a task list in order and hands each task to
//! the node under its cursor, then advances the cursor with wraparound:
//!
//! ```text
//! nodes:  [A, B, C]
//! tasks:   0  1  2  3  4  5  6
//! node:    A  B  C  A  B  C  A
//! ```
//!
//! There is no load awareness: the only state is the cursor.  For every task
//! the scheduler also draws the simulated network latency, which travels with
//! the [`Assignment`] to the worker.
//!
//! # Example
//! ```rust,ignore
//! let mut scheduler = RoundRobinScheduler::new(nodes, DelayRange::DEFAULT_LATENCY)?;
//! let assignments = scheduler.assign(Task::batch(10), &mut rng)?;
//! ```

pub mod error;

pub use error::SchedulerError;

use rand::Rng;
use tracing::{debug, info};

use crate::delay::DelayRange;
use crate::task::{Assignment, Task};

// ── RoundRobinScheduler ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    nodes: Vec<String>,
    latency: DelayRange,

    /// Index into `nodes` of the node that receives the next task.
    cursor: usize,
}

impl RoundRobinScheduler {
    /// Create a scheduler rotating over `nodes` in the given order.
    ///
    /// Duplicate names are kept as separate rotation slots.  An empty list
    /// is accepted here; it only fails once there is something to assign.
    pub fn new(nodes: Vec<String>, latency: DelayRange) -> Result<Self, SchedulerError> {
        if let Some(index) = nodes.iter().position(|n| n.trim().is_empty()) {
            return Err(SchedulerError::EmptyNodeName { index });
        }
        Ok(Self {
            nodes,
            latency,
            cursor: 0,
        })
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Index of the node that will receive the next task.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Rewind the rotation so the next task goes to the first node.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Assign every task in `tasks` to a node, in order.
    ///
    /// The cursor is kept between calls, so a second batch continues the
    /// rotation where the first one stopped.
    ///
    /// # Errors
    /// [`SchedulerError::NoNodes`] if `tasks` is non-empty and the node list
    /// is empty.  An empty task list always succeeds.
    pub fn assign<R: Rng + ?Sized>(
        &mut self,
        tasks: Vec<Task>,
        rng: &mut R,
    ) -> Result<Vec<Assignment>, SchedulerError> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }
        if self.nodes.is_empty() {
            return Err(SchedulerError::NoNodes {
                task_count: tasks.len(),
            });
        }

        info!(
            task_count = tasks.len(),
            node_count = self.nodes.len(),
            start_node = %self.nodes[self.cursor],
            "assigning tasks round-robin"
        );

        let mut assignments = Vec::with_capacity(tasks.len());
        for task in tasks {
            let node = self.nodes[self.cursor].clone();
            let network_latency = self.latency.sample(rng);

            debug!(
                task = %task.id,
                node = %node,
                latency_ms = network_latency.as_secs_f64() * 1_000.0,
                "task assigned"
            );

            assignments.push(Assignment {
                task,
                node,
                network_latency,
            });
            self.cursor = (self.cursor + 1) % self.nodes.len();
        }

        Ok(assignments)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
