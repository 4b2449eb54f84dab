/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the round-robin scheduler.

use thiserror::Error;

/// Error returned by
/// [`RoundRobinScheduler`](super::RoundRobinScheduler) construction and
/// [`assign()`](super::RoundRobinScheduler::assign).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// Tasks were supplied but there is no node to rotate over.
    #[error("cannot assign {task_count} task(s): node list is empty")]
    NoNodes { task_count: usize },

    /// A node name in the rotation is empty.
    #[error("node at position {index} has an empty name")]
    EmptyNodeName { index: usize },
}
