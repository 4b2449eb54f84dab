/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! taskdist – round-robin task distribution simulator
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── config/       – YAML / default simulation parameters
//! ├── delay/        – random processing-time and latency model
//! ├── scheduler/    – round-robin node assignment
//! ├── dispatch/     – one concurrent worker per task, join-all
//! ├── simulation    – end-to-end run
//! └── task          – Task / Assignment / Completion
//! ```

pub mod config;
pub mod delay;
pub mod dispatch;
pub mod scheduler;
pub mod simulation;
pub mod task;
