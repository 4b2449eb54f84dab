/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! End-to-end run: build tasks, assign them round-robin, dispatch, and wait.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::Instant;
use tracing::info;

use crate::config::SimConfig;
use crate::delay::{sim_rng, SimRng};
use crate::dispatch::Dispatcher;
use crate::scheduler::RoundRobinScheduler;
use crate::task::{Completion, Task};

/// Outcome of one [`Simulation::run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub tasks: usize,
    pub nodes: usize,
    /// Time from the first assignment until the last worker finished.
    pub wall_time: Duration,
    /// Completions in the order workers finished.
    pub completions: Vec<Completion>,
}

pub struct Simulation {
    task_count: u32,
    scheduler: RoundRobinScheduler,
    dispatcher: Dispatcher,
    rng: SimRng,
}

impl Simulation {
    /// Build a simulation from a validated configuration, applying
    /// `time_scale` to both delay ranges.
    pub fn from_config(cfg: &SimConfig) -> Result<Self> {
        cfg.validate()?;

        let latency = cfg
            .latency
            .scaled(cfg.time_scale)
            .context("invalid time scale")?;
        let processing = cfg
            .processing
            .scaled(cfg.time_scale)
            .context("invalid time scale")?;

        let scheduler = RoundRobinScheduler::new(cfg.nodes.clone(), latency)?;

        Ok(Self {
            task_count: cfg.task_count,
            scheduler,
            dispatcher: Dispatcher::new(processing),
            rng: sim_rng(cfg.seed),
        })
    }

    /// Run the whole simulation once.  `on_complete` is invoked as each
    /// worker finishes.
    pub async fn run<F>(&mut self, on_complete: F) -> Result<RunSummary>
    where
        F: FnMut(&Completion),
    {
        let started = Instant::now();

        let tasks = Task::batch(self.task_count);
        let assignments = self
            .scheduler
            .assign(tasks, &mut self.rng)
            .context("task assignment failed")?;

        let completions = self
            .dispatcher
            .run(assignments, &mut self.rng, on_complete)
            .await
            .context("task execution failed")?;

        let summary = RunSummary {
            tasks: completions.len(),
            nodes: self.scheduler.nodes().len(),
            wall_time: started.elapsed(),
            completions,
        };

        info!(
            tasks = summary.tasks,
            nodes = summary.nodes,
            wall_time_ms = summary.wall_time.as_secs_f64() * 1_000.0,
            "simulation finished"
        );
        Ok(summary)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::DelayRange;
    use std::collections::BTreeMap;

    fn seeded(seed: u64) -> SimConfig {
        SimConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn default_run_completes_every_task() {
        let mut sim = Simulation::from_config(&seeded(1)).unwrap();
        let mut lines = Vec::new();
        let summary = sim.run(|c| lines.push(c.report_line())).await.unwrap();

        assert_eq!(summary.tasks, 10);
        assert_eq!(summary.nodes, 3);
        assert_eq!(lines.len(), 10);
        for id in 0..10 {
            let expected = format!("Task {id} completed on Node node {}", id % 3 + 1);
            assert!(lines.contains(&expected), "missing line: {expected}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn tasks_are_spread_evenly_across_nodes() {
        let mut sim = Simulation::from_config(&seeded(2)).unwrap();
        let summary = sim.run(|_| {}).await.unwrap();

        let mut per_node: BTreeMap<String, usize> = BTreeMap::new();
        for c in &summary.completions {
            *per_node.entry(c.node.clone()).or_default() += 1;
        }
        assert_eq!(per_node["node 1"], 4);
        assert_eq!(per_node["node 2"], 3);
        assert_eq!(per_node["node 3"], 3);
    }

    #[tokio::test(start_paused = true)]
    async fn wall_time_is_bounded_by_slowest_worker() {
        let mut sim = Simulation::from_config(&seeded(3)).unwrap();
        let summary = sim.run(|_| {}).await.unwrap();

        let slowest = summary
            .completions
            .iter()
            .map(|c| c.total_delay())
            .max()
            .unwrap();
        assert!(summary.wall_time >= slowest);
        // Upper bound: 0.5 s processing + 0.2 s latency, plus timer slack
        assert!(summary.wall_time < Duration::from_millis(750));
    }

    #[tokio::test(start_paused = true)]
    async fn same_seed_reproduces_delays() {
        let delays = |summary: RunSummary| {
            let mut v: Vec<_> = summary
                .completions
                .into_iter()
                .map(|c| (c.task, c.processing, c.network_latency))
                .collect();
            v.sort_by_key(|(id, _, _)| *id);
            v
        };

        let a = Simulation::from_config(&seeded(42)).unwrap().run(|_| {}).await.unwrap();
        let b = Simulation::from_config(&seeded(42)).unwrap().run(|_| {}).await.unwrap();
        assert_eq!(delays(a), delays(b));
    }

    #[tokio::test(start_paused = true)]
    async fn time_scale_shrinks_delays() {
        let cfg = SimConfig {
            time_scale: 0.1,
            ..seeded(4)
        };
        let summary = Simulation::from_config(&cfg).unwrap().run(|_| {}).await.unwrap();
        for c in &summary.completions {
            assert!(c.processing <= Duration::from_millis(50));
            assert!(c.network_latency <= Duration::from_millis(20));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tasks_finishes_immediately() {
        let cfg = SimConfig {
            task_count: 0,
            nodes: vec![],
            ..seeded(5)
        };
        let summary = Simulation::from_config(&cfg).unwrap().run(|_| {}).await.unwrap();
        assert_eq!(summary.tasks, 0);
        assert!(summary.completions.is_empty());
    }

    #[test]
    fn overflowing_time_scale_is_rejected() {
        let cfg = SimConfig {
            time_scale: 1e20,
            ..seeded(7)
        };
        assert!(cfg.validate().is_ok());
        let err = Simulation::from_config(&cfg).err().unwrap();
        assert!(format!("{err:#}").contains("too large"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = SimConfig {
            nodes: vec![],
            ..Default::default()
        };
        assert!(Simulation::from_config(&cfg).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_ranges_are_honoured() {
        let cfg = SimConfig {
            task_count: 2,
            nodes: vec!["x".into()],
            processing: DelayRange::new(0.3, 0.3).unwrap(),
            latency: DelayRange::new(0.1, 0.1).unwrap(),
            ..seeded(6)
        };
        let summary = Simulation::from_config(&cfg).unwrap().run(|_| {}).await.unwrap();
        for c in &summary.completions {
            assert_eq!(c.node, "x");
            assert_eq!(c.total_delay(), Duration::from_millis(400));
        }
    }
}
