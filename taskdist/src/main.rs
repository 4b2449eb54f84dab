/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};

use taskdist::config::SimConfig;
use taskdist::simulation::Simulation;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Round-robin task distribution simulator.
///
/// Example:
///   taskdist --tasks 12 --nodes "node 1,node 2,node 3,node 4" --seed 7
#[derive(Debug, Parser)]
#[command(
    name = "taskdist",
    about = "Round-robin task distribution simulator",
    long_about = None,
)]
struct Cli {
    /// Path to a YAML simulation configuration file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Number of tasks to distribute (overrides the config file).
    #[arg(short = 't', long = "tasks")]
    tasks: Option<u32>,

    /// Comma-separated node names, in rotation order (overrides the config file).
    #[arg(short = 'n', long = "nodes", value_delimiter = ',')]
    nodes: Option<Vec<String>>,

    /// RNG seed for a reproducible run.
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Multiplier applied to every simulated delay.
    #[arg(long = "time-scale")]
    time_scale: Option<f64>,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<SimConfig> {
        let mut cfg = match &self.config {
            Some(path) => SimConfig::load_from_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(n) = self.tasks {
            cfg.task_count = n;
        }
        if let Some(nodes) = &self.nodes {
            cfg.nodes = nodes.iter().map(|n| n.trim().to_string()).collect();
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(scale) = self.time_scale {
            cfg.time_scale = scale;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = match cli.resolve_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            process::exit(1);
        }
    };

    info!(
        tasks      = cfg.task_count,
        nodes      = ?cfg.nodes,
        seed       = ?cfg.seed,
        time_scale = cfg.time_scale,
        "Configuration"
    );

    let mut sim = match Simulation::from_config(&cfg) {
        Ok(sim) => sim,
        Err(e) => {
            error!("Failed to set up simulation: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = sim.run(|c| println!("{}", c.report_line())).await {
        error!("Simulation failed: {:#}", e);
        process::exit(1);
    }
}
