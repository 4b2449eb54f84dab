//! Simulation configuration loading.
//!
//! Every field of the YAML file is optional; missing values fall back to the
//! built-in defaults (ten tasks over three nodes).  The expected layout is:
//! ```yaml
//! tasks: 10
//! nodes: ["node 1", "node 2", "node 3"]
//! processing_secs: { min: 0.1, max: 0.5 }
//! latency_secs: { min: 0.0, max: 0.2 }
//! seed: 42
//! time_scale: 1.0
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::delay::DelayRange;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SimConfigFile {
    tasks: Option<u32>,
    nodes: Option<Vec<String>>,
    processing_secs: Option<RangeEntry>,
    latency_secs: Option<RangeEntry>,
    seed: Option<u64>,
    time_scale: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RangeEntry {
    min: f64,
    max: f64,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Fully-resolved simulation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of tasks; ids run `0..task_count`.
    pub task_count: u32,

    /// Node rotation order.
    pub nodes: Vec<String>,

    pub processing: DelayRange,
    pub latency: DelayRange,

    /// RNG seed.  `None` draws a fresh seed from OS entropy.
    pub seed: Option<u64>,

    /// Multiplier applied to every simulated delay (`0.5` runs twice as
    /// fast).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            task_count: 10,
            nodes: vec!["node 1".into(), "node 2".into(), "node 3".into()],
            processing: DelayRange::DEFAULT_PROCESSING,
            latency: DelayRange::DEFAULT_LATENCY,
            seed: None,
            time_scale: 1.0,
        }
    }
}

impl SimConfig {
    /// Parse `path`, filling absent fields from [`SimConfig::default`].
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is invalid, or
    /// the resulting configuration fails [`validate`](Self::validate).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading simulation configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        // An empty document means "all defaults"
        let file: SimConfigFile = if content.trim().is_empty() {
            SimConfigFile::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?
        };

        let mut cfg = SimConfig::default();
        if let Some(n) = file.tasks {
            cfg.task_count = n;
        }
        if let Some(nodes) = file.nodes {
            cfg.nodes = nodes;
        }
        if let Some(r) = file.processing_secs {
            cfg.processing =
                DelayRange::new(r.min, r.max).context("invalid processing_secs range")?;
        }
        if let Some(r) = file.latency_secs {
            cfg.latency = DelayRange::new(r.min, r.max).context("invalid latency_secs range")?;
        }
        cfg.seed = file.seed.or(cfg.seed);
        if let Some(scale) = file.time_scale {
            cfg.time_scale = scale;
        }

        cfg.validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        debug!(config = ?cfg, "configuration loaded");
        Ok(cfg)
    }

    /// Check cross-field constraints that the types alone do not enforce.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() && self.task_count > 0 {
            bail!("{} task(s) requested but no nodes configured", self.task_count);
        }
        if let Some(index) = self.nodes.iter().position(|n| n.trim().is_empty()) {
            bail!("node at position {index} has an empty name");
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            bail!("time_scale must be finite and non-negative, got {}", self.time_scale);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn default_is_ten_tasks_over_three_nodes() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.task_count, 10);
        assert_eq!(cfg.nodes, vec!["node 1", "node 2", "node 3"]);
        assert_eq!(cfg.processing, DelayRange::DEFAULT_PROCESSING);
        assert_eq!(cfg.latency, DelayRange::DEFAULT_LATENCY);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.time_scale, 1.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
tasks: 4
nodes: ["alpha", "beta"]
processing_secs: { min: 0.2, max: 0.3 }
latency_secs: { min: 0.01, max: 0.02 }
seed: 42
time_scale: 0.5
"#;
        let f = yaml_tempfile(yaml);
        let cfg = SimConfig::load_from_file(f.path()).unwrap();

        assert_eq!(cfg.task_count, 4);
        assert_eq!(cfg.nodes, vec!["alpha", "beta"]);
        assert_eq!(cfg.processing, DelayRange::new(0.2, 0.3).unwrap());
        assert_eq!(cfg.latency, DelayRange::new(0.01, 0.02).unwrap());
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.time_scale, 0.5);
    }

    #[test]
    fn bundled_demo_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/simulation.yaml");
        let cfg = SimConfig::load_from_file(&path).unwrap();
        assert_eq!(cfg.task_count, 10);
        assert_eq!(cfg.nodes.len(), 3);
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn absent_fields_use_defaults() {
        let f = yaml_tempfile("tasks: 3\n");
        let cfg = SimConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg.task_count, 3);
        assert_eq!(cfg.nodes, SimConfig::default().nodes);
        assert_eq!(cfg.processing, DelayRange::DEFAULT_PROCESSING);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let f = yaml_tempfile("");
        let cfg = SimConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg, SimConfig::default());
    }

    #[test]
    fn missing_file_returns_error() {
        assert!(SimConfig::load_from_file(Path::new("/nonexistent/sim.yaml")).is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(SimConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn unknown_field_returns_error() {
        let f = yaml_tempfile("taks: 3\n");
        assert!(SimConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn inverted_range_returns_error() {
        let f = yaml_tempfile("processing_secs: { min: 0.5, max: 0.1 }\n");
        let err = SimConfig::load_from_file(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("processing_secs"));
    }

    #[test]
    fn oversized_range_returns_error() {
        let f = yaml_tempfile("processing_secs: { min: 1e20, max: 1e20 }\n");
        let err = SimConfig::load_from_file(f.path()).unwrap_err();
        assert!(format!("{err:#}").contains("too large"));
    }

    #[test]
    fn tasks_without_nodes_fail_validation() {
        let f = yaml_tempfile("nodes: []\n");
        assert!(SimConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn zero_tasks_without_nodes_is_valid() {
        let cfg = SimConfig {
            task_count: 0,
            nodes: vec![],
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn blank_node_name_fails_validation() {
        let cfg = SimConfig {
            nodes: vec!["ok".into(), "  ".into()],
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_time_scale_fails_validation() {
        let cfg = SimConfig {
            time_scale: -1.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
