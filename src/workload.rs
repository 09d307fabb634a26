//! Random workload generation.
//!
//! Produces reproducible process sets for experiments and tests: on every
//! tick a process arrives with probability `p_arrival`, and it is short
//! with probability `p_short`.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Process, ProcessId};

/// Parameters for [`WorkloadGenerator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Ticks during which processes may arrive.
    pub ticks: u64,
    /// Per-tick arrival probability.
    pub p_arrival: f64,
    /// Probability that an arrival is a short process.
    pub p_short: f64,
    pub short_burst: u64,
    pub long_burst: u64,
    /// Number of priority levels `0..levels`. `None` leaves priorities unset.
    pub priority_levels: Option<i32>,
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            priority_levels: None,
            seed: 0,
        }
    }
}

/// Seeded generator of Bernoulli-arrival workloads.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    config: WorkloadConfig,
}

impl WorkloadGenerator {
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }

    /// Generates processes with ids `1..`, in arrival order.
    ///
    /// The result may be empty for small `ticks` or `p_arrival`.
    pub fn generate(&self) -> Vec<Process> {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let mut processes = Vec::new();

        for t in 0..cfg.ticks {
            if rng.random::<f64>() >= cfg.p_arrival {
                continue;
            }

            let burst_time = if rng.random::<f64>() < cfg.p_short {
                cfg.short_burst
            } else {
                cfg.long_burst
            };

            let mut process = Process {
                id: ProcessId(processes.len() as u32 + 1),
                arrival_time: t,
                burst_time,
                priority: None,
            };
            if let Some(levels) = cfg.priority_levels.filter(|&l| l > 0) {
                process.priority = Some(rng.random_range(0..levels));
            }
            processes.push(process);
        }

        processes
    }
}
