//! Simulation requests and reports.
//!
//! A [`SimulationRequest`] is the complete configuration of one run:
//! processes, policy and (for Round Robin) a quantum. It deserializes from
//! JSON, so a presentation layer can accept runs as plain data.
//!
//! ```
//! use cpu_schedule::scheduler::SimulationRequest;
//! use cpu_schedule::dispatching::Policy;
//! use cpu_schedule::models::Process;
//!
//! let request = SimulationRequest::new(
//!     vec![Process::new(1, 0, 4), Process::new(2, 1, 3), Process::new(3, 2, 1)],
//!     Policy::RoundRobin,
//! )
//! .with_quantum(2);
//!
//! let report = request.run().unwrap();
//! assert_eq!(report.timeline.to_string(), "P1:0-2 | P2:2-4 | P1:4-6 | P3:6-7 | P2:7-8");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{simulate, Metrics};
use crate::dispatching::Policy;
use crate::error::ScheduleError;
use crate::models::{Process, ProcessTable, Timeline};

/// Input container for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Processes to schedule, in presentation order.
    pub processes: Vec<Process>,
    /// Scheduling algorithm.
    pub policy: Policy,
    /// Round Robin time slice. Ignored by other policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<u64>,
}

/// Output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub policy: Policy,
    pub timeline: Timeline,
    pub metrics: Metrics,
}

impl SimulationRequest {
    /// Creates a new request.
    pub fn new(processes: Vec<Process>, policy: Policy) -> Self {
        Self {
            processes,
            policy,
            quantum: None,
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: u64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Validates, simulates and measures the run.
    ///
    /// # Errors
    /// `InvalidConfiguration` for rejected input; `IncompleteSchedule` if
    /// the engine dropped a process.
    pub fn run(&self) -> Result<SimulationReport, ScheduleError> {
        let table = ProcessTable::new(self.processes.clone())?;
        run_policy(&table, self.policy, self.quantum)
    }
}

/// Runs every policy the input supports against the same processes.
///
/// Round Robin is included only when `quantum` is given; priority
/// scheduling only when every process carries a priority. Each run builds
/// its own state, so results are independent of order.
pub fn compare_policies(
    processes: &ProcessTable,
    quantum: Option<u64>,
) -> Result<Vec<SimulationReport>, ScheduleError> {
    let has_priorities = processes.iter().all(|p| p.priority.is_some());

    Policy::ALL
        .into_iter()
        .filter(|policy| !policy.requires_quantum() || quantum.is_some())
        .filter(|policy| !policy.requires_priority() || has_priorities)
        .map(|policy| run_policy(processes, policy, quantum))
        .collect()
}

fn run_policy(
    processes: &ProcessTable,
    policy: Policy,
    quantum: Option<u64>,
) -> Result<SimulationReport, ScheduleError> {
    let timeline = simulate(processes, policy, quantum)?;
    let metrics = Metrics::compute(processes.as_slice(), &timeline)?;
    debug!(
        %policy,
        avg_turnaround = metrics.average_turnaround,
        avg_waiting = metrics.average_waiting,
        "run measured"
    );
    Ok(SimulationReport {
        policy,
        timeline,
        metrics,
    })
}
