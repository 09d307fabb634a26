//! Scheduling engine and run metrics.
//!
//! Provides the five single-CPU algorithms, the timeline they produce, and
//! the metrics derived from it.
//!
//! # Algorithms
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FCFS | no | earliest arrival |
//! | SJF | no | shortest burst |
//! | PRIORITY | no | lowest priority value |
//! | ROUND_ROBIN | yes | FIFO queue, fixed quantum |
//! | SRTF | yes | shortest remaining time |
//!
//! Ties always fall back to earliest arrival, then smallest id.
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Schrage (1968), "A Proof of the Optimality of the Shortest Remaining
//!   Processing Time Discipline"

mod engine;
mod metrics;
mod request;

pub use engine::simulate;
pub use metrics::{compute, Metrics, ProcessMetrics};
pub use request::{compare_policies, SimulationReport, SimulationRequest};
