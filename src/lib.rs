//! Single-CPU process scheduling simulator.
//!
//! Given a set of processes (arrival time, burst time, optional priority)
//! and a policy, computes the execution timeline and the per-process and
//! aggregate performance metrics derived from it.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Process`, `ProcessTable`, `Interval`, `Timeline`
//! - **`dispatching`**: `Policy` selector and the dispatching rules behind it
//! - **`scheduler`**: `simulate` over the five policies, `Metrics`, `SimulationRequest`
//! - **`validation`**: Input integrity checks (duplicate IDs, zero bursts, quantum)
//! - **`workload`**: Seeded random process sets
//!
//! # Example
//!
//! ```
//! use cpu_schedule::dispatching::Policy;
//! use cpu_schedule::models::Process;
//! use cpu_schedule::scheduler::SimulationRequest;
//!
//! let report = SimulationRequest::new(
//!     vec![Process::new(1, 0, 4), Process::new(2, 1, 3), Process::new(3, 2, 1)],
//!     Policy::Fcfs,
//! )
//! .run()
//! .unwrap();
//!
//! assert_eq!(report.timeline.to_string(), "P1:0-4 | P2:4-7 | P3:7-8");
//! assert_eq!(format!("{:.2}", report.metrics.average_waiting), "2.67");
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::ScheduleError;
