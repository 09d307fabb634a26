//! Built-in dispatching rules.
//!
//! One rule per selection-based policy:
//!
//! | Rule | Policy | Score |
//! |------|--------|-------|
//! | `Fifo` | FCFS | arrival time |
//! | `Spt` | SJF | burst time |
//! | `Priority` | PRIORITY | priority value |
//! | `Srpt` | SRTF | remaining time |
//!
//! Round Robin is queue-driven and has no rule.

use super::DispatchingRule;
use crate::models::Process;

/// First come, first served.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn score(&self, process: &Process, _remaining_time: u64) -> i128 {
        process.arrival_time.into()
    }
}

/// Shortest Processing Time.
///
/// Scores the full burst, not the remainder: non-preemptive SJF never sees
/// a partially executed process.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn score(&self, process: &Process, _remaining_time: u64) -> i128 {
        process.burst_time.into()
    }
}

/// Lowest priority value first.
///
/// Processes without a priority rank last; validation rejects them before
/// a priority run starts.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn score(&self, process: &Process, _remaining_time: u64) -> i128 {
        process.priority.map(i128::from).unwrap_or(i128::MAX)
    }
}

/// Shortest Remaining Processing Time.
///
/// # Reference
/// Schrage (1968), optimal for mean flow time on one preemptive machine.
#[derive(Debug, Clone, Copy)]
pub struct Srpt;

impl DispatchingRule for Srpt {
    fn name(&self) -> &'static str {
        "SRPT"
    }

    fn score(&self, _process: &Process, remaining_time: u64) -> i128 {
        remaining_time.into()
    }
}
