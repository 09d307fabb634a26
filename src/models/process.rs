//! Process model.
//!
//! A process is a simulated unit of CPU work: it becomes ready at its
//! arrival time and needs `burst_time` ticks of CPU to finish.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable process identifier.
///
/// Ordered numerically; the smallest id wins every final tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl From<u32> for ProcessId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A process to be scheduled.
///
/// Input data only. The per-run `remaining_time` lives in the engine's run
/// state, so the same process can be fed to any number of runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Tick at which the process becomes ready.
    pub arrival_time: u64,
    /// Total CPU ticks required.
    pub burst_time: u64,
    /// Scheduling priority (lower = more important). Only the priority
    /// policy reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl Process {
    /// Creates a new process.
    pub fn new(id: u32, arrival_time: u64, burst_time: u64) -> Self {
        Self {
            id: ProcessId(id),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the process has arrived by tick `t`.
    #[inline]
    pub fn has_arrived(&self, t: u64) -> bool {
        self.arrival_time <= t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new(1, 3, 5).with_priority(2);
        assert_eq!(p.id, ProcessId(1));
        assert_eq!(p.arrival_time, 3);
        assert_eq!(p.burst_time, 5);
        assert_eq!(p.priority, Some(2));
    }

    #[test]
    fn test_has_arrived() {
        let p = Process::new(1, 3, 5);
        assert!(!p.has_arrived(2));
        assert!(p.has_arrived(3));
        assert!(p.has_arrived(10));
    }

    #[test]
    fn test_id_display_and_order() {
        assert_eq!(ProcessId(7).to_string(), "P7");
        assert!(ProcessId(2) < ProcessId(10));
    }

    #[test]
    fn test_priority_defaults_to_none_in_json() {
        let p: Process =
            serde_json::from_str(r#"{"id":1,"arrival_time":0,"burst_time":4}"#).unwrap();
        assert_eq!(p.priority, None);
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("priority"));
    }
}
