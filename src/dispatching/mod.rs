//! Scheduling policies and the dispatching rules behind them.
//!
//! A [`Policy`] is the closed set of algorithms a run can use. The
//! non-preemptive policies and SRTF all pick the next process the same way:
//! evaluate a [`DispatchingRule`] over the ready set and take the smallest
//! [`SelectionKey`].
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::Policy;
//!
//! let policy: Policy = "rr".parse().unwrap();
//! assert_eq!(policy, Policy::RoundRobin);
//! assert!(policy.is_preemptive());
//! assert_eq!(policy.to_string(), "ROUND_ROBIN");
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod context;
pub mod rules;

pub(crate) use context::RunContext;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Process, ProcessId};

/// Scheduling algorithm for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Policy {
    /// First Come First Serve (non-preemptive).
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Lowest priority value first (non-preemptive).
    Priority,
    /// Fixed time slices over a FIFO ready queue (preemptive).
    RoundRobin,
    /// Shortest Remaining Time First (preemptive).
    Srtf,
}

impl Policy {
    /// Every policy, in menu order.
    pub const ALL: [Policy; 5] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin,
        Policy::Srtf,
    ];

    /// Canonical name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "PRIORITY",
            Self::RoundRobin => "ROUND_ROBIN",
            Self::Srtf => "SRTF",
        }
    }

    /// Whether a running process can lose the CPU before it finishes.
    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin | Self::Srtf)
    }

    /// Whether the run needs a time quantum.
    pub const fn requires_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Whether every process needs a priority.
    pub const fn requires_priority(&self) -> bool {
        matches!(self, Self::Priority)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy '{0}' (expected FCFS, SJF, PRIORITY, ROUND_ROBIN or SRTF)")]
pub struct ParsePolicyError(pub String);

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" | "spt" => Ok(Self::Sjf),
            "priority" | "prio" => Ok(Self::Priority),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            "srtf" | "srt" => Ok(Self::Srtf),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Ordering key for ready processes.
///
/// **Lower key = dispatched first.** Fields compare lexicographically, so
/// ties on `score` fall back to the earlier arrival, then the smaller id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionKey {
    /// Rule-specific score.
    pub score: i128,
    pub arrival_time: u64,
    pub id: ProcessId,
}

/// A rule ranking ready processes.
///
/// # Score Convention
/// Rules return smaller scores for processes that should run first.
pub trait DispatchingRule {
    /// Rule name (e.g., "SPT").
    fn name(&self) -> &'static str;

    /// Scores a ready process given its remaining CPU demand.
    fn score(&self, process: &Process, remaining_time: u64) -> i128;

    /// Full selection key with the (arrival, id) tie-break.
    fn key(&self, process: &Process, remaining_time: u64) -> SelectionKey {
        SelectionKey {
            score: self.score(process, remaining_time),
            arrival_time: process.arrival_time,
            id: process.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!("FCFS".parse::<Policy>().unwrap(), Policy::Fcfs);
        assert_eq!("sjf".parse::<Policy>().unwrap(), Policy::Sjf);
        assert_eq!("Priority".parse::<Policy>().unwrap(), Policy::Priority);
        assert_eq!("round-robin".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert_eq!("ROUND_ROBIN".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert_eq!(" srt ".parse::<Policy>().unwrap(), Policy::Srtf);
    }

    #[test]
    fn test_policy_parse_unknown() {
        let err = "lottery".parse::<Policy>().unwrap_err();
        assert_eq!(err, ParsePolicyError("lottery".into()));
        assert!(err.to_string().contains("lottery"));
    }

    #[test]
    fn test_policy_roundtrips_through_names() {
        for policy in Policy::ALL {
            assert_eq!(policy.as_str().parse::<Policy>().unwrap(), policy);
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy.as_str()));
        }
    }

    #[test]
    fn test_policy_traits() {
        assert!(!Policy::Fcfs.is_preemptive());
        assert!(!Policy::Sjf.is_preemptive());
        assert!(!Policy::Priority.is_preemptive());
        assert!(Policy::RoundRobin.is_preemptive());
        assert!(Policy::Srtf.is_preemptive());

        assert!(Policy::RoundRobin.requires_quantum());
        assert!(!Policy::Srtf.requires_quantum());
        assert!(Policy::Priority.requires_priority());
    }

    #[test]
    fn test_selection_key_order() {
        let a = SelectionKey {
            score: 3,
            arrival_time: 5,
            id: ProcessId(9),
        };
        let b = SelectionKey {
            score: 3,
            arrival_time: 2,
            id: ProcessId(9),
        };
        let c = SelectionKey {
            score: 3,
            arrival_time: 2,
            id: ProcessId(1),
        };
        assert!(b < a);
        assert!(c < b);
    }
}
