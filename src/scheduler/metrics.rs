//! Schedule quality metrics.
//!
//! Derives per-process and aggregate performance indicators from a
//! timeline and the processes it was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion | End of the process's last interval |
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | Makespan | End of the timeline |
//! | Utilization | busy time / makespan |
//! | Throughput | processes / makespan |
//!
//! # Reference
//! Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::{Process, ProcessId, Timeline};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Performance figures for one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub id: ProcessId,
    pub arrival_time: u64,
    pub burst_time: u64,
    /// Start of the first interval the process ran in.
    pub first_run: u64,
    pub completion_time: u64,
    pub turnaround_time: i64,
    pub waiting_time: i64,
    pub response_time: i64,
}

/// Metrics for a whole run.
///
/// `processes` follows the input order of the process set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub processes: Vec<ProcessMetrics>,
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub average_response: f64,
    pub makespan: u64,
    pub busy_time: u64,
    pub idle_time: u64,
    /// busy_time / makespan (0.0..=1.0).
    pub utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    pub context_switches: usize,
}

impl Metrics {
    /// Computes metrics from a timeline and its input processes.
    ///
    /// # Errors
    /// `ScheduleError::IncompleteSchedule` if a process never appears in the
    /// timeline. That is an engine defect, not a user error; no partial
    /// metrics are returned.
    ///
    /// `ScheduleError::InvalidConfiguration` (`TimeOverflow`) if a process's
    /// times do not fit the signed metric range.
    pub fn compute(processes: &[Process], timeline: &Timeline) -> Result<Self, ScheduleError> {
        let mut per_process = Vec::with_capacity(processes.len());

        for process in processes {
            let (first_run, completion_time) = timeline
                .intervals_for(process.id)
                .fold(None, |span: Option<(u64, u64)>, i| match span {
                    Some((first, last)) => Some((first.min(i.start), last.max(i.end))),
                    None => Some((i.start, i.end)),
                })
                .ok_or(ScheduleError::IncompleteSchedule(process.id))?;

            // Both operands of each subtraction lie in 0..=i64::MAX.
            let arrival = signed(process, process.arrival_time)?;
            let turnaround_time = signed(process, completion_time)? - arrival;
            let waiting_time = turnaround_time
                .checked_sub(signed(process, process.burst_time)?)
                .ok_or_else(|| time_overflow(process))?;
            per_process.push(ProcessMetrics {
                id: process.id,
                arrival_time: process.arrival_time,
                burst_time: process.burst_time,
                first_run,
                completion_time,
                turnaround_time,
                waiting_time,
                response_time: signed(process, first_run)? - arrival,
            });
        }

        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();
        let (utilization, throughput) = if makespan == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_time as f64 / makespan as f64,
                per_process.len() as f64 / makespan as f64,
            )
        };

        Ok(Self {
            average_turnaround: mean(per_process.iter().map(|m| m.turnaround_time)),
            average_waiting: mean(per_process.iter().map(|m| m.waiting_time)),
            average_response: mean(per_process.iter().map(|m| m.response_time)),
            processes: per_process,
            makespan,
            busy_time,
            idle_time: timeline.idle_time(),
            utilization,
            throughput,
            context_switches: timeline.context_switches(),
        })
    }

    /// Metrics for one process.
    pub fn get(&self, id: ProcessId) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.id == id)
    }
}

/// Computes metrics; see [`Metrics::compute`].
pub fn compute(processes: &[Process], timeline: &Timeline) -> Result<Metrics, ScheduleError> {
    Metrics::compute(processes, timeline)
}

fn signed(process: &Process, ticks: u64) -> Result<i64, ScheduleError> {
    i64::try_from(ticks).map_err(|_| time_overflow(process))
}

fn time_overflow(process: &Process) -> ScheduleError {
    ScheduleError::InvalidConfiguration(vec![ValidationError::new(
        ValidationErrorKind::TimeOverflow,
        format!("Times of process '{}' exceed the signed tick range", process.id),
    )])
}

fn mean(values: impl Iterator<Item = i64>) -> f64 {
    let (sum, count) = values.fold((0i128, 0usize), |(s, c), v| (s + i128::from(v), c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Interval;

    fn textbook() -> Vec<Process> {
        vec![
            Process::new(1, 0, 4),
            Process::new(2, 1, 3),
            Process::new(3, 2, 1),
        ]
    }

    #[test]
    fn test_metrics_fcfs_textbook() {
        let timeline = Timeline::from_intervals(vec![
            Interval::process(1, 0, 4),
            Interval::process(2, 4, 7),
            Interval::process(3, 7, 8),
        ]);
        let m = Metrics::compute(&textbook(), &timeline).unwrap();

        let completions: Vec<u64> = m.processes.iter().map(|p| p.completion_time).collect();
        let turnarounds: Vec<i64> = m.processes.iter().map(|p| p.turnaround_time).collect();
        let waits: Vec<i64> = m.processes.iter().map(|p| p.waiting_time).collect();
        assert_eq!(completions, vec![4, 7, 8]);
        assert_eq!(turnarounds, vec![4, 6, 6]);
        assert_eq!(waits, vec![0, 3, 5]);

        assert!((m.average_turnaround - 16.0 / 3.0).abs() < 1e-10);
        assert!((m.average_waiting - 8.0 / 3.0).abs() < 1e-10);
        assert_eq!(format!("{:.2}", m.average_turnaround), "5.33");
        assert_eq!(format!("{:.2}", m.average_waiting), "2.67");
    }

    #[test]
    fn test_metrics_use_last_interval() {
        let timeline = Timeline::from_intervals(vec![
            Interval::process(1, 0, 2),
            Interval::process(2, 2, 4),
            Interval::process(1, 4, 6),
            Interval::process(3, 6, 7),
            Interval::process(2, 7, 8),
        ]);
        let m = Metrics::compute(&textbook(), &timeline).unwrap();
        let p1 = m.get(ProcessId(1)).unwrap();
        assert_eq!(p1.first_run, 0);
        assert_eq!(p1.completion_time, 6);
        assert_eq!(p1.waiting_time, 2);

        let p3 = m.get(ProcessId(3)).unwrap();
        assert_eq!(p3.response_time, 4);
        assert_eq!(m.context_switches, 4);
    }

    #[test]
    fn test_metrics_idle_and_utilization() {
        let processes = vec![Process::new(1, 2, 2)];
        let timeline = Timeline::from_intervals(vec![
            Interval::idle(0, 2),
            Interval::process(1, 2, 4),
        ]);
        let m = Metrics::compute(&processes, &timeline).unwrap();
        assert_eq!(m.makespan, 4);
        assert_eq!(m.busy_time, 2);
        assert_eq!(m.idle_time, 2);
        assert!((m.utilization - 0.5).abs() < 1e-10);
        assert!((m.throughput - 0.25).abs() < 1e-10);
        assert_eq!(m.processes[0].waiting_time, 0);
    }

    #[test]
    fn test_metrics_incomplete_schedule() {
        let timeline = Timeline::from_intervals(vec![
            Interval::process(1, 0, 4),
            Interval::process(2, 4, 7),
        ]);
        let err = Metrics::compute(&textbook(), &timeline).unwrap_err();
        assert_eq!(err, ScheduleError::IncompleteSchedule(ProcessId(3)));
    }

    #[test]
    fn test_free_compute_matches_method() {
        let timeline = Timeline::from_intervals(vec![
            Interval::process(1, 0, 4),
            Interval::process(2, 4, 7),
            Interval::process(3, 7, 8),
        ]);
        assert_eq!(
            compute(&textbook(), &timeline).unwrap(),
            Metrics::compute(&textbook(), &timeline).unwrap()
        );
    }

    #[test]
    fn test_metrics_reject_times_beyond_signed_range() {
        let processes = vec![Process::new(1, 0, 1)];
        let timeline = Timeline::from_intervals(vec![Interval::process(1, 0, u64::MAX)]);
        let err = Metrics::compute(&processes, &timeline).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::TimeOverflow
        );

        // Huge burst against a short timeline: turnaround fits, waiting would not.
        let processes = vec![Process::new(1, i64::MAX as u64, i64::MAX as u64)];
        let timeline = Timeline::from_intervals(vec![Interval::process(1, 0, 1)]);
        assert!(Metrics::compute(&processes, &timeline).is_err());
    }

    #[test]
    fn test_metrics_at_the_time_limit() {
        let last = i64::MAX as u64 - 5;
        let processes = vec![Process::new(1, last, 5)];
        let timeline = Timeline::from_intervals(vec![
            Interval::idle(0, last),
            Interval::process(1, last, last + 5),
        ]);
        let m = Metrics::compute(&processes, &timeline).unwrap();
        assert_eq!(m.processes[0].turnaround_time, 5);
        assert_eq!(m.processes[0].waiting_time, 0);
    }
}
