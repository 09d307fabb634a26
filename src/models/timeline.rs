//! Timeline (Gantt data) model.
//!
//! A timeline is the ordered sequence of CPU-occupancy intervals produced
//! by one scheduling run. It covers `[0, makespan)` without gaps: stretches
//! where no process is ready are recorded as explicit idle intervals.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProcessId;

/// Who holds the CPU during an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    /// A process is running.
    Process(ProcessId),
    /// No process is ready.
    Idle,
}

impl Occupant {
    /// The running process, if any.
    pub fn process_id(&self) -> Option<ProcessId> {
        match self {
            Self::Process(id) => Some(*id),
            Self::Idle => None,
        }
    }

    /// Whether this is the idle marker.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process(id) => write!(f, "{id}"),
            Self::Idle => f.write_str("IDLE"),
        }
    }
}

/// A half-open occupancy interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub occupant: Occupant,
    pub start: u64,
    pub end: u64,
}

impl Interval {
    pub fn new(occupant: Occupant, start: u64, end: u64) -> Self {
        Self {
            occupant,
            start,
            end,
        }
    }

    /// Creates an interval for the process with raw id `id`.
    pub fn process(id: u32, start: u64, end: u64) -> Self {
        Self::new(Occupant::Process(ProcessId(id)), start, end)
    }

    /// Creates an idle interval.
    pub fn idle(start: u64, end: u64) -> Self {
        Self::new(Occupant::Idle, start, end)
    }

    /// Length in ticks.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }

    /// Whether this interval belongs to `id`.
    #[inline]
    pub fn is_for(&self, id: ProcessId) -> bool {
        self.occupant == Occupant::Process(id)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.occupant, self.start, self.end)
    }
}

/// The complete occupancy record of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Intervals sorted by start, contiguous from t=0.
    pub intervals: Vec<Interval>,
}

impl Timeline {
    /// Creates a timeline from already-ordered intervals.
    pub fn from_intervals(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the timeline has no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterates over intervals in time order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    /// Makespan: end of the last interval.
    pub fn makespan(&self) -> u64 {
        self.intervals.last().map(|i| i.end).unwrap_or(0)
    }

    /// All intervals in which `id` runs.
    pub fn intervals_for(&self, id: ProcessId) -> impl Iterator<Item = &Interval> {
        self.intervals.iter().filter(move |i| i.is_for(id))
    }

    /// Completion time of a process (largest end among its intervals).
    pub fn completion_time(&self, id: ProcessId) -> Option<u64> {
        self.intervals_for(id).map(|i| i.end).max()
    }

    /// First time a process is put on the CPU.
    pub fn first_start(&self, id: ProcessId) -> Option<u64> {
        self.intervals_for(id).map(|i| i.start).min()
    }

    /// Ticks spent running processes.
    pub fn busy_time(&self) -> u64 {
        self.intervals
            .iter()
            .filter(|i| !i.occupant.is_idle())
            .map(Interval::duration)
            .sum()
    }

    /// Ticks spent idle.
    pub fn idle_time(&self) -> u64 {
        self.intervals
            .iter()
            .filter(|i| i.occupant.is_idle())
            .map(Interval::duration)
            .sum()
    }

    /// Number of hand-overs between two different processes.
    ///
    /// Idle stretches are skipped, so `P1 | IDLE | P2` counts one switch.
    pub fn context_switches(&self) -> usize {
        let running: Vec<ProcessId> = self
            .intervals
            .iter()
            .filter_map(|i| i.occupant.process_id())
            .collect();
        running.windows(2).filter(|w| w[0] != w[1]).count()
    }

    /// Order in which processes finish.
    pub fn completion_order(&self) -> Vec<ProcessId> {
        let mut finished: Vec<(u64, ProcessId)> = Vec::new();
        for interval in &self.intervals {
            if let Some(id) = interval.occupant.process_id() {
                match finished.iter_mut().find(|(_, p)| *p == id) {
                    Some(entry) => entry.0 = interval.end,
                    None => finished.push((interval.end, id)),
                }
            }
        }
        finished.sort();
        finished.into_iter().map(|(_, id)| id).collect()
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, interval) in self.intervals.iter().enumerate() {
            if n > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{interval}")?;
        }
        Ok(())
    }
}

/// Incremental timeline construction used by the engine.
///
/// Every segment starts where the previous one ended, so contiguity holds
/// by construction.
#[derive(Debug, Default)]
pub(crate) struct TimelineBuilder {
    intervals: Vec<Interval>,
}

impl TimelineBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Current end of the timeline.
    pub(crate) fn cursor(&self) -> u64 {
        self.intervals.last().map(|i| i.end).unwrap_or(0)
    }

    /// Leaves the CPU idle up to `end`. Adjacent idle stretches merge.
    pub(crate) fn idle_until(&mut self, end: u64) {
        let start = self.cursor();
        if end <= start {
            return;
        }
        if let Some(last) = self.intervals.last_mut().filter(|i| i.occupant.is_idle()) {
            last.end = end;
            return;
        }
        self.intervals.push(Interval::idle(start, end));
    }

    /// Opens a fresh interval for `id` up to `end`, never merging.
    ///
    /// Used for every dispatch that follows a scheduling decision.
    pub(crate) fn dispatch(&mut self, id: ProcessId, end: u64) {
        let start = self.cursor();
        debug_assert!(end > start, "empty slice for {id} at {start}");
        self.intervals
            .push(Interval::new(Occupant::Process(id), start, end));
    }

    /// Keeps `id` running up to `end`, extending its open interval when it
    /// already holds the CPU.
    pub(crate) fn continue_running(&mut self, id: ProcessId, end: u64) {
        if let Some(last) = self.intervals.last_mut().filter(|i| i.is_for(id)) {
            debug_assert!(end > last.end, "{id} must advance past {}", last.end);
            last.end = end;
            return;
        }
        self.dispatch(id, end);
    }

    pub(crate) fn finish(self) -> Timeline {
        Timeline::from_intervals(self.intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timeline() -> Timeline {
        Timeline::from_intervals(vec![
            Interval::process(1, 0, 2),
            Interval::process(2, 2, 4),
            Interval::idle(4, 5),
            Interval::process(1, 5, 7),
        ])
    }

    #[test]
    fn test_timeline_makespan() {
        assert_eq!(sample_timeline().makespan(), 7);
        assert_eq!(Timeline::default().makespan(), 0);
    }

    #[test]
    fn test_completion_and_first_start() {
        let t = sample_timeline();
        assert_eq!(t.completion_time(ProcessId(1)), Some(7));
        assert_eq!(t.first_start(ProcessId(1)), Some(0));
        assert_eq!(t.completion_time(ProcessId(2)), Some(4));
        assert_eq!(t.completion_time(ProcessId(9)), None);
    }

    #[test]
    fn test_busy_and_idle_time() {
        let t = sample_timeline();
        assert_eq!(t.busy_time(), 6);
        assert_eq!(t.idle_time(), 1);
    }

    #[test]
    fn test_context_switches_skip_idle() {
        let t = sample_timeline();
        // P1 -> P2 -> (idle) -> P1
        assert_eq!(t.context_switches(), 2);
    }

    #[test]
    fn test_completion_order() {
        let t = sample_timeline();
        assert_eq!(t.completion_order(), vec![ProcessId(2), ProcessId(1)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample_timeline().to_string(),
            "P1:0-2 | P2:2-4 | IDLE:4-5 | P1:5-7"
        );
    }

    #[test]
    fn test_builder_merges_idle_and_continuation() {
        let mut b = TimelineBuilder::new();
        b.idle_until(1);
        b.idle_until(3);
        b.continue_running(ProcessId(1), 4);
        b.continue_running(ProcessId(1), 6);
        let t = b.finish();
        assert_eq!(
            t.intervals,
            vec![Interval::idle(0, 3), Interval::process(1, 3, 6)]
        );
    }

    #[test]
    fn test_builder_dispatch_never_merges() {
        let mut b = TimelineBuilder::new();
        b.dispatch(ProcessId(1), 2);
        b.dispatch(ProcessId(1), 4);
        let t = b.finish();
        assert_eq!(
            t.intervals,
            vec![Interval::process(1, 0, 2), Interval::process(1, 2, 4)]
        );
    }

    #[test]
    fn test_builder_ignores_empty_idle() {
        let mut b = TimelineBuilder::new();
        b.dispatch(ProcessId(1), 2);
        b.idle_until(2);
        assert_eq!(b.finish().len(), 1);
    }
}
