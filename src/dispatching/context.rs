//! Per-run simulation state.

use tracing::trace;

use super::{DispatchingRule, SelectionKey};
use crate::models::{Process, ProcessTable};

/// Mutable state of one simulation run.
///
/// Owns the virtual clock and every process's remaining time. Built fresh
/// for each run, so runs over the same [`ProcessTable`] never interfere.
///
/// Processes are addressed by their index in the table.
#[derive(Debug)]
pub(crate) struct RunContext<'a> {
    processes: &'a [Process],
    now: u64,
    remaining: Vec<u64>,
    completed: usize,
    /// Table indices sorted by (arrival_time, id).
    arrivals: Vec<usize>,
    /// Next entry of `arrivals` not yet admitted.
    cursor: usize,
}

impl<'a> RunContext<'a> {
    pub(crate) fn new(table: &'a ProcessTable) -> Self {
        let processes = table.as_slice();
        let mut arrivals: Vec<usize> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&i| (processes[i].arrival_time, processes[i].id));
        Self {
            processes,
            now: 0,
            remaining: processes.iter().map(|p| p.burst_time).collect(),
            completed: 0,
            arrivals,
            cursor: 0,
        }
    }

    /// Current virtual time.
    #[inline]
    pub(crate) fn now(&self) -> u64 {
        self.now
    }

    #[inline]
    pub(crate) fn process(&self, index: usize) -> &'a Process {
        &self.processes[index]
    }

    #[inline]
    pub(crate) fn remaining(&self, index: usize) -> u64 {
        self.remaining[index]
    }

    pub(crate) fn all_completed(&self) -> bool {
        self.completed == self.processes.len()
    }

    /// Arrival time of the earliest process not yet admitted.
    pub(crate) fn next_arrival(&self) -> Option<u64> {
        self.arrivals
            .get(self.cursor)
            .map(|&i| self.processes[i].arrival_time)
    }

    /// Admits every process with `arrival_time <= t`, in arrival order.
    pub(crate) fn admit_through(&mut self, t: u64) -> Vec<usize> {
        self.admit_while(|p| p.has_arrived(t))
    }

    /// Admits every process with `arrival_time < t`, in arrival order.
    pub(crate) fn admit_before(&mut self, t: u64) -> Vec<usize> {
        self.admit_while(|p| p.arrival_time < t)
    }

    fn admit_while(&mut self, admit: impl Fn(&Process) -> bool) -> Vec<usize> {
        let start = self.cursor;
        while let Some(&i) = self.arrivals.get(self.cursor) {
            if !admit(&self.processes[i]) {
                break;
            }
            self.cursor += 1;
        }
        self.arrivals[start..self.cursor].to_vec()
    }

    /// Moves the clock forward to `t` without running anything.
    pub(crate) fn advance_to(&mut self, t: u64) {
        debug_assert!(t >= self.now, "clock must not run backwards");
        self.now = t;
    }

    /// Runs process `index` for `ticks`, advancing the clock.
    ///
    /// Returns `true` when the process finishes.
    pub(crate) fn run(&mut self, index: usize, ticks: u64) -> bool {
        let remaining = &mut self.remaining[index];
        debug_assert!(
            ticks > 0 && ticks <= *remaining,
            "slice of {ticks} exceeds remaining {remaining}"
        );
        *remaining -= ticks;
        self.now += ticks;

        let finished = *remaining == 0;
        if finished {
            self.completed += 1;
            trace!(process = %self.processes[index].id, at = self.now, "completed");
        }
        finished
    }

    /// Position in `ready` of the process `rule` ranks first.
    pub(crate) fn select_best<R: DispatchingRule>(
        &self,
        rule: &R,
        ready: &[usize],
    ) -> Option<usize> {
        ready
            .iter()
            .enumerate()
            .min_by_key(|&(_, &i)| self.key(rule, i))
            .map(|(pos, _)| pos)
    }

    pub(crate) fn key<R: DispatchingRule>(&self, rule: &R, index: usize) -> SelectionKey {
        rule.key(&self.processes[index], self.remaining[index])
    }
}
