//! Single-CPU scheduling engine.
//!
//! # Algorithm
//!
//! Every policy drives the same loop over a [`RunContext`]:
//! 1. Admit processes whose arrival time has been reached.
//! 2. Pick the next process (rule minimum or queue front).
//! 3. If nothing is ready, leave the CPU idle until the next arrival.
//! 4. Run the pick for its slice and record it on the timeline.
//!
//! Non-preemptive policies run each pick to completion. Round Robin runs
//! `min(quantum, remaining)`. SRTF runs until the pick completes or the next
//! arrival, whichever is first, then re-evaluates.
//!
//! # Complexity
//! O(n^2) for the selection-based policies (linear scan per decision);
//! O(n + total_burst / quantum) for Round Robin.

use std::collections::VecDeque;
use std::num::NonZeroU64;

use tracing::{debug, trace};

use crate::dispatching::rules::{Fifo, Priority, Spt, Srpt};
use crate::dispatching::{DispatchingRule, Policy, RunContext};
use crate::error::ScheduleError;
use crate::models::{ProcessTable, Timeline, TimelineBuilder};
use crate::validation::{validate_policy, ValidationError, ValidationErrorKind};

/// Runs one simulation and returns its timeline.
///
/// `quantum` is required (and must be positive) for Round Robin and ignored
/// by every other policy.
///
/// # Errors
/// `ScheduleError::InvalidConfiguration` when the policy's parameters are
/// missing: no or zero quantum for Round Robin, a process without priority
/// for priority scheduling. Nothing is scheduled in that case.
///
/// # Example
///
/// ```
/// use cpu_schedule::dispatching::Policy;
/// use cpu_schedule::models::{Interval, Process, ProcessTable};
/// use cpu_schedule::scheduler::simulate;
///
/// let table = ProcessTable::new(vec![
///     Process::new(1, 0, 4),
///     Process::new(2, 1, 3),
///     Process::new(3, 2, 1),
/// ]).unwrap();
///
/// let timeline = simulate(&table, Policy::Fcfs, None).unwrap();
/// assert_eq!(timeline.intervals, vec![
///     Interval::process(1, 0, 4),
///     Interval::process(2, 4, 7),
///     Interval::process(3, 7, 8),
/// ]);
/// ```
pub fn simulate(
    processes: &ProcessTable,
    policy: Policy,
    quantum: Option<u64>,
) -> Result<Timeline, ScheduleError> {
    let checked_quantum = validate_policy(processes.as_slice(), policy, quantum)
        .map_err(ScheduleError::InvalidConfiguration)?;

    debug!(
        %policy,
        processes = processes.len(),
        total_burst = processes.total_burst(),
        ?quantum,
        "simulation started"
    );

    let timeline = match (policy, checked_quantum) {
        (Policy::Fcfs, _) => fcfs(processes),
        (Policy::Sjf, _) => sjf(processes),
        (Policy::Priority, _) => priority(processes),
        (Policy::RoundRobin, Some(quantum)) => round_robin(processes, quantum),
        (Policy::RoundRobin, None) => {
            return Err(ScheduleError::InvalidConfiguration(vec![ValidationError::new(
                ValidationErrorKind::MissingQuantum,
                format!("{policy} requires a time quantum"),
            )]))
        }
        (Policy::Srtf, _) => srtf(processes),
    };

    debug!(
        %policy,
        makespan = timeline.makespan(),
        intervals = timeline.len(),
        "simulation finished"
    );
    Ok(timeline)
}

/// First Come First Serve.
pub(crate) fn fcfs(processes: &ProcessTable) -> Timeline {
    run_to_completion(processes, &Fifo)
}

/// Shortest Job First (non-preemptive).
pub(crate) fn sjf(processes: &ProcessTable) -> Timeline {
    run_to_completion(processes, &Spt)
}

/// Non-preemptive priority scheduling (lower value first).
pub(crate) fn priority(processes: &ProcessTable) -> Timeline {
    run_to_completion(processes, &Priority)
}

/// Non-preemptive selection loop shared by FCFS, SJF and priority.
///
/// The pick runs its whole burst as one interval; arrivals during that
/// burst wait for the next decision.
fn run_to_completion<R: DispatchingRule>(processes: &ProcessTable, rule: &R) -> Timeline {
    let mut ctx = RunContext::new(processes);
    let mut timeline = TimelineBuilder::new();
    let mut ready: Vec<usize> = Vec::new();

    while !ctx.all_completed() {
        ready.extend(ctx.admit_through(ctx.now()));

        let Some(pos) = ctx.select_best(rule, &ready) else {
            if !idle_until_next_arrival(&mut ctx, &mut timeline) {
                break;
            }
            continue;
        };

        let index = ready.swap_remove(pos);
        let process = ctx.process(index);
        trace!(rule = rule.name(), process = %process.id, at = ctx.now(), "dispatch");

        timeline.dispatch(process.id, ctx.now() + process.burst_time);
        ctx.run(index, process.burst_time);
    }

    timeline.finish()
}

/// Round Robin with a fixed quantum.
///
/// After a slice, processes that arrived strictly before the slice ended
/// join the queue first, then the preempted process. A process arriving
/// exactly at the boundary queues behind it.
pub(crate) fn round_robin(processes: &ProcessTable, quantum: NonZeroU64) -> Timeline {
    let quantum = quantum.get();
    let mut ctx = RunContext::new(processes);
    let mut timeline = TimelineBuilder::new();
    let mut queue: VecDeque<usize> = VecDeque::new();

    while !ctx.all_completed() {
        queue.extend(ctx.admit_through(ctx.now()));

        let Some(index) = queue.pop_front() else {
            if !idle_until_next_arrival(&mut ctx, &mut timeline) {
                break;
            }
            continue;
        };

        let process = ctx.process(index);
        let slice = quantum.min(ctx.remaining(index));
        let end = ctx.now() + slice;
        trace!(process = %process.id, at = ctx.now(), slice, "dispatch");

        timeline.dispatch(process.id, end);
        let finished = ctx.run(index, slice);

        queue.extend(ctx.admit_before(end));
        if !finished {
            trace!(process = %process.id, at = end, "quantum expired");
            queue.push_back(index);
        }
    }

    timeline.finish()
}

/// Shortest Remaining Time First.
///
/// Decisions happen at completions and arrivals only; between two events
/// no remaining time changes order. A newcomer takes the CPU only with a
/// strictly smaller remaining time, since it loses every tie on arrival.
pub(crate) fn srtf(processes: &ProcessTable) -> Timeline {
    let mut ctx = RunContext::new(processes);
    let mut timeline = TimelineBuilder::new();
    let mut ready: Vec<usize> = Vec::new();
    let mut running: Option<usize> = None;

    while !ctx.all_completed() {
        ready.extend(ctx.admit_through(ctx.now()));

        let Some(pos) = ctx.select_best(&Srpt, &ready) else {
            running = None;
            if !idle_until_next_arrival(&mut ctx, &mut timeline) {
                break;
            }
            continue;
        };

        let index = ready[pos];
        let process = ctx.process(index);
        if let Some(prev) = running.filter(|&prev| prev != index) {
            trace!(
                preempted = %ctx.process(prev).id,
                by = %process.id,
                at = ctx.now(),
                "preemption"
            );
        }

        let completion = ctx.now() + ctx.remaining(index);
        let end = ctx
            .next_arrival()
            .map_or(completion, |arrival| arrival.min(completion));

        timeline.continue_running(process.id, end);
        if ctx.run(index, end - ctx.now()) {
            ready.swap_remove(pos);
            running = None;
        } else {
            running = Some(index);
        }
    }

    timeline.finish()
}

/// Idles the CPU until the next arrival.
///
/// Returns `false` when nobody is left to arrive.
fn idle_until_next_arrival(ctx: &mut RunContext<'_>, timeline: &mut TimelineBuilder) -> bool {
    match ctx.next_arrival() {
        Some(arrival) => {
            trace!(from = ctx.now(), until = arrival, "idle");
            timeline.idle_until(arrival);
            ctx.advance_to(arrival);
            true
        }
        None => false,
    }
}
