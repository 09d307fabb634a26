//! Input validation for simulation runs.
//!
//! Checks structural integrity of the process set and the policy
//! parameters before anything is scheduled. Detects:
//! - Empty process sets
//! - Duplicate process IDs
//! - Zero burst times
//! - Time horizons beyond the signed tick range
//! - Missing or zero Round Robin quantum
//! - Processes without a priority under the priority policy
//!
//! Every check runs; all problems are reported together.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::NonZeroU64;
use tracing::warn;

use crate::dispatching::Policy;
use crate::models::Process;

/// Validation result.
pub type ValidationResult<T = ()> = Result<T, Vec<ValidationError>>;

/// Largest tick a run may reach. Metrics are signed, so the clock stays
/// within `i64`.
pub const MAX_TIME: u64 = i64::MAX as u64;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyProcessSet,
    /// Two processes share the same ID.
    DuplicateId,
    /// A process needs no CPU time.
    NonPositiveBurst,
    /// Round Robin was selected without a quantum.
    MissingQuantum,
    /// Round Robin quantum is zero.
    NonPositiveQuantum,
    /// Priority scheduling was selected but a process has no priority.
    MissingPriority,
    /// Times would run past [`MAX_TIME`].
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the process set itself.
///
/// Checks:
/// 1. At least one process
/// 2. No duplicate process IDs
/// 3. Every burst time is positive
/// 4. The latest arrival plus all bursts stays within [`MAX_TIME`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessSet,
            "Process set is empty",
        ));
    }

    let mut ids = HashSet::new();
    for p in processes {
        if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.burst_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has a zero burst time", p.id),
            ));
        }
    }

    // Bounds every clock value any policy can reach.
    let horizon = processes
        .iter()
        .map(|p| p.arrival_time)
        .max()
        .and_then(|last| {
            processes
                .iter()
                .try_fold(last, |t, p| t.checked_add(p.burst_time))
        });
    if !processes.is_empty() && horizon.map_or(true, |h| h > MAX_TIME) {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            format!("Latest arrival plus total burst exceeds {MAX_TIME} ticks"),
        ));
    }

    finish(errors, ())
}

/// Validates the parameters a policy needs.
///
/// Checks:
/// 1. Round Robin has a positive quantum (other policies ignore it)
/// 2. Priority scheduling has a priority on every process
///
/// # Returns
/// The checked quantum when the policy uses one, `None` otherwise.
pub fn validate_policy(
    processes: &[Process],
    policy: Policy,
    quantum: Option<u64>,
) -> ValidationResult<Option<NonZeroU64>> {
    let mut errors = Vec::new();
    let mut checked = None;

    if policy.requires_quantum() {
        match quantum.map(NonZeroU64::new) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingQuantum,
                format!("{policy} requires a time quantum"),
            )),
            Some(None) => errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!("{policy} quantum must be positive"),
            )),
            Some(q) => checked = q,
        }
    }

    if policy.requires_priority() {
        for p in processes.iter().filter(|p| p.priority.is_none()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingPriority,
                format!("Process '{}' has no priority", p.id),
            ));
        }
    }

    finish(errors, checked)
}

fn finish<T>(errors: Vec<ValidationError>, value: T) -> ValidationResult<T> {
    if errors.is_empty() {
        Ok(value)
    } else {
        warn!(count = errors.len(), "rejected simulation input");
        Err(errors)
    }
}
