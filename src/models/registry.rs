//! Validated process set.

use serde::Serialize;
use std::collections::HashMap;

use super::{Process, ProcessId};
use crate::error::ScheduleError;
use crate::validation::validate_processes;

/// A validated, non-empty set of processes with unique ids.
///
/// Keeps input order; the metrics report follows it.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessTable {
    processes: Vec<Process>,
    #[serde(skip)]
    index: HashMap<ProcessId, usize>,
}

impl ProcessTable {
    /// Validates and registers the given processes.
    ///
    /// # Errors
    /// `ScheduleError::InvalidConfiguration` listing every structural
    /// problem (empty set, duplicate ids, zero bursts).
    pub fn new(processes: Vec<Process>) -> Result<Self, ScheduleError> {
        validate_processes(&processes).map_err(ScheduleError::InvalidConfiguration)?;
        let index = processes
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
        Ok(Self { processes, index })
    }

    /// Looks up a process by id.
    pub fn get(&self, id: ProcessId) -> Option<&Process> {
        self.index.get(&id).map(|&i| &self.processes[i])
    }

    /// Position of a process in input order.
    pub fn position(&self, id: ProcessId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// All processes in input order.
    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Sum of all burst times.
    pub fn total_burst(&self) -> u64 {
        self.processes.iter().map(|p| p.burst_time).sum()
    }

    /// Largest burst time.
    pub fn max_burst(&self) -> u64 {
        self.processes
            .iter()
            .map(|p| p.burst_time)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_table_lookup() {
        let table = ProcessTable::new(vec![Process::new(3, 0, 4), Process::new(1, 2, 6)]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(ProcessId(1)).unwrap().burst_time, 6);
        assert_eq!(table.position(ProcessId(3)), Some(0));
        assert!(table.get(ProcessId(9)).is_none());
    }

    #[test]
    fn test_table_aggregates() {
        let table = ProcessTable::new(vec![
            Process::new(1, 5, 4),
            Process::new(2, 2, 6),
            Process::new(3, 9, 1),
        ])
        .unwrap();
        assert_eq!(table.total_burst(), 11);
        assert_eq!(table.max_burst(), 6);
    }

    #[test]
    fn test_table_rejects_invalid_input() {
        let err = ProcessTable::new(vec![Process::new(1, 0, 4), Process::new(1, 1, 0)])
            .unwrap_err();
        match err {
            ScheduleError::InvalidConfiguration(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::DuplicateId));
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::NonPositiveBurst));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
