//! Error types for simulation runs.

use thiserror::Error;

use crate::models::ProcessId;
use crate::validation::ValidationError;

/// Errors terminating a single simulation run.
///
/// Neither variant poisons anything beyond the current run; callers may
/// retry with corrected input or another policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// Input rejected: a malformed process set, missing policy parameters,
    /// or times beyond the signed tick range.
    #[error("invalid configuration: {}", join_messages(.0))]
    InvalidConfiguration(Vec<ValidationError>),

    /// The timeline never ran this process. Indicates an engine defect.
    #[error("incomplete schedule: {0} never appears in the timeline")]
    IncompleteSchedule(ProcessId),
}

impl ScheduleError {
    /// Validation problems carried by an `InvalidConfiguration`.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidConfiguration(errors) => errors,
            Self::IncompleteSchedule(_) => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_configuration_message() {
        let err = ScheduleError::InvalidConfiguration(vec![
            ValidationError::new(ValidationErrorKind::EmptyProcessSet, "No processes"),
            ValidationError::new(ValidationErrorKind::MissingQuantum, "Quantum required"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid configuration: No processes; Quantum required"
        );
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_incomplete_schedule_message() {
        let err = ScheduleError::IncompleteSchedule(ProcessId(4));
        assert_eq!(
            err.to_string(),
            "incomplete schedule: P4 never appears in the timeline"
        );
        assert!(err.validation_errors().is_empty());
    }
}
