//! Input validation for scheduling problems.
//!
//! Checks structural integrity of a problem before it reaches the
//! simulator. Detects:
//! - Problems with no processes
//! - Processes that need no CPU time (zero burst)
//! - Round-robin problems without a usable quantum
//! - Time values too large for the simulation clock
//!
//! Decoding and generator configuration errors share the same error type,
//! so callers only ever see one kind of validation failure.

use std::fmt;

use crate::models::{Discipline, Process};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The problem has no processes.
    EmptyProblem,
    /// A process has a burst time of zero.
    ZeroBurst,
    /// Round-robin problem without a quantum.
    MissingQuantum,
    /// Round-robin quantum of zero.
    ZeroQuantum,
    /// Discipline token is not one of `FCFS`, `SJF`, `SRTF`, `RR`.
    UnknownDiscipline,
    /// Serialized text could not be decoded.
    Malformed,
    /// Generator configuration cannot produce a problem.
    InvalidConfig,
    /// Latest arrival plus total burst does not fit in a `u64` clock.
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

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the parts of a scheduling problem.
///
/// Checks:
/// 1. At least one process
/// 2. Every burst time is positive
/// 3. Round-robin has a quantum, and it is positive
/// 4. Latest arrival + total burst fits in `u64`, which bounds every
///    finish time the simulator can reach
///
/// A quantum supplied for another discipline is not an error; it is ignored.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(
    discipline: Discipline,
    processes: &[Process],
    quantum: Option<u64>,
) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProblem,
            "Problem has no processes",
        ));
    }

    for (index, process) in processes.iter().enumerate() {
        if process.burst == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroBurst,
                format!("Process {index} has a burst time of zero"),
            ));
        }
    }

    let latest_arrival = processes.iter().map(|p| p.arrival).max().unwrap_or(0);
    let horizon = processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            format!("Latest arrival {latest_arrival} plus total burst exceeds {}", u64::MAX),
        ));
    }

    if discipline.uses_quantum() {
        match quantum {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingQuantum,
                format!("{discipline} problem requires a quantum"),
            )),
            Some(0) => errors.push(ValidationError::new(
                ValidationErrorKind::ZeroQuantum,
                "Quantum must be positive",
            )),
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
