//! Scheduling problem model.
//!
//! A problem is a discipline, an ordered list of processes and, for round
//! robin, a time quantum. It is validated once at construction and never
//! changes afterwards.
//!
//! # Wire Format
//!
//! Problems travel across request boundaries as JSON:
//!
//! ```json
//! {"discipline":"RR","processes":[[1,3],[4,2]],"quantum":3}
//! ```
//!
//! `quantum` is omitted for disciplines that do not use one.

use serde::{Deserialize, Serialize};

use super::{Discipline, Process};
use crate::validation::{validate_problem, ValidationError, ValidationErrorKind};

/// An immutable scheduling problem.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::{Discipline, Problem, Process};
///
/// let problem = Problem::new(
///     Discipline::RoundRobin,
///     vec![Process::new(0, 5), Process::new(1, 3)],
///     Some(2),
/// )
/// .unwrap();
///
/// let restored = Problem::from_json(&problem.to_json()).unwrap();
/// assert_eq!(restored, problem);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProblemRecord", into = "ProblemRecord")]
pub struct Problem {
    discipline: Discipline,
    processes: Vec<Process>,
    quantum: Option<u64>,
}

impl Problem {
    /// Creates a validated problem.
    ///
    /// A quantum supplied for a discipline other than round robin is dropped.
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] reported by
    /// [`validate_problem`](crate::validation::validate_problem).
    pub fn new(
        discipline: Discipline,
        processes: Vec<Process>,
        quantum: Option<u64>,
    ) -> Result<Self, ValidationError> {
        if let Err(mut errors) = validate_problem(discipline, &processes, quantum) {
            return Err(errors.swap_remove(0));
        }
        let quantum = if discipline.uses_quantum() {
            quantum
        } else {
            None
        };
        Ok(Self {
            discipline,
            processes,
            quantum,
        })
    }

    /// Scheduling discipline.
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Processes in index order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Process at `index`.
    pub fn process(&self, index: usize) -> Option<&Process> {
        self.processes.get(index)
    }

    /// Number of processes.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Round-robin quantum. `None` for other disciplines.
    pub fn quantum(&self) -> Option<u64> {
        self.quantum
    }

    /// Sum of all burst times.
    pub fn total_burst(&self) -> u64 {
        self.processes.iter().map(|p| p.burst).sum()
    }

    /// Same processes under another discipline.
    pub fn with_discipline(
        &self,
        discipline: Discipline,
        quantum: Option<u64>,
    ) -> Result<Self, ValidationError> {
        Self::new(discipline, self.processes.clone(), quantum)
    }

    /// Serializes to the JSON wire format.
    pub fn to_json(&self) -> String {
        let record = ProblemRecord::from(self.clone());
        // A record of strings and integers always serializes.
        serde_json::to_string(&record).expect("problem record serializes")
    }

    /// Parses the JSON wire format.
    ///
    /// # Errors
    /// - `Malformed`: not JSON, missing fields, non-integer or negative times
    /// - `UnknownDiscipline`: discipline token not recognized
    /// - `MissingQuantum`, `ZeroQuantum`, `EmptyProblem`, `ZeroBurst`: see [`Problem::new`]
    pub fn from_json(payload: &str) -> Result<Self, ValidationError> {
        let record: ProblemRecord = serde_json::from_str(payload).map_err(|e| {
            ValidationError::new(
                ValidationErrorKind::Malformed,
                format!("Invalid problem payload: {e}"),
            )
        })?;
        Self::try_from(record)
    }
}

/// Wire representation of a problem.
///
/// Keeps the discipline as a raw token so unknown tokens are reported
/// as `UnknownDiscipline` rather than a generic decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProblemRecord {
    discipline: String,
    processes: Vec<Process>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quantum: Option<u64>,
}

impl TryFrom<ProblemRecord> for Problem {
    type Error = ValidationError;

    fn try_from(record: ProblemRecord) -> Result<Self, Self::Error> {
        let discipline = record.discipline.parse::<Discipline>()?;
        Problem::new(discipline, record.processes, record.quantum)
    }
}

impl From<Problem> for ProblemRecord {
    fn from(problem: Problem) -> Self {
        Self {
            discipline: problem.discipline.token().to_string(),
            processes: problem.processes,
            quantum: problem.quantum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_processes() -> Vec<Process> {
        vec![Process::new(3, 2), Process::new(1, 1), Process::new(3, 3)]
    }

    #[test]
    fn test_new_drops_unused_quantum() {
        let problem = Problem::new(Discipline::Sjf, sample_processes(), Some(4)).unwrap();
        assert_eq!(problem.quantum(), None);
        assert_eq!(problem.process_count(), 3);
        assert_eq!(problem.total_burst(), 6);
        assert_eq!(problem.process(1), Some(&Process::new(1, 1)));
        assert_eq!(problem.process(3), None);
    }

    #[test]
    fn test_new_rejects_degenerate() {
        let err = Problem::new(Discipline::Fcfs, vec![], None).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::EmptyProblem);

        let err = Problem::new(Discipline::Fcfs, vec![Process::new(0, 0)], None).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::ZeroBurst);

        let err = Problem::new(Discipline::RoundRobin, sample_processes(), None).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MissingQuantum);
    }

    #[test]
    fn test_json_roundtrip() {
        for (discipline, quantum) in [
            (Discipline::Fcfs, None),
            (Discipline::Sjf, None),
            (Discipline::Srtf, None),
            (Discipline::RoundRobin, Some(3)),
        ] {
            let problem = Problem::new(discipline, sample_processes(), quantum).unwrap();
            let restored = Problem::from_json(&problem.to_json()).unwrap();
            assert_eq!(restored, problem);
        }
    }

    #[test]
    fn test_json_shape() {
        let problem = Problem::new(Discipline::RoundRobin, sample_processes(), Some(2)).unwrap();
        assert_eq!(
            problem.to_json(),
            r#"{"discipline":"RR","processes":[[3,2],[1,1],[3,3]],"quantum":2}"#
        );

        let problem = Problem::new(Discipline::Fcfs, sample_processes(), None).unwrap();
        assert_eq!(
            problem.to_json(),
            r#"{"discipline":"FCFS","processes":[[3,2],[1,1],[3,3]]}"#
        );
    }

    #[test]
    fn test_from_json_ignores_quantum_for_non_rr() {
        let problem =
            Problem::from_json(r#"{"discipline":"SRTF","processes":[[1,2]],"quantum":0}"#)
                .unwrap();
        assert_eq!(problem.discipline(), Discipline::Srtf);
        assert_eq!(problem.quantum(), None);
    }

    #[test]
    fn test_from_json_errors() {
        let cases = [
            ("not json", ValidationErrorKind::Malformed),
            (r#"{"discipline":"RR"}"#, ValidationErrorKind::Malformed),
            (
                r#"{"discipline":"FCFS","processes":[[1,"2"]]}"#,
                ValidationErrorKind::Malformed,
            ),
            (
                r#"{"discipline":"FCFS","processes":[[-1,2]]}"#,
                ValidationErrorKind::Malformed,
            ),
            (
                r#"{"discipline":"PRIO","processes":[[1,2]]}"#,
                ValidationErrorKind::UnknownDiscipline,
            ),
            (
                r#"{"discipline":"RR","processes":[[1,2]]}"#,
                ValidationErrorKind::MissingQuantum,
            ),
            (
                r#"{"discipline":"RR","processes":[[1,2]],"quantum":0}"#,
                ValidationErrorKind::ZeroQuantum,
            ),
            (
                r#"{"discipline":"SJF","processes":[]}"#,
                ValidationErrorKind::EmptyProblem,
            ),
            (
                r#"{"discipline":"SJF","processes":[[4,0]]}"#,
                ValidationErrorKind::ZeroBurst,
            ),
        ];

        for (payload, kind) in cases {
            let err = Problem::from_json(payload).unwrap_err();
            assert_eq!(err.kind, kind, "payload: {payload}");
        }
    }

    #[test]
    fn test_embedded_serde_validates() {
        #[derive(Serialize, Deserialize)]
        struct Challenge {
            id: u32,
            problem: Problem,
        }

        let challenge = Challenge {
            id: 7,
            problem: Problem::new(Discipline::Sjf, sample_processes(), None).unwrap(),
        };
        let json = serde_json::to_string(&challenge).unwrap();
        let back: Challenge = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 7);
        assert_eq!(back.problem, challenge.problem);

        let bad = r#"{"id":1,"problem":{"discipline":"RR","processes":[[1,2]]}}"#;
        assert!(serde_json::from_str::<Challenge>(bad).is_err());
    }

    #[test]
    fn test_with_discipline() {
        let problem = Problem::new(Discipline::Fcfs, sample_processes(), None).unwrap();
        let rr = problem.with_discipline(Discipline::RoundRobin, Some(5)).unwrap();
        assert_eq!(rr.processes(), problem.processes());
        assert_eq!(rr.quantum(), Some(5));
        assert!(problem.with_discipline(Discipline::RoundRobin, None).is_err());
    }
}
