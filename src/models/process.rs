//! Process model.
//!
//! A process is identified by its position in the problem's process list.
//! Only the static description lives here; remaining time is simulation
//! state owned by the solver.

use serde::{Deserialize, Serialize};

/// Static description of one process.
///
/// Serialized as a two-element array `[arrival, burst]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u64, u64)", into = "(u64, u64)")]
pub struct Process {
    /// Time the process becomes ready.
    pub arrival: u64,
    /// Total CPU time required.
    pub burst: u64,
}

impl Process {
    /// Creates a process description.
    pub fn new(arrival: u64, burst: u64) -> Self {
        Self { arrival, burst }
    }

    /// Earliest possible finish time (arrival + burst, no waiting).
    ///
    /// Saturates at `u64::MAX`; processes inside a validated
    /// [`Problem`](super::Problem) never reach it.
    pub fn earliest_finish(&self) -> u64 {
        self.arrival.saturating_add(self.burst)
    }
}

impl From<(u64, u64)> for Process {
    fn from((arrival, burst): (u64, u64)) -> Self {
        Self { arrival, burst }
    }
}

impl From<Process> for (u64, u64) {
    fn from(p: Process) -> Self {
        (p.arrival, p.burst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_as_pair() {
        let json = serde_json::to_string(&Process::new(4, 2)).unwrap();
        assert_eq!(json, "[4,2]");
        let p: Process = serde_json::from_str("[7,3]").unwrap();
        assert_eq!(p, Process::new(7, 3));
    }

    #[test]
    fn test_rejects_negative_and_fractional() {
        assert!(serde_json::from_str::<Process>("[-1,3]").is_err());
        assert!(serde_json::from_str::<Process>("[1.5,3]").is_err());
        assert!(serde_json::from_str::<Process>("[1]").is_err());
    }

    #[test]
    fn test_earliest_finish() {
        assert_eq!(Process::new(3, 4).earliest_finish(), 7);
        assert_eq!(Process::new(u64::MAX, 1).earliest_finish(), u64::MAX);
    }
}
