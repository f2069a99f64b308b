//! Per-process result of a simulation.

use serde::{Deserialize, Serialize};

use super::Process;

/// Finish and wait time of one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    /// Time the process completed.
    pub finish_time: u64,
    /// Time spent ready but not running.
    pub wait_time: u64,
}

impl Outcome {
    /// Creates an outcome.
    pub fn new(finish_time: u64, wait_time: u64) -> Self {
        Self {
            finish_time,
            wait_time,
        }
    }

    /// Turnaround time (finish - arrival) for the process this outcome belongs to.
    ///
    /// Zero if paired with a process that arrives after this finish time.
    pub fn turnaround_time(&self, process: &Process) -> u64 {
        self.finish_time.saturating_sub(process.arrival)
    }
}

impl From<(u64, u64)> for Outcome {
    fn from((finish_time, wait_time): (u64, u64)) -> Self {
        Self::new(finish_time, wait_time)
    }
}
