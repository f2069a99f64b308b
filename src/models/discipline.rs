//! Scheduling discipline model.
//!
//! A discipline decides which ready process gets the CPU next and whether
//! a running process can be interrupted.
//!
//! | Discipline | Selection | Preemptive |
//! |------------|-----------|------------|
//! | FCFS | Arrival order | No |
//! | SJF | Smallest remaining time | No |
//! | SRTF | Smallest remaining time | On arrival |
//! | RR | Arrival order, time-sliced | On quantum expiry |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{ValidationError, ValidationErrorKind};

/// A CPU scheduling discipline.
///
/// Serialized as the fixed tokens `FCFS`, `SJF`, `SRTF` and `RR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    /// First come, first served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest job first (non-preemptive).
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest remaining time first (preemptive SJF).
    #[serde(rename = "SRTF")]
    Srtf,
    /// Round robin with a fixed quantum.
    #[serde(rename = "RR")]
    RoundRobin,
}

impl Discipline {
    /// All disciplines, in declaration order.
    pub const ALL: [Discipline; 4] = [
        Discipline::Fcfs,
        Discipline::Sjf,
        Discipline::Srtf,
        Discipline::RoundRobin,
    ];

    /// Wire token for this discipline.
    pub fn token(self) -> &'static str {
        match self {
            Discipline::Fcfs => "FCFS",
            Discipline::Sjf => "SJF",
            Discipline::Srtf => "SRTF",
            Discipline::RoundRobin => "RR",
        }
    }

    /// Whether the discipline needs a time quantum.
    pub fn uses_quantum(self) -> bool {
        self == Discipline::RoundRobin
    }

    /// Whether ready processes are served from a FIFO queue.
    pub fn uses_queue(self) -> bool {
        matches!(self, Discipline::Fcfs | Discipline::RoundRobin)
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Discipline {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Discipline::ALL
            .into_iter()
            .find(|d| d.token() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    ValidationErrorKind::UnknownDiscipline,
                    format!("Unknown discipline '{s}'"),
                )
            })
    }
}
