//! Random problem generation.
//!
//! # Algorithm
//!
//! 1. Draw `n` distinct arrival times from `[1, max_time)` without replacement.
//! 2. For each arrival, draw a burst uniformly from `[1, limit]`, where the
//!    limit is the arrival time itself ([`BurstLimit::ArrivalTime`]) or a
//!    fixed maximum ([`BurstLimit::Max`]).
//! 3. For round robin, draw a quantum uniformly from
//!    `[min_quantum, max_quantum]`.
//!
//! Generated problems are not checked for an "interesting" answer; many
//! instances have little or no waiting.
//!
//! Randomness is always supplied by the caller, so a seeded generator
//! reproduces the same problem.

use log::debug;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Discipline, Problem, Process};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Upper bound for generated burst times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurstLimit {
    /// Burst never exceeds the process's arrival time.
    #[default]
    ArrivalTime,
    /// Burst is drawn from `[1, max]`, independent of arrival.
    Max(u64),
}

/// Generator configuration.
///
/// Missing fields take their defaults when deserialized, so
/// `{"max_time": 30}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Arrival times are drawn from `[1, max_time)` (default: 20).
    pub max_time: u64,
    /// Smallest round-robin quantum, inclusive (default: 2).
    pub min_quantum: u64,
    /// Largest round-robin quantum, inclusive (default: 5).
    pub max_quantum: u64,
    /// Burst time bound (default: [`BurstLimit::ArrivalTime`]).
    pub burst_limit: BurstLimit,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_time: 20,
            min_quantum: 2,
            max_quantum: 5,
            burst_limit: BurstLimit::ArrivalTime,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exclusive upper bound for arrival times.
    pub fn with_max_time(mut self, max_time: u64) -> Self {
        self.max_time = max_time;
        self
    }

    /// Sets the inclusive quantum range.
    pub fn with_quantum_range(mut self, min_quantum: u64, max_quantum: u64) -> Self {
        self.min_quantum = min_quantum;
        self.max_quantum = max_quantum;
        self
    }

    /// Sets the burst time bound.
    pub fn with_burst_limit(mut self, burst_limit: BurstLimit) -> Self {
        self.burst_limit = burst_limit;
        self
    }

    /// Checks that `process_count` processes can be generated.
    ///
    /// The quantum range is checked regardless of discipline so one
    /// configuration is valid for all of them.
    pub fn validate(&self, process_count: usize) -> Result<(), ValidationError> {
        let invalid = |message: String| {
            Err(ValidationError::new(ValidationErrorKind::InvalidConfig, message))
        };

        if self.max_time < 2 {
            return invalid(format!("max_time must be at least 2, got {}", self.max_time));
        }
        let slots = self.max_time - 1;
        if usize::try_from(slots).is_err() {
            return invalid(format!(
                "max_time {} exceeds the addressable range of this platform",
                self.max_time
            ));
        }
        if process_count as u64 > slots {
            return invalid(format!(
                "{process_count} processes need distinct arrivals, only {slots} available"
            ));
        }
        if self.min_quantum == 0 {
            return invalid("min_quantum must be positive".to_string());
        }
        if self.min_quantum > self.max_quantum {
            return invalid(format!(
                "Quantum range [{}, {}] is empty",
                self.min_quantum, self.max_quantum
            ));
        }
        if self.burst_limit == BurstLimit::Max(0) {
            return invalid("Burst limit must be positive".to_string());
        }
        Ok(())
    }

    /// Generates a random problem.
    ///
    /// # Errors
    /// `InvalidConfig` if the configuration cannot produce `process_count`
    /// processes, `EmptyProblem` if `process_count` is zero.
    pub fn generate<R: Rng>(
        &self,
        discipline: Discipline,
        process_count: usize,
        rng: &mut R,
    ) -> Result<Problem, ValidationError> {
        self.validate(process_count)?;

        let slots = usize::try_from(self.max_time - 1).map_err(|_| {
            ValidationError::new(
                ValidationErrorKind::InvalidConfig,
                format!("max_time {} does not fit in usize", self.max_time),
            )
        })?;
        let processes: Vec<Process> = index::sample(rng, slots, process_count)
            .into_iter()
            .map(|slot| {
                let arrival = slot as u64 + 1;
                let limit = match self.burst_limit {
                    BurstLimit::ArrivalTime => arrival,
                    BurstLimit::Max(max) => max,
                };
                Process::new(arrival, rng.random_range(1..=limit))
            })
            .collect();

        let quantum = if discipline.uses_quantum() {
            Some(rng.random_range(self.min_quantum..=self.max_quantum))
        } else {
            None
        };

        debug!(
            "generated {discipline} problem with {process_count} processes, quantum {quantum:?}"
        );
        Problem::new(discipline, processes, quantum)
    }
}

impl Problem {
    /// Generates a random problem. See [`GeneratorConfig::generate`].
    pub fn generate<R: Rng>(
        discipline: Discipline,
        process_count: usize,
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<Problem, ValidationError> {
        config.generate(discipline, process_count, rng)
    }
}
