//! Schedule quality metrics (KPIs).
//!
//! Computes standard CPU scheduling indicators from a problem and its
//! per-process outcomes.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Wait | Mean time ready but not running |
//! | Max Wait | Largest single wait |
//! | Avg Turnaround | Mean(finish - arrival) |
//! | Makespan | Latest finish time |
//! | Throughput | Processes completed per time unit |
//! | CPU Utilization | Busy time / (makespan - first arrival) |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{Outcome, Problem};

/// CPU schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Mean wait time.
    pub avg_wait: f64,
    /// Largest wait time of any process.
    pub max_wait: u64,
    /// Mean turnaround time (finish - arrival).
    pub avg_turnaround: f64,
    /// Latest finish time.
    pub makespan: u64,
    /// Processes completed per time unit, measured from the first arrival.
    pub throughput: f64,
    /// Fraction of time the CPU was busy, measured from the first arrival (0.0..1.0).
    pub cpu_utilization: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a problem and its outcomes.
    ///
    /// # Arguments
    /// * `problem` - The solved problem (for arrival and burst times).
    /// * `outcomes` - One outcome per process, in process order.
    ///
    /// # Panics
    /// If `outcomes` does not have one entry per process.
    pub fn calculate(problem: &Problem, outcomes: &[Outcome]) -> Self {
        assert_eq!(
            outcomes.len(),
            problem.process_count(),
            "one outcome per process expected"
        );

        let n = outcomes.len() as f64;
        let processes = problem.processes();

        // Summed as f64: per-process times fit in u64, their sum may not
        let total_wait: f64 = outcomes.iter().map(|o| o.wait_time as f64).sum();
        let max_wait = outcomes.iter().map(|o| o.wait_time).max().unwrap_or(0);
        let total_turnaround: f64 = outcomes
            .iter()
            .zip(processes)
            .map(|(o, p)| o.turnaround_time(p) as f64)
            .sum();

        let makespan = outcomes.iter().map(|o| o.finish_time).max().unwrap_or(0);
        let first_arrival = processes.iter().map(|p| p.arrival).min().unwrap_or(0);
        let span = makespan.saturating_sub(first_arrival);

        let (throughput, cpu_utilization) = if span == 0 {
            (0.0, 0.0)
        } else {
            (n / span as f64, problem.total_burst() as f64 / span as f64)
        };

        Self {
            avg_wait: total_wait / n,
            max_wait,
            avg_turnaround: total_turnaround / n,
            makespan,
            throughput,
            cpu_utilization,
        }
    }
}
