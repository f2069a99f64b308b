//! CPU scheduling solver and KPI evaluation.
//!
//! [`Solver`] runs a discrete-event simulation of one [`Problem`] under its
//! discipline and derives each process's finish and wait time from the
//! resulting [`EventLog`].
//!
//! # Determinism
//!
//! Every selection breaks ties by lowest process index: the initial
//! process among equal arrivals, simultaneous arrivals, and equal remaining
//! times under SJF/SRTF. The same problem always yields the same answer.
//!
//! # KPI
//!
//! [`ScheduleKpi`] summarises a solved problem: average wait, average
//! turnaround, makespan, throughput and CPU utilization.

mod kpi;
mod selection;
mod simulation;

use std::fmt;
use std::mem;

use log::debug;

use crate::event_log::EventLog;
use crate::models::{Outcome, Problem};
use simulation::Simulation;

pub use kpi::ScheduleKpi;

/// Misuse of a [`Solver`]'s lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// `solve` or `simulate` called on a solver that already ran.
    AlreadySolved,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::AlreadySolved => f.write_str("problem has already been solved"),
        }
    }
}

impl std::error::Error for StateError {}

#[derive(Debug)]
enum SolverState {
    Ready(Problem),
    Solved,
}

/// Single-use scheduling solver.
///
/// The problem is consumed by the first call to [`solve`](Self::solve) or
/// [`simulate`](Self::simulate); later calls fail with
/// [`StateError::AlreadySolved`].
///
/// # Example
///
/// ```
/// use cpu_schedule::models::{Discipline, Outcome, Problem, Process};
/// use cpu_schedule::scheduler::{Solver, StateError};
///
/// let problem = Problem::new(
///     Discipline::Srtf,
///     vec![Process::new(0, 9), Process::new(1, 4), Process::new(2, 9)],
///     None,
/// )
/// .unwrap();
///
/// let mut solver = Solver::new(problem);
/// let outcomes = solver.solve().unwrap();
/// assert_eq!(outcomes[1], Outcome::new(5, 0));
/// assert_eq!(solver.solve(), Err(StateError::AlreadySolved));
/// ```
#[derive(Debug)]
pub struct Solver {
    state: SolverState,
}

impl Solver {
    /// Creates a solver for `problem`.
    pub fn new(problem: Problem) -> Self {
        Self {
            state: SolverState::Ready(problem),
        }
    }

    /// Finish and wait time of every process, in process order.
    pub fn solve(&mut self) -> Result<Vec<Outcome>, StateError> {
        Ok(self.simulate()?.outcomes())
    }

    /// Runs the simulation and returns its event log.
    pub fn simulate(&mut self) -> Result<EventLog, StateError> {
        let problem = match mem::replace(&mut self.state, SolverState::Solved) {
            SolverState::Ready(problem) => problem,
            SolverState::Solved => return Err(StateError::AlreadySolved),
        };

        debug!(
            "simulating {} problem with {} processes",
            problem.discipline(),
            problem.process_count()
        );
        let log = Simulation::new(&problem).run();
        debug!("simulation finished with {} events", log.len());
        Ok(log)
    }

    /// Whether the solver has already run.
    pub fn is_solved(&self) -> bool {
        matches!(self.state, SolverState::Solved)
    }
}
