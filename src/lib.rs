//! CPU process-scheduling simulator.
//!
//! Given a set of processes (arrival time, burst time) and a scheduling
//! discipline, computes each process's finish time and wait time by
//! discrete-event simulation.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Discipline`, `Process`, `Problem`, `Outcome`
//! - **`generator`**: Random problem generation with a caller-supplied RNG
//! - **`event_log`**: Snapshot log and finish/wait/timeline derivation
//! - **`scheduler`**: `Solver` (FCFS, SJF, SRTF, RR) and `ScheduleKpi`
//! - **`validation`**: Input integrity checks and the shared error type
//!
//! # Example
//!
//! ```
//! use cpu_schedule::models::{Discipline, Problem, Process};
//! use cpu_schedule::scheduler::Solver;
//!
//! let problem = Problem::new(
//!     Discipline::Fcfs,
//!     vec![Process::new(0, 5), Process::new(1, 3)],
//!     None,
//! )
//! .unwrap();
//!
//! let outcomes = Solver::new(problem).solve().unwrap();
//! assert_eq!(outcomes[1].finish_time, 8);
//! assert_eq!(outcomes[1].wait_time, 4);
//! ```
//!
//! # Logging
//!
//! Decisions are reported through the `log` facade (`debug` for dispatch
//! and preemption, `trace` for every recorded event). No logger is
//! installed by this crate.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod event_log;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod validation;
