//! CPU scheduling domain models.
//!
//! Provides the data types for describing a scheduling problem and its
//! answer. Processes are identified by their index in the problem's
//! process list; the same index addresses their [`Outcome`].
//!
//! # Terminology
//!
//! | Term | Meaning |
//! |------|---------|
//! | Arrival | Time a process becomes ready |
//! | Burst | Total CPU time a process needs |
//! | Finish | Time the last unit of burst completes |
//! | Wait | Time ready but not running |

mod discipline;
mod outcome;
mod problem;
mod process;

pub use discipline::Discipline;
pub use outcome::Outcome;
pub use problem::Problem;
pub use process::Process;
