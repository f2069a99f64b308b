//! Discrete-event CPU simulation.
//!
//! # Algorithm
//!
//! 1. If nothing is running, jump to the earliest pending arrival and
//!    dispatch it.
//! 2. Otherwise take the earliest of: next arrival, completion of the
//!    running process, and (round robin only) quantum expiry. Advance the
//!    clock to it, charging the elapsed time to the running process.
//! 3. React to the event. On ties, arrival wins over completion, and
//!    completion wins over quantum expiry.
//! 4. Stop once no process is pending or ready.
//!
//! Every reaction records the remaining time of each process it touched.
//!
//! | Event | FCFS | SJF | SRTF | RR |
//! |-------|------|-----|------|----|
//! | Arrival | enqueue | - | preempt if strictly shorter | enqueue |
//! | Completion | dequeue | shortest | shortest | reset quantum, dequeue |
//! | Quantum expiry | - | - | - | reset quantum, requeue, dequeue |
//!
//! A process can never run before it arrives: it only becomes a candidate
//! once the clock has reached its arrival time.

use std::collections::{BTreeSet, VecDeque};

use log::debug;

use super::selection::{next_arrival, shortest_remaining};
use crate::event_log::{EventLog, EventRecorder};
use crate::models::{Discipline, Problem};

/// Which candidate event the clock advanced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Arrival(usize),
    Completion,
    QuantumExpiry,
}

/// Run state of one simulation.
pub(crate) struct Simulation<'a> {
    problem: &'a Problem,
    time_left: Vec<u64>,
    /// Processes that have not arrived yet.
    pending_arrivals: BTreeSet<usize>,
    /// Processes that have arrived and not finished, running one included.
    pending_ready: BTreeSet<usize>,
    /// FIFO ready queue (FCFS and RR), running process excluded.
    queue: VecDeque<usize>,
    running: Option<usize>,
    clock: u64,
    quantum_left: u64,
    recorder: EventRecorder,
}

impl<'a> Simulation<'a> {
    pub(crate) fn new(problem: &'a Problem) -> Self {
        let n = problem.process_count();
        Self {
            problem,
            time_left: problem.processes().iter().map(|p| p.burst).collect(),
            pending_arrivals: (0..n).collect(),
            pending_ready: BTreeSet::new(),
            queue: VecDeque::new(),
            running: None,
            clock: 0,
            quantum_left: problem.quantum().unwrap_or(0),
            recorder: EventRecorder::new(n),
        }
    }

    /// Runs every process to completion and returns the event log.
    pub(crate) fn run(mut self) -> EventLog {
        while !(self.pending_arrivals.is_empty() && self.pending_ready.is_empty()) {
            match self.running {
                None => self.dispatch_next_arrival(),
                Some(current) => {
                    let step = self.advance(current);
                    match step {
                        Step::Arrival(arrived) => self.on_arrival(current, arrived),
                        Step::Completion => self.on_completion(current),
                        Step::QuantumExpiry => self.on_quantum_expiry(current),
                    }
                }
            }
        }
        assert!(self.queue.is_empty(), "ready queue not drained");
        assert!(
            self.time_left.iter().all(|&t| t == 0),
            "simulation ended with unfinished processes"
        );
        self.recorder.finish()
    }

    /// CPU is idle: jump to the next arrival and run it.
    fn dispatch_next_arrival(&mut self) {
        let (process, arrival) = next_arrival(self.problem.processes(), &self.pending_arrivals)
            .expect("idle CPU with no pending arrivals");
        assert!(arrival >= self.clock, "arrival at t={arrival} is in the past");

        self.clock = arrival;
        self.admit(process);
        self.running = Some(process);
        if let Some(quantum) = self.problem.quantum() {
            self.quantum_left = quantum;
        }
        debug!("t={}: P{process} dispatched on idle CPU", self.clock);

        self.recorder.begin(self.clock);
        self.record(process);
    }

    /// Moves the clock to the next event and charges elapsed time to `current`.
    fn advance(&mut self, current: usize) -> Step {
        let arrival = next_arrival(self.problem.processes(), &self.pending_arrivals);
        let arrival_at = arrival.map_or(u64::MAX, |(_, t)| t);
        // Bounded by the latest arrival plus total burst, checked at construction
        let completion_at = self.clock + self.time_left[current];
        // An expiry past the completion never wins, so saturating is exact
        let expiry_at = if self.discipline().uses_quantum() {
            self.clock.saturating_add(self.quantum_left)
        } else {
            u64::MAX
        };

        let next = arrival_at.min(completion_at).min(expiry_at);
        assert!(next >= self.clock, "clock moved backwards to t={next}");

        let elapsed = next - self.clock;
        self.time_left[current] = self.time_left[current]
            .checked_sub(elapsed)
            .expect("remaining time went negative");
        if self.discipline().uses_quantum() {
            self.quantum_left -= elapsed;
        }
        self.clock = next;

        match arrival {
            Some((process, at)) if at == next => Step::Arrival(process),
            _ if completion_at == next => Step::Completion,
            _ => Step::QuantumExpiry,
        }
    }

    fn on_arrival(&mut self, current: usize, arrived: usize) {
        self.admit(arrived);

        self.recorder.begin(self.clock);
        self.record(current);
        self.record(arrived);

        if self.discipline().uses_queue() {
            self.queue.push_back(arrived);
        } else if self.discipline() == Discipline::Srtf
            && self.time_left[arrived] < self.time_left[current]
        {
            debug!(
                "t={}: P{arrived} ({}) preempts P{current} ({})",
                self.clock, self.time_left[arrived], self.time_left[current]
            );
            self.running = Some(arrived);
        }
    }

    fn on_completion(&mut self, current: usize) {
        if let Some(quantum) = self.problem.quantum() {
            self.quantum_left = quantum;
        }

        self.recorder.begin(self.clock);
        self.record(current);
        self.pending_ready.remove(&current);
        debug!("t={}: P{current} finished", self.clock);

        if self.pending_ready.is_empty() {
            self.running = None;
            return;
        }

        let next = if self.discipline().uses_queue() {
            self.dequeue()
        } else {
            shortest_remaining(&self.time_left, &self.pending_ready)
                .expect("ready set checked non-empty")
        };
        self.record(next);
        self.running = Some(next);
    }

    fn on_quantum_expiry(&mut self, current: usize) {
        if let Some(quantum) = self.problem.quantum() {
            self.quantum_left = quantum;
        }

        self.queue.push_back(current);
        let next = self.dequeue();
        if next != current {
            debug!("t={}: quantum expired, P{current} -> P{next}", self.clock);
        }

        self.recorder.begin(self.clock);
        self.record(current);
        self.record(next);
        self.running = Some(next);
    }

    fn admit(&mut self, process: usize) {
        let removed = self.pending_arrivals.remove(&process);
        assert!(removed, "P{process} admitted twice");
        self.pending_ready.insert(process);
    }

    fn dequeue(&mut self) -> usize {
        let next = self
            .queue
            .pop_front()
            .expect("ready queue out of sync with ready set");
        assert!(
            self.pending_ready.contains(&next),
            "P{next} dequeued but not ready"
        );
        next
    }

    fn record(&mut self, process: usize) {
        self.recorder.record(process, self.time_left[process]);
    }

    fn discipline(&self) -> Discipline {
        self.problem.discipline()
    }
}
