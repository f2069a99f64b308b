//! Time-ordered log of simulation snapshots.
//!
//! The simulator records, at each event, the remaining time of every
//! process it touched. Finish and wait times, and the execution timeline,
//! are derived from those snapshots afterwards.
//!
//! # Snapshot Semantics
//!
//! A snapshot holds one slot per process. `None` means the process was not
//! recorded at that instant; it never means "zero remaining". A process
//! *ran* over the interval `[t_i, t_{i+1}]` exactly when both endpoints
//! record it with different remaining times.
//!
//! # Coalescing
//!
//! Several reactions can happen at the same instant (an arrival coinciding
//! with a completion, say). No CPU time passes between them, so
//! [`EventRecorder`] merges them into a single event. Timestamps in a
//! finished log are therefore strictly increasing.

use log::trace;

use crate::models::Outcome;

/// One snapshot of remaining times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Simulation time of the snapshot.
    pub timestamp: u64,
    /// Remaining time per process; `None` if not recorded at this instant.
    pub snapshot: Vec<Option<u64>>,
}

impl Event {
    fn new(timestamp: u64, process_count: usize) -> Self {
        Self {
            timestamp,
            snapshot: vec![None; process_count],
        }
    }

    /// Remaining time recorded for `process`, if any.
    pub fn remaining(&self, process: usize) -> Option<u64> {
        self.snapshot.get(process).copied().flatten()
    }
}

/// A contiguous slice of CPU time given to one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSegment {
    /// Process index.
    pub process: usize,
    /// Start time (inclusive).
    pub start: u64,
    /// End time (exclusive).
    pub end: u64,
}

impl RunSegment {
    /// Segment length.
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

/// Builds an [`EventLog`], one event at a time.
///
/// Events are opened with [`begin`](Self::begin), filled with
/// [`record`](Self::record) and sealed when a later timestamp begins or
/// the recorder is [`finish`](Self::finish)ed.
#[derive(Debug)]
pub struct EventRecorder {
    process_count: usize,
    events: Vec<Event>,
    open: Option<Event>,
}

impl EventRecorder {
    /// Creates a recorder for `process_count` processes.
    pub fn new(process_count: usize) -> Self {
        Self {
            process_count,
            events: Vec::new(),
            open: None,
        }
    }

    /// Opens the event at `timestamp`.
    ///
    /// If the open event already has this timestamp it stays open and
    /// further records merge into it.
    ///
    /// # Panics
    /// If `timestamp` is earlier than the open event.
    pub fn begin(&mut self, timestamp: u64) {
        if let Some(open) = &self.open {
            assert!(
                timestamp >= open.timestamp,
                "event at t={timestamp} begun after t={}",
                open.timestamp
            );
            if open.timestamp == timestamp {
                return;
            }
        }
        self.seal();
        self.open = Some(Event::new(timestamp, self.process_count));
    }

    /// Records the remaining time of `process` in the open event.
    ///
    /// # Panics
    /// If no event is open, `process` is out of range, or the process was
    /// already recorded at this instant with a different value.
    pub fn record(&mut self, process: usize, remaining: u64) {
        let open = self.open.as_mut().expect("record called with no open event");
        let slot = open
            .snapshot
            .get_mut(process)
            .unwrap_or_else(|| panic!("process {process} out of range"));
        if let Some(previous) = *slot {
            assert_eq!(
                previous, remaining,
                "process {process} recorded twice at t={} with different remaining times",
                open.timestamp
            );
        }
        *slot = Some(remaining);
    }

    /// Seals the open event and returns the finished log.
    pub fn finish(mut self) -> EventLog {
        self.seal();
        EventLog {
            process_count: self.process_count,
            events: self.events,
        }
    }

    fn seal(&mut self) {
        if let Some(event) = self.open.take() {
            trace!("event t={} {:?}", event.timestamp, event.snapshot);
            self.events.push(event);
        }
    }
}

/// An append-only, time-ordered record of simulation snapshots.
///
/// Produced by [`EventRecorder::finish`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    process_count: usize,
    events: Vec<Event>,
}

impl EventLog {
    /// Number of processes the log covers.
    pub fn process_count(&self) -> usize {
        self.process_count
    }

    /// Events in timestamp order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Time at which `process` completed: the event recording 0 for it.
    pub fn finish_time(&self, process: usize) -> Option<u64> {
        self.events
            .iter()
            .find(|e| e.remaining(process) == Some(0))
            .map(|e| e.timestamp)
    }

    /// Time `process` spent ready but not running.
    ///
    /// Sums every interval from the process's first appearance to its
    /// completion except those over which its remaining time decreased.
    /// `None` if the process never appears or never completes.
    pub fn wait_time(&self, process: usize) -> Option<u64> {
        let start = self
            .events
            .iter()
            .position(|e| e.remaining(process).is_some())?;

        let mut wait = 0;
        for pair in self.events[start..].windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            if current.remaining(process) == Some(0) {
                return Some(wait);
            }
            if !ran_between(current, next, process) {
                wait += next.timestamp - current.timestamp;
            }
        }

        // Only valid if the last event is the completion
        match self.events.last() {
            Some(last) if last.remaining(process) == Some(0) => Some(wait),
            _ => None,
        }
    }

    /// Finish and wait time of `process`.
    pub fn outcome(&self, process: usize) -> Option<Outcome> {
        Some(Outcome::new(
            self.finish_time(process)?,
            self.wait_time(process)?,
        ))
    }

    /// Finish and wait times of all processes, in index order.
    ///
    /// # Panics
    /// If any process never completed. Logs produced by the solver always
    /// run every process to completion.
    pub fn outcomes(&self) -> Vec<Outcome> {
        (0..self.process_count)
            .map(|p| {
                self.outcome(p)
                    .unwrap_or_else(|| panic!("process {p} never completed"))
            })
            .collect()
    }

    /// Execution timeline: which process held the CPU and when.
    ///
    /// Consecutive slices of the same process are merged. Idle gaps are
    /// not represented.
    pub fn segments(&self) -> Vec<RunSegment> {
        let mut segments: Vec<RunSegment> = Vec::new();
        for pair in self.events.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            let Some(process) = (0..self.process_count).find(|&p| ran_between(current, next, p))
            else {
                continue;
            };
            match segments.last_mut() {
                Some(last) if last.process == process && last.end == current.timestamp => {
                    last.end = next.timestamp;
                }
                _ => segments.push(RunSegment {
                    process,
                    start: current.timestamp,
                    end: next.timestamp,
                }),
            }
        }
        segments
    }

    /// Total time the CPU was busy.
    pub fn busy_time(&self) -> u64 {
        self.segments().iter().map(RunSegment::duration).sum()
    }
}

fn ran_between(current: &Event, next: &Event, process: usize) -> bool {
    match (current.remaining(process), next.remaining(process)) {
        (Some(before), Some(after)) => before != after,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two processes: P0 (arrival 0, burst 3), P1 (arrival 1, burst 2), FCFS.
    fn fcfs_log() -> EventLog {
        let mut rec = EventRecorder::new(2);
        rec.begin(0);
        rec.record(0, 3);
        rec.begin(1);
        rec.record(0, 2);
        rec.record(1, 2);
        rec.begin(3);
        rec.record(0, 0);
        rec.record(1, 2);
        rec.begin(5);
        rec.record(1, 0);
        rec.finish()
    }

    #[test]
    fn test_finish_and_wait() {
        let log = fcfs_log();
        assert_eq!(log.len(), 4);
        assert_eq!(log.finish_time(0), Some(3));
        assert_eq!(log.finish_time(1), Some(5));
        assert_eq!(log.wait_time(0), Some(0));
        assert_eq!(log.wait_time(1), Some(2));
        assert_eq!(log.outcomes(), vec![Outcome::new(3, 0), Outcome::new(5, 2)]);
    }

    #[test]
    fn test_absent_is_not_zero() {
        let log = fcfs_log();
        // P1 is absent from the first event
        assert_eq!(log.events()[0].remaining(1), None);
        assert_eq!(log.events()[0].remaining(0), Some(3));
        assert_eq!(log.events()[0].remaining(5), None);
    }

    #[test]
    fn test_coalesces_same_instant() {
        let mut rec = EventRecorder::new(3);
        rec.begin(0);
        rec.record(0, 4);
        rec.begin(0);
        rec.record(0, 4);
        rec.record(1, 2);
        rec.begin(0);
        rec.record(2, 1);
        let log = rec.finish();

        assert_eq!(log.len(), 1);
        assert_eq!(log.events()[0].snapshot, vec![Some(4), Some(2), Some(1)]);
    }

    #[test]
    #[should_panic(expected = "begun after")]
    fn test_time_cannot_go_backwards() {
        let mut rec = EventRecorder::new(1);
        rec.begin(5);
        rec.record(0, 1);
        rec.begin(4);
    }

    #[test]
    #[should_panic(expected = "recorded twice")]
    fn test_conflicting_record_panics() {
        let mut rec = EventRecorder::new(1);
        rec.begin(2);
        rec.record(0, 3);
        rec.record(0, 2);
    }

    #[test]
    fn test_incomplete_process() {
        let mut rec = EventRecorder::new(2);
        rec.begin(0);
        rec.record(0, 2);
        rec.begin(2);
        rec.record(0, 0);
        let log = rec.finish();

        assert_eq!(log.outcome(0), Some(Outcome::new(2, 0)));
        assert_eq!(log.finish_time(1), None);
        assert_eq!(log.wait_time(1), None);
        assert_eq!(log.outcome(1), None);
    }

    #[test]
    #[should_panic(expected = "never completed")]
    fn test_outcomes_panics_on_incomplete() {
        let mut rec = EventRecorder::new(2);
        rec.begin(0);
        rec.record(0, 1);
        rec.begin(1);
        rec.record(0, 0);
        rec.finish().outcomes();
    }

    #[test]
    fn test_segments() {
        let log = fcfs_log();
        assert_eq!(
            log.segments(),
            vec![
                RunSegment { process: 0, start: 0, end: 3 },
                RunSegment { process: 1, start: 3, end: 5 },
            ]
        );
        assert_eq!(log.busy_time(), 5);
    }

    #[test]
    fn test_segments_skip_idle_gap() {
        let mut rec = EventRecorder::new(2);
        rec.begin(0);
        rec.record(0, 1);
        rec.begin(1);
        rec.record(0, 0);
        rec.begin(4);
        rec.record(1, 2);
        rec.begin(6);
        rec.record(1, 0);
        let log = rec.finish();

        let segments = log.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], RunSegment { process: 1, start: 4, end: 6 });
        assert_eq!(log.busy_time(), 3);
        assert_eq!(log.wait_time(1), Some(0));
    }
}
