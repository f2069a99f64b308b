//! Process selection helpers shared by the disciplines.
//!
//! Candidate sets are ordered by process index, and a candidate only
//! replaces the current best on a strictly better key. Ties therefore go
//! to the lowest process index.

use std::collections::BTreeSet;

use crate::models::Process;

/// Pending process with the earliest arrival, and its arrival time.
pub(crate) fn next_arrival(
    processes: &[Process],
    pending: &BTreeSet<usize>,
) -> Option<(usize, u64)> {
    pending
        .iter()
        .map(|&p| (p, processes[p].arrival))
        .min_by_key(|&(p, arrival)| (arrival, p))
}

/// Ready process with the least remaining time.
pub(crate) fn shortest_remaining(time_left: &[u64], ready: &BTreeSet<usize>) -> Option<usize> {
    ready.iter().copied().min_by_key(|&p| (time_left[p], p))
}
