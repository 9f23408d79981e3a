//! Conveyor model.
//!
//! A conveyor holds the jobs it processes as indices into the owning
//! [`ScheduleState`](super::ScheduleState)'s job arena, ordered by start
//! time.
//!
//! # Invariant
//! For consecutive jobs `a`, `b` on a conveyor: `b.start_ms >= a.end_ms`.

use serde::{Deserialize, Serialize};

use super::Job;

/// A baggage-claim conveyor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conveyor {
    /// Index within the terminal.
    pub index: usize,
    /// Job arena indices, sorted by start time.
    jobs: Vec<usize>,
}

impl Conveyor {
    /// Creates an empty conveyor.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            jobs: Vec::new(),
        }
    }

    /// Arena indices of the jobs on this conveyor, in start order.
    pub fn job_indices(&self) -> &[usize] {
        &self.jobs
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no job is assigned.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Available date: end of the last job, or `epoch_ms` when empty.
    pub fn available_ms(&self, jobs: &[Job], epoch_ms: i64) -> i64 {
        self.jobs
            .last()
            .map(|&j| jobs[j].end_ms)
            .unwrap_or(epoch_ms)
    }

    /// Appends a job. Callers guarantee it starts no earlier than the
    /// current available date.
    pub(crate) fn push(&mut self, job: usize) {
        self.jobs.push(job);
    }

    /// Removes a job. Returns `false` if it was not on this conveyor.
    pub(crate) fn remove(&mut self, job: usize) -> bool {
        match self.jobs.iter().position(|&j| j == job) {
            Some(pos) => {
                self.jobs.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Earliest feasible start for a job with the given release and size.
    ///
    /// # Algorithm
    /// 1. Empty conveyor → release date.
    /// 2. `release + size` fits before the first job → release date.
    /// 3. Release falls in the gap between two consecutive jobs
    ///    (`left.end <= release < right.start`) → release date.
    /// 4. Otherwise `max(last.end, release)`.
    ///
    /// Case 3 does not check that the whole job fits in the gap; any
    /// overlap it creates is resolved by [`Conveyor::repair`]. A release
    /// inside a busy interval matches no gap and falls through to case 4.
    pub fn earliest_start(&self, jobs: &[Job], release_ms: i64, size_ms: i64) -> i64 {
        let (first, last) = match (self.jobs.first(), self.jobs.last()) {
            (Some(&f), Some(&l)) => (&jobs[f], &jobs[l]),
            _ => return release_ms,
        };

        if release_ms + size_ms <= first.start_ms {
            return release_ms;
        }

        let in_gap = self.jobs.windows(2).any(|pair| {
            let (left, right) = (&jobs[pair[0]], &jobs[pair[1]]);
            release_ms >= left.end_ms && release_ms < right.start_ms
        });
        if in_gap {
            return release_ms;
        }

        last.end_ms.max(release_ms)
    }

    /// Inserts a job keeping start order; equal starts keep insertion
    /// order (the new job goes after them).
    pub(crate) fn insert_sorted(&mut self, jobs: &[Job], job: usize) {
        let start = jobs[job].start_ms;
        let pos = self.jobs.partition_point(|&j| jobs[j].start_ms <= start);
        self.jobs.insert(pos, job);
    }

    /// Pushes every job that starts before its predecessor ends to that
    /// predecessor's end, cascading to the right.
    ///
    /// Returns the number of jobs moved.
    pub(crate) fn repair(&self, jobs: &mut [Job]) -> usize {
        let mut moved = 0;
        for pair in self.jobs.windows(2) {
            let prev_end = jobs[pair[0]].end_ms;
            let next = &mut jobs[pair[1]];
            if next.start_ms < prev_end {
                next.shift_to(prev_end);
                moved += 1;
            }
        }
        moved
    }

    /// Whether consecutive jobs never overlap and are in start order.
    pub fn is_non_overlapping(&self, jobs: &[Job]) -> bool {
        self.jobs
            .windows(2)
            .all(|pair| jobs[pair[1]].start_ms >= jobs[pair[0]].end_ms)
    }

    /// Total processing time on this conveyor (ms).
    pub fn busy_ms(&self, jobs: &[Job]) -> i64 {
        self.jobs.iter().map(|&j| jobs[j].size_ms).sum()
    }
}
