//! Job model: one flight placed on one conveyor.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Flight, TerminalId};

/// The assignment of a flight to a conveyor of its terminal.
///
/// Flight-derived fields (`code`, `terminal`, `release_ms`, `size_ms`) are
/// fixed at creation. Placement fields (`conveyor`, `start_ms`, `end_ms`,
/// `flow_ms`) are recomputed by [`Job::place`] whenever the job is
/// (re)inserted into a conveyor.
///
/// # Invariants
/// - `end_ms == start_ms + size_ms`
/// - `flow_ms == end_ms - release_ms`
/// - `start_ms >= release_ms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Flight code.
    pub code: String,
    /// Terminal of the flight.
    pub terminal: TerminalId,
    /// Conveyor index within the terminal.
    pub conveyor: usize,
    /// Release date (ms).
    pub release_ms: i64,
    /// Processing duration (ms).
    pub size_ms: i64,
    /// Start time (ms).
    pub start_ms: i64,
    /// End time (ms).
    pub end_ms: i64,
    /// Flow time: end - release (ms).
    pub flow_ms: i64,
}

impl Job {
    /// Creates a job for a flight routed to `terminal`, placed at its
    /// release date on conveyor 0.
    pub fn for_flight(flight: &Flight, terminal: TerminalId) -> Self {
        let mut job = Self {
            code: flight.code.clone(),
            terminal,
            conveyor: 0,
            release_ms: flight.release_ms,
            size_ms: flight.size_ms,
            start_ms: flight.release_ms,
            end_ms: 0,
            flow_ms: 0,
        };
        job.place(0, flight.release_ms);
        job
    }

    /// Places the job on `conveyor` starting at `start_ms`, recomputing
    /// end and flow time.
    pub fn place(&mut self, conveyor: usize, start_ms: i64) {
        debug_assert!(start_ms >= self.release_ms, "job {} starts before release", self.code);
        self.conveyor = conveyor;
        self.start_ms = start_ms;
        self.end_ms = start_ms + self.size_ms;
        self.flow_ms = self.end_ms - self.release_ms;
    }

    /// Moves the start time, keeping the conveyor.
    #[inline]
    pub fn shift_to(&mut self, start_ms: i64) {
        self.place(self.conveyor, start_ms);
    }

    /// Waiting time between release and start (ms).
    #[inline]
    pub fn wait_ms(&self) -> i64 {
        self.start_ms - self.release_ms
    }

    /// Whether the timing invariants hold.
    pub fn is_consistent(&self) -> bool {
        self.start_ms >= self.release_ms
            && self.end_ms == self.start_ms + self.size_ms
            && self.flow_ms == self.end_ms - self.release_ms
    }

    /// Start-time ordering.
    pub fn start_order(a: &Job, b: &Job) -> Ordering {
        a.start_ms.cmp(&b.start_ms)
    }
}
