//! Per-terminal flight queues.
//!
//! Partitions flights by terminal and orders each terminal's queue with a
//! [`RuleEngine`]. Flights without a terminal never enter any queue.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use super::RuleEngine;
use crate::models::{Flight, TerminalId};

/// Flights grouped by terminal, each group in dispatch order.
#[derive(Debug, Clone, Default)]
pub struct FlightQueues {
    queues: BTreeMap<TerminalId, VecDeque<Flight>>,
    min_release_ms: Option<i64>,
    skipped: usize,
}

impl FlightQueues {
    /// Builds the queues.
    ///
    /// # Algorithm
    /// 1. Order all flights with `engine` (stable).
    /// 2. Drop flights whose terminal is unassigned.
    /// 3. Append each remaining flight to its terminal's queue.
    ///
    /// The global minimum release date is taken over **all** input flights,
    /// including unassigned ones.
    pub fn build(flights: &[Flight], engine: &RuleEngine) -> Self {
        let mut queues: BTreeMap<TerminalId, VecDeque<Flight>> = BTreeMap::new();
        let mut skipped = 0;

        for idx in engine.sort_indices(flights) {
            let flight = &flights[idx];
            match flight.terminal {
                Some(terminal) => queues.entry(terminal).or_default().push_back(flight.clone()),
                None => {
                    debug!(code = %flight.code, "skipping flight without terminal");
                    skipped += 1;
                }
            }
        }

        Self {
            queues,
            min_release_ms: flights.iter().map(|f| f.release_ms).min(),
            skipped,
        }
    }

    /// Earliest release date across all input flights.
    pub fn min_release_ms(&self) -> Option<i64> {
        self.min_release_ms
    }

    /// Number of flights dropped for lack of a terminal.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Queue of a terminal, in dispatch order.
    pub fn queue(&self, terminal: TerminalId) -> Option<&VecDeque<Flight>> {
        self.queues.get(&terminal)
    }

    /// Terminals that received at least one flight, ascending.
    pub fn terminals(&self) -> impl Iterator<Item = TerminalId> + '_ {
        self.queues.keys().copied()
    }

    /// Total queued flights.
    pub fn len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Whether no flight is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the queues, yielding `(terminal, queue)` ascending by terminal.
    pub fn into_queues(self) -> impl Iterator<Item = (TerminalId, VecDeque<Flight>)> {
        self.queues.into_iter()
    }
}
