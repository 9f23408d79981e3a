//! Flight model.
//!
//! A flight is the immutable input record of the scheduler: one arriving
//! aircraft whose baggage must be processed on a conveyor of its terminal.
//!
//! # Time Representation
//! `release_ms` is milliseconds since the Unix epoch; `size_ms` is a
//! processing duration in milliseconds.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::TerminalId;
use crate::timing::AircraftClass;

/// An arriving flight.
///
/// Created once during ingestion and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Unique flight code.
    pub code: String,
    /// Release date: estimated arrival if known, else scheduled arrival (ms).
    pub release_ms: i64,
    /// Terminal the flight is routed to. `None` = unassigned (never scheduled).
    pub terminal: Option<TerminalId>,
    /// Arrival gate.
    pub gate: String,
    /// Raw baggage tag from the source (unused by the scheduler).
    pub baggage: String,
    /// Raw aircraft tag.
    pub plane: String,
    /// Coarse aircraft class derived from `plane`.
    pub class: AircraftClass,
    /// Processing duration on a conveyor (ms).
    pub size_ms: i64,
}

impl Flight {
    /// Creates a flight with the given code, release date and size.
    pub fn new(code: impl Into<String>, release_ms: i64, size_ms: i64) -> Self {
        Self {
            code: code.into(),
            release_ms,
            terminal: None,
            gate: String::new(),
            baggage: String::new(),
            plane: String::new(),
            class: AircraftClass::Other,
            size_ms,
        }
    }

    /// Routes the flight to a terminal.
    pub fn with_terminal(mut self, terminal: TerminalId) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Sets the gate.
    pub fn with_gate(mut self, gate: impl Into<String>) -> Self {
        self.gate = gate.into();
        self
    }

    /// Sets the raw baggage tag.
    pub fn with_baggage(mut self, baggage: impl Into<String>) -> Self {
        self.baggage = baggage.into();
        self
    }

    /// Sets the aircraft tag and derives its class.
    pub fn with_plane(mut self, plane: impl Into<String>) -> Self {
        self.plane = plane.into();
        self.class = AircraftClass::classify(&self.plane);
        self
    }

    /// Release-date ordering (earliest first). Equal releases compare equal,
    /// so stable sorts keep input order on ties.
    pub fn release_order(a: &Flight, b: &Flight) -> Ordering {
        a.release_ms.cmp(&b.release_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_builder() {
        let f = Flight::new("BA117", 1_000, 1_800_000)
            .with_terminal(7)
            .with_gate("B4")
            .with_baggage("5")
            .with_plane("Boeing");

        assert_eq!(f.code, "BA117");
        assert_eq!(f.terminal, Some(7));
        assert_eq!(f.gate, "B4");
        assert_eq!(f.baggage, "5");
        assert_eq!(f.class, AircraftClass::Jet);
    }

    #[test]
    fn test_unassigned_flight() {
        let f = Flight::new("X1", 0, 0);
        assert_eq!(f.terminal, None);
        assert_eq!(f.class, AircraftClass::Other);
    }

    #[test]
    fn test_release_order_is_stable() {
        let mut flights = vec![
            Flight::new("late", 300, 1),
            Flight::new("tie_a", 100, 1),
            Flight::new("early", 50, 1),
            Flight::new("tie_b", 100, 1),
        ];
        flights.sort_by(Flight::release_order);
        let codes: Vec<_> = flights.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, ["early", "tie_a", "tie_b", "late"]);
    }
}
