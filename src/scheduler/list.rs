//! Online list scheduler.
//!
//! # Algorithm
//!
//! 1. Partition flights by terminal and order each queue by release date.
//! 2. For each terminal, pop flights in order.
//! 3. Place each flight on the conveyor that becomes available first
//!    (ties → lowest index), at `max(available, release)`.
//!
//! Jobs are appended in non-decreasing start order per conveyor, so
//! conveyors stay sorted by construction. No lookahead or reordering.
//!
//! # Complexity
//! O(n log n + n * c) where n = flights, c = conveyors per terminal.
//!
//! # Reference
//! Graham (1966), "Bounds for certain multiprocessing anomalies"

use tracing::debug;

use crate::dispatching::{FlightQueues, RuleEngine};
use crate::error::{Error, Result};
use crate::models::{Flight, Job, ScheduleState, TerminalLayout};

/// Greedy earliest-available-conveyor scheduler.
///
/// # Example
///
/// ```
/// use u_baggage::models::{Flight, TerminalLayout};
/// use u_baggage::scheduler::ListScheduler;
///
/// let flights = vec![
///     Flight::new("AA1", 0, 30 * 60_000).with_terminal(1),
///     Flight::new("AA2", 0, 30 * 60_000).with_terminal(1),
/// ];
/// let state = ListScheduler::new()
///     .schedule(&flights, &TerminalLayout::reference())
///     .unwrap();
/// assert_eq!(state.job_count(), 2);
/// assert_eq!(state.max_flow_ms(), 30 * 60_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListScheduler {
    rule_engine: RuleEngine,
}

impl ListScheduler {
    /// Creates a scheduler with ERD ordering.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::release_date(),
        }
    }

    /// Schedules flights on the layout's conveyors.
    ///
    /// Flights without a terminal are skipped.
    ///
    /// # Errors
    /// [`Error::NoConveyors`] if a flight is routed to a terminal that is
    /// missing from the layout or has zero conveyors.
    pub fn schedule(&self, flights: &[Flight], layout: &TerminalLayout) -> Result<ScheduleState> {
        let queues = FlightQueues::build(flights, &self.rule_engine);
        self.schedule_queues(queues, layout)
    }

    /// Schedules pre-built queues.
    pub fn schedule_queues(&self, queues: FlightQueues, layout: &TerminalLayout) -> Result<ScheduleState> {
        let epoch_ms = queues.min_release_ms().unwrap_or(0);
        let mut state = ScheduleState::new(layout, epoch_ms);

        for (terminal_id, mut queue) in queues.into_queues() {
            let queued = queue.len();
            while let Some(flight) = queue.pop_front() {
                let terminal = state
                    .terminal(terminal_id)
                    .ok_or(Error::NoConveyors(terminal_id))?;
                let conveyor = terminal
                    .earliest_available(state.jobs(), epoch_ms)
                    .ok_or(Error::NoConveyors(terminal_id))?;
                let available = terminal.conveyors[conveyor].available_ms(state.jobs(), epoch_ms);

                let mut job = Job::for_flight(&flight, terminal_id);
                job.place(conveyor, available.max(flight.release_ms));
                state.append(job)?;
            }
            debug!(terminal = terminal_id, jobs = queued, "terminal scheduled");
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::MINUTE_MS;

    const T0: i64 = 1_524_578_400_000; // 2018-04-24 14:00

    fn one_conveyor() -> TerminalLayout {
        TerminalLayout::new().with_terminal(1, 1)
    }

    #[test]
    fn test_same_release_uses_different_conveyors() {
        let flights = vec![
            Flight::new("A", T0, 20 * MINUTE_MS).with_terminal(1),
            Flight::new("B", T0, 25 * MINUTE_MS).with_terminal(1),
        ];
        let state = ListScheduler::new()
            .schedule(&flights, &TerminalLayout::reference())
            .unwrap();

        let a = state.job("A").unwrap();
        let b = state.job("B").unwrap();
        assert_ne!(a.conveyor, b.conveyor);
        assert_eq!(a.start_ms, T0);
        assert_eq!(b.start_ms, T0);
        assert_eq!(a.flow_ms, a.size_ms);
        assert_eq!(b.flow_ms, b.size_ms);
    }

    #[test]
    fn test_single_conveyor_serializes() {
        let size = 30 * MINUTE_MS;
        let flights = vec![
            Flight::new("F3", T0 + 10 * MINUTE_MS, size).with_terminal(1),
            Flight::new("F1", T0, size).with_terminal(1),
            Flight::new("F2", T0 + 5 * MINUTE_MS, size).with_terminal(1),
        ];
        let state = ListScheduler::new().schedule(&flights, &one_conveyor()).unwrap();

        let f1 = state.job("F1").unwrap();
        let f2 = state.job("F2").unwrap();
        let f3 = state.job("F3").unwrap();
        assert_eq!(f1.start_ms, T0);
        assert_eq!(f2.start_ms, f1.end_ms);
        assert_eq!(f3.start_ms, f2.end_ms);
        assert_eq!(f1.flow_ms, 30 * MINUTE_MS);
        assert_eq!(f2.flow_ms, 55 * MINUTE_MS);
        assert_eq!(f3.flow_ms, 80 * MINUTE_MS);
        assert_eq!(state.max_flow_ms(), 80 * MINUTE_MS);
        assert!(state.is_feasible());
    }

    #[test]
    fn test_ties_choose_lowest_conveyor() {
        let flights = vec![Flight::new("A", T0, MINUTE_MS).with_terminal(1)];
        let state = ListScheduler::new()
            .schedule(&flights, &TerminalLayout::reference())
            .unwrap();
        assert_eq!(state.job("A").unwrap().conveyor, 0);
    }

    #[test]
    fn test_idle_conveyor_waits_for_release() {
        let flights = vec![
            Flight::new("early", T0, MINUTE_MS).with_terminal(1),
            Flight::new("later", T0 + 60 * MINUTE_MS, MINUTE_MS).with_terminal(1),
        ];
        let state = ListScheduler::new().schedule(&flights, &one_conveyor()).unwrap();
        let later = state.job("later").unwrap();
        assert_eq!(later.start_ms, T0 + 60 * MINUTE_MS);
        assert_eq!(later.flow_ms, MINUTE_MS);
    }

    #[test]
    fn test_flat_job_order_by_terminal_then_release() {
        let flights = vec![
            Flight::new("T2-b", T0 + 2, 1).with_terminal(2),
            Flight::new("T1-b", T0 + 2, 1).with_terminal(1),
            Flight::new("T2-a", T0 + 1, 1).with_terminal(2),
            Flight::new("T1-a", T0 + 1, 1).with_terminal(1),
        ];
        let state = ListScheduler::new()
            .schedule(&flights, &TerminalLayout::reference())
            .unwrap();
        let codes: Vec<_> = state.jobs().iter().map(|j| j.code.as_str()).collect();
        assert_eq!(codes, ["T1-a", "T1-b", "T2-a", "T2-b"]);
    }

    #[test]
    fn test_unassigned_flights_not_scheduled() {
        let flights = vec![
            Flight::new("kept", T0, 1).with_terminal(1),
            Flight::new("dropped", T0, 1),
        ];
        let state = ListScheduler::new()
            .schedule(&flights, &TerminalLayout::reference())
            .unwrap();
        assert_eq!(state.job_count(), 1);
        assert!(state.job("dropped").is_none());
    }

    #[test]
    fn test_zero_conveyor_terminal_rejected() {
        let flights = vec![Flight::new("X", T0, 1).with_terminal(6)];
        let err = ListScheduler::new()
            .schedule(&flights, &TerminalLayout::reference())
            .unwrap_err();
        assert!(matches!(err, Error::NoConveyors(6)));
    }

    #[test]
    fn test_empty_input() {
        let state = ListScheduler::new()
            .schedule(&[], &TerminalLayout::reference())
            .unwrap();
        assert!(state.is_empty());
        assert_eq!(state.max_flow_ms(), 0);
    }
}
