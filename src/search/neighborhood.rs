//! Neighborhood generators for local search.
//!
//! # Move: Adjacent Swap
//!
//! For every pair of consecutive jobs `(i, i+1)` in the flat job list
//! that share a terminal:
//!
//! 1. Deep-copy the state.
//! 2. Detach both jobs from their conveyors.
//! 3. Swap their conveyor assignments.
//! 4. Reinsert job `i`, then job `i+1`, each at its earliest feasible start
//!    on the new conveyor, and cascade any overlap to the right.
//!
//! Pairs on different terminals are skipped. Pairs already on the same
//! conveyor are still generated; reinsertion may retime them.
//!
//! # Complexity
//! O(n²) per call: n - 1 candidates, each an O(n) copy and repair.
//!
//! # Reference
//! Glover & Laguna (1997), "Tabu Search", Ch. 2 (swap neighborhoods)

use tracing::trace;

use crate::error::Result;
use crate::models::ScheduleState;

/// Generates the candidate states reachable from a state in one move.
pub trait Neighborhood {
    /// Neighbor states of `state`, in a deterministic order.
    ///
    /// Every returned state is an independent deep copy.
    fn neighbors(&self, state: &ScheduleState) -> Result<Vec<ScheduleState>>;

    /// Short name for logs.
    fn name(&self) -> &'static str {
        "neighborhood"
    }
}

/// Swaps the conveyors of consecutive same-terminal jobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacentSwap;

impl AdjacentSwap {
    /// Applies the move to jobs `i` and `i + 1`.
    ///
    /// Returns `None` when the pair spans two terminals.
    pub fn apply(&self, state: &ScheduleState, i: usize) -> Result<Option<ScheduleState>> {
        let jobs = state.jobs();
        let (Some(a), Some(b)) = (jobs.get(i), jobs.get(i + 1)) else {
            return Ok(None);
        };
        if a.terminal != b.terminal {
            return Ok(None);
        }
        let (conveyor_a, conveyor_b) = (a.conveyor, b.conveyor);

        let mut next = state.clone();
        next.detach(i)?;
        next.detach(i + 1)?;
        next.reinsert(i, conveyor_b)?;
        next.reinsert(i + 1, conveyor_a)?;
        Ok(Some(next))
    }
}

impl Neighborhood for AdjacentSwap {
    fn neighbors(&self, state: &ScheduleState) -> Result<Vec<ScheduleState>> {
        let pairs = state.job_count().saturating_sub(1);
        let mut out = Vec::with_capacity(pairs);
        for i in 0..pairs {
            if let Some(next) = self.apply(state, i)? {
                out.push(next);
            }
        }
        trace!(pairs, generated = out.len(), "adjacent swap neighborhood");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "adjacent-swap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flight, TerminalLayout};
    use crate::scheduler::ListScheduler;
    use crate::timing::MINUTE_MS;

    const T0: i64 = 1_524_578_400_000;

    fn schedule(flights: &[Flight], layout: &TerminalLayout) -> ScheduleState {
        ListScheduler::new().schedule(flights, layout).unwrap()
    }

    #[test]
    fn test_skips_cross_terminal_pairs() {
        let flights = vec![
            Flight::new("A", T0, MINUTE_MS).with_terminal(1),
            Flight::new("B", T0, MINUTE_MS).with_terminal(2),
            Flight::new("C", T0, MINUTE_MS).with_terminal(3),
        ];
        let state = schedule(&flights, &TerminalLayout::reference());
        assert!(AdjacentSwap.neighbors(&state).unwrap().is_empty());
    }

    #[test]
    fn test_swaps_conveyors() {
        let flights = vec![
            Flight::new("A", T0, 10 * MINUTE_MS).with_terminal(1),
            Flight::new("B", T0, 20 * MINUTE_MS).with_terminal(1),
        ];
        let state = schedule(&flights, &TerminalLayout::reference());
        assert_eq!(state.job("A").unwrap().conveyor, 0);
        assert_eq!(state.job("B").unwrap().conveyor, 1);

        let neighbors = AdjacentSwap.neighbors(&state).unwrap();
        assert_eq!(neighbors.len(), 1);
        let n = &neighbors[0];
        assert_eq!(n.job("A").unwrap().conveyor, 1);
        assert_eq!(n.job("B").unwrap().conveyor, 0);
        assert_eq!(n.job("A").unwrap().start_ms, T0);
        assert_eq!(n.job("B").unwrap().start_ms, T0);
        assert!(n.is_feasible());
    }

    #[test]
    fn test_input_state_untouched() {
        let flights = vec![
            Flight::new("A", T0, 10 * MINUTE_MS).with_terminal(1),
            Flight::new("B", T0, 20 * MINUTE_MS).with_terminal(1),
        ];
        let state = schedule(&flights, &TerminalLayout::reference());
        let before = state.clone();
        let _ = AdjacentSwap.neighbors(&state).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_same_conveyor_pair_stays_feasible() {
        let layout = TerminalLayout::new().with_terminal(1, 1);
        let flights = vec![
            Flight::new("F1", T0, 30 * MINUTE_MS).with_terminal(1),
            Flight::new("F2", T0 + 5 * MINUTE_MS, 30 * MINUTE_MS).with_terminal(1),
            Flight::new("F3", T0 + 10 * MINUTE_MS, 30 * MINUTE_MS).with_terminal(1),
        ];
        let state = schedule(&flights, &layout);
        let neighbors = AdjacentSwap.neighbors(&state).unwrap();
        assert_eq!(neighbors.len(), 2);
        for n in &neighbors {
            assert!(n.is_feasible());
            assert_eq!(n.job_count(), 3);
        }
    }

    #[test]
    fn test_swap_waits_for_busy_conveyor() {
        // C0: A [T0, T0+10), idle, D [T0+60, T0+70).
        // C1: B [T0, T0+100).
        let layout = TerminalLayout::new().with_terminal(1, 2);
        let flights = vec![
            Flight::new("A", T0, 10 * MINUTE_MS).with_terminal(1),
            Flight::new("B", T0, 100 * MINUTE_MS).with_terminal(1),
            Flight::new("D", T0 + 60 * MINUTE_MS, 10 * MINUTE_MS).with_terminal(1),
        ];
        let state = schedule(&flights, &layout);
        assert_eq!(state.job("D").unwrap().conveyor, 0);

        // Swapping B (index 1) and D (index 2): B moves to C0, D to C1.
        let next = AdjacentSwap.apply(&state, 1).unwrap().unwrap();
        let b = next.job("B").unwrap();
        let d = next.job("D").unwrap();
        assert_eq!(b.conveyor, 0);
        assert_eq!(d.conveyor, 1);
        // B is released at T0 inside A's busy window, so it waits for A.
        assert_eq!(b.start_ms, T0 + 10 * MINUTE_MS);
        assert_eq!(d.start_ms, T0 + 60 * MINUTE_MS);
        assert!(next.is_feasible());
    }

    #[test]
    fn test_empty_state() {
        let state = ScheduleState::new(&TerminalLayout::reference(), 0);
        assert!(AdjacentSwap.neighbors(&state).unwrap().is_empty());
        assert!(AdjacentSwap.apply(&state, 0).unwrap().is_none());
    }
}
