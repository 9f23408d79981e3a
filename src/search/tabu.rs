//! Tabu search over schedule states.
//!
//! # Algorithm
//!
//! 1. `current = best = initial`, empty tabu list.
//! 2. Each iteration:
//!    - generate the neighborhood of `current`;
//!    - drop candidates equal to a remembered state;
//!    - remember `current` (one push per iteration, also when holding);
//!    - move to the admissible candidate with the lowest maximum flow
//!      time (first on ties), or hold `current` if none remains;
//!    - replace `best` on strict improvement only.
//! 3. Stop after a fixed number of iterations.
//!
//! The move is always taken, even when it worsens the objective; the
//! tabu list is what prevents cycling back.
//!
//! # Reference
//! Glover (1989), "Tabu Search - Part I", ORSA Journal on Computing 1(3)

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Neighborhood, TabuList};
use crate::error::Result;
use crate::models::ScheduleState;

/// Tabu search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabuConfig {
    /// Number of iterations.
    pub iterations: usize,
    /// Tabu list capacity.
    pub tabu_capacity: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            tabu_capacity: 10,
        }
    }
}

impl TabuConfig {
    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the tabu list capacity.
    pub fn with_tabu_capacity(mut self, capacity: usize) -> Self {
        self.tabu_capacity = capacity;
        self
    }
}

/// Progress of one iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Iteration number, starting at 1.
    pub iteration: usize,
    /// Neighbors generated.
    pub candidates: usize,
    /// Neighbors not in the tabu list.
    pub admissible: usize,
    /// Max flow time of `current` after the move (ms).
    pub current_max_flow_ms: i64,
    /// Max flow time of `best` after the iteration (ms).
    pub best_max_flow_ms: i64,
    /// Whether `current` was held because every neighbor was tabu.
    pub held: bool,
}

/// Result of a tabu search run.
#[derive(Debug, Clone)]
pub struct TabuOutcome {
    /// Best state found.
    pub best: ScheduleState,
    /// One record per iteration.
    pub trace: Vec<IterationRecord>,
}

impl TabuOutcome {
    /// Max flow time of the best state (ms).
    pub fn best_max_flow_ms(&self) -> i64 {
        self.best.max_flow_ms()
    }
}

/// Tabu search driver.
///
/// # Example
///
/// ```
/// use u_baggage::models::{Flight, TerminalLayout};
/// use u_baggage::scheduler::ListScheduler;
/// use u_baggage::search::{AdjacentSwap, TabuConfig, TabuSearch};
///
/// let flights = vec![
///     Flight::new("A", 0, 600_000).with_terminal(8),
///     Flight::new("B", 0, 600_000).with_terminal(8),
///     Flight::new("C", 0, 600_000).with_terminal(8),
/// ];
/// let initial = ListScheduler::new()
///     .schedule(&flights, &TerminalLayout::reference())
///     .unwrap();
/// let outcome = TabuSearch::new(TabuConfig::default())
///     .run(&initial, &AdjacentSwap)
///     .unwrap();
/// assert!(outcome.best.max_flow_ms() <= initial.max_flow_ms());
/// assert_eq!(outcome.trace.len(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TabuSearch {
    config: TabuConfig,
}

impl TabuSearch {
    /// Creates a driver with the given parameters.
    pub fn new(config: TabuConfig) -> Self {
        Self { config }
    }

    /// Parameters in use.
    pub fn config(&self) -> &TabuConfig {
        &self.config
    }

    /// Runs the search from `initial`. `initial` itself is not modified.
    pub fn run<N>(&self, initial: &ScheduleState, neighborhood: &N) -> Result<TabuOutcome>
    where
        N: Neighborhood + ?Sized,
    {
        let mut current = initial.clone();
        let mut best = initial.clone();
        let mut tabu = TabuList::new(self.config.tabu_capacity);
        let mut trace = Vec::with_capacity(self.config.iterations);

        for iteration in 1..=self.config.iterations {
            let candidates = neighborhood.neighbors(&current)?;
            let generated = candidates.len();
            let admissible: Vec<ScheduleState> = candidates
                .into_iter()
                .filter(|c| !tabu.contains(c))
                .collect();
            let admissible_count = admissible.len();

            tabu.push(current.clone());

            let next = admissible.into_iter().min_by_key(ScheduleState::max_flow_ms);
            let held = next.is_none();
            if let Some(next) = next {
                current = next;
            }

            if current.max_flow_ms() < best.max_flow_ms() {
                best = current.clone();
            }

            let record = IterationRecord {
                iteration,
                candidates: generated,
                admissible: admissible_count,
                current_max_flow_ms: current.max_flow_ms(),
                best_max_flow_ms: best.max_flow_ms(),
                held,
            };
            debug!(
                iteration,
                neighborhood = neighborhood.name(),
                candidates = record.candidates,
                admissible = record.admissible,
                current = record.current_max_flow_ms,
                best = record.best_max_flow_ms,
                held,
                "tabu iteration"
            );
            trace.push(record);
        }

        Ok(TabuOutcome { best, trace })
    }
}
