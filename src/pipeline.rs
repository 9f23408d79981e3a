//! End-to-end dispatch: validate, list-schedule, then improve by tabu search.
//!
//! ```text
//! flights ─► validate ─► ListScheduler ─► initial ─► TabuSearch ─► best
//! ```
//!
//! The unoptimized state is kept next to the improved one so callers can
//! compare maximum flow time before and after the search.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::DispatchConfig;
use crate::error::{Error, Result};
use crate::ingest;
use crate::models::{Flight, ScheduleState};
use crate::scheduler::{ListScheduler, ScheduleKpi};
use crate::search::{AdjacentSwap, IterationRecord, TabuSearch};
use crate::timing::format_span;
use crate::validation::validate_flights;

/// Result of one dispatch run.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// List-scheduler state before local search.
    pub initial: ScheduleState,
    /// Best state found by tabu search.
    pub best: ScheduleState,
    /// Per-iteration search trace.
    pub trace: Vec<IterationRecord>,
}

impl DispatchOutcome {
    /// Max flow time of the list schedule (ms).
    pub fn initial_max_flow_ms(&self) -> i64 {
        self.initial.max_flow_ms()
    }

    /// Max flow time after tabu search (ms).
    pub fn best_max_flow_ms(&self) -> i64 {
        self.best.max_flow_ms()
    }

    /// Reduction of max flow time achieved by the search (ms, never negative).
    pub fn improvement_ms(&self) -> i64 {
        self.initial_max_flow_ms() - self.best_max_flow_ms()
    }

    /// KPIs of the initial and best states.
    pub fn kpis(&self) -> (ScheduleKpi, ScheduleKpi) {
        (
            ScheduleKpi::calculate(&self.initial),
            ScheduleKpi::calculate(&self.best),
        )
    }

    /// Flat summary suitable for JSON output.
    pub fn summary(&self) -> DispatchSummary {
        DispatchSummary {
            jobs: self.best.job_count(),
            initial_max_flow: format_span(self.initial_max_flow_ms()),
            best_max_flow: format_span(self.best_max_flow_ms()),
            improvement_ms: self.improvement_ms(),
            iterations: self.trace.len(),
        }
    }
}

/// Serializable one-line view of a [`DispatchOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    /// Jobs scheduled.
    pub jobs: usize,
    /// Max flow time before search (`H:MM:SS`).
    pub initial_max_flow: String,
    /// Max flow time after search (`H:MM:SS`).
    pub best_max_flow: String,
    /// Improvement in milliseconds.
    pub improvement_ms: i64,
    /// Tabu iterations performed.
    pub iterations: usize,
}

/// Runs the scheduling pipeline with a fixed configuration.
///
/// # Example
///
/// ```
/// use u_baggage::config::DispatchConfig;
/// use u_baggage::models::Flight;
/// use u_baggage::pipeline::Dispatcher;
///
/// let flights = vec![
///     Flight::new("A", 0, 1_800_000).with_terminal(1),
///     Flight::new("B", 60_000, 900_000).with_terminal(1),
/// ];
/// let outcome = Dispatcher::new(DispatchConfig::default()).dispatch(&flights).unwrap();
/// assert!(outcome.best_max_flow_ms() <= outcome.initial_max_flow_ms());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    /// Creates a dispatcher.
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Random source for duration jitter: seeded when `seed` is set,
    /// otherwise from the OS.
    pub fn rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Reads flights from a CSV file using the configured duration table.
    pub fn load_flights(&self, path: impl AsRef<Path>, rng: &mut StdRng) -> Result<Vec<Flight>> {
        ingest::read_flights(path, &self.config.durations, rng)
    }

    /// Reads a CSV file with the configured seed and dispatches it.
    pub fn dispatch_file(&self, path: impl AsRef<Path>) -> Result<DispatchOutcome> {
        let mut rng = Self::rng(self.config.seed);
        let flights = self.load_flights(path, &mut rng)?;
        self.dispatch(&flights)
    }

    /// Validates, schedules and improves a flight set.
    ///
    /// # Errors
    /// [`Error::Validation`] with every problem found when the flights do
    /// not fit the configured layout.
    pub fn dispatch(&self, flights: &[Flight]) -> Result<DispatchOutcome> {
        if let Err(errors) = validate_flights(flights, &self.config.layout) {
            warn!(errors = errors.len(), "flight validation failed");
            return Err(Error::Validation(errors));
        }

        let initial = ListScheduler::new().schedule(flights, &self.config.layout)?;
        info!(
            jobs = initial.job_count(),
            skipped = flights.len() - initial.job_count(),
            max_flow = %format_span(initial.max_flow_ms()),
            "list schedule built"
        );

        let outcome = TabuSearch::new(self.config.tabu()).run(&initial, &AdjacentSwap)?;
        info!(
            iterations = outcome.trace.len(),
            max_flow = %format_span(outcome.best_max_flow_ms()),
            "tabu search finished"
        );

        Ok(DispatchOutcome {
            initial,
            best: outcome.best,
            trace: outcome.trace,
        })
    }
}

/// Dispatches `flights` with `config`.
pub fn run_dispatch(flights: &[Flight], config: &DispatchConfig) -> Result<DispatchOutcome> {
    Dispatcher::new(config.clone()).dispatch(flights)
}
