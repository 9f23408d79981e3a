//! Dispatching rules, rule engine and per-terminal flight queues.
//!
//! Flights are ordered for list scheduling by a sequential rule engine.
//! The default engine applies ERD (earliest release date) with stable
//! ties.
//!
//! # Usage
//!
//! ```
//! use u_baggage::dispatching::{FlightQueues, RuleEngine};
//! use u_baggage::models::Flight;
//!
//! let flights = vec![
//!     Flight::new("late", 2_000, 60_000).with_terminal(1),
//!     Flight::new("early", 1_000, 60_000).with_terminal(1),
//! ];
//! let engine = RuleEngine::release_date();
//! let queues = FlightQueues::build(&flights, &engine);
//! assert_eq!(queues.queue(1).unwrap()[0].code, "early");
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
mod queue;
pub mod rules;

pub use engine::RuleEngine;
pub use queue::FlightQueues;

use crate::models::Flight;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates flight priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// flights that should be dispatched first.
///
/// # Reference
/// Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "ERD").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a flight.
    fn evaluate(&self, flight: &Flight) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
