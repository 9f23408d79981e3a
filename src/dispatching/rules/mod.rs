//! Built-in dispatching rules.
//!
//! Only ERD is provided: list scheduling consumes flights in release order.
//!
//! # Score Convention
//! All rules return lower scores for higher priority flights.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use super::{DispatchingRule, RuleScore};
use crate::models::Flight;

/// Earliest Release Date.
///
/// Prioritizes flights whose baggage becomes available first. This is
/// the order the online list scheduler consumes a terminal's queue in.
///
/// # Reference
/// Graham (1966), "Bounds for certain multiprocessing anomalies" (list scheduling).
#[derive(Debug, Clone, Copy)]
pub struct Erd;

impl DispatchingRule for Erd {
    fn name(&self) -> &'static str {
        "ERD"
    }

    fn evaluate(&self, flight: &Flight) -> RuleScore {
        flight.release_ms as f64
    }

    fn description(&self) -> &'static str {
        "Earliest Release Date"
    }
}
