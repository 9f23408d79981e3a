//! Local search over schedule states.
//!
//! Improves a constructed schedule by tabu search: a
//! [`Neighborhood`] proposes candidate states, a bounded [`TabuList`]
//! remembers recently visited ones, and [`TabuSearch`] steers towards
//! lower maximum flow time.
//!
//! # Submodules
//!
//! - `neighborhood`: the [`Neighborhood`] trait and the [`AdjacentSwap`] move
//! - `tabu_list`: bounded FIFO memory
//! - `tabu`: the driver loop and its trace

mod neighborhood;
mod tabu;
mod tabu_list;

pub use neighborhood::{AdjacentSwap, Neighborhood};
pub use tabu::{IterationRecord, TabuConfig, TabuOutcome, TabuSearch};
pub use tabu_list::TabuList;
