//! Baggage scheduling domain models.
//!
//! Provides the data types for the conveyor scheduling problem and its
//! solutions.
//!
//! # Domain Mappings
//!
//! | u-baggage | Classic scheduling |
//! |-----------|--------------------|
//! | Flight | Job with release date |
//! | Job | Operation assignment |
//! | Conveyor | Machine |
//! | Terminal | Parallel-machine group |
//! | ScheduleState | Schedule |

mod conveyor;
mod flight;
mod job;
mod state;
mod terminal;

pub use conveyor::Conveyor;
pub use flight::Flight;
pub use job::Job;
pub use state::ScheduleState;
pub use terminal::{Terminal, TerminalId, TerminalLayout};
