//! Baggage-claim conveyor scheduling.
//!
//! Assigns arriving flights to the baggage conveyors of their terminal so
//! that the worst flow time (baggage completion minus aircraft arrival)
//! of any flight is as small as possible.
//!
//! # Modules
//!
//! - **`timing`**: 12-hour clock parsing, epoch conversion, aircraft
//!   classes and processing-time estimation
//! - **`models`**: Domain types: `Flight`, `Job`, `Conveyor`, `Terminal`,
//!   `TerminalLayout`, `ScheduleState`
//! - **`dispatching`**: Priority rules and per-terminal flight queues
//! - **`scheduler`**: Online list scheduler and schedule KPIs
//! - **`search`**: Adjacent-swap neighborhood and tabu search
//! - **`ingest`**: CSV flight records
//! - **`validation`**: Input integrity checks (duplicate codes, terminal refs)
//! - **`pipeline`**: Validate → list-schedule → tabu search
//! - **`report`**: Batch results log and improvement statistics
//! - **`config`**: JSON-loadable run parameters
//!
//! # Example
//!
//! ```
//! use u_baggage::config::DispatchConfig;
//! use u_baggage::models::Flight;
//! use u_baggage::pipeline::run_dispatch;
//!
//! let flights = vec![
//!     Flight::new("AA100", 0, 30 * 60_000).with_terminal(8),
//!     Flight::new("BA200", 0, 20 * 60_000).with_terminal(8),
//!     Flight::new("LH300", 0, 10 * 60_000).with_terminal(8),
//! ];
//! let outcome = run_dispatch(&flights, &DispatchConfig::default()).unwrap();
//! assert!(outcome.best.is_feasible());
//! assert!(outcome.best_max_flow_ms() <= outcome.initial_max_flow_ms());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Graham (1966), "Bounds for certain multiprocessing anomalies"
//! - Glover & Laguna (1997), "Tabu Search"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod scheduler;
pub mod search;
pub mod timing;
pub mod validation;

pub use error::{Error, Result};
