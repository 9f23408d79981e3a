//! Constructive scheduling and KPI evaluation.
//!
//! # Algorithm
//!
//! `ListScheduler` builds the initial schedule with online list
//! scheduling: each terminal's queue is consumed in release order and each
//! flight goes to the conveyor that frees up first. It is not optimal, but
//! gives the local search a feasible starting point.
//!
//! # KPI
//!
//! `ScheduleKpi` computes flow-time metrics, makespan and conveyor
//! utilization of any schedule state.
//!
//! # References
//!
//! - Graham (1966), "Bounds for certain multiprocessing anomalies"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4

mod kpi;
mod list;

pub use kpi::ScheduleKpi;
pub use list::ListScheduler;
