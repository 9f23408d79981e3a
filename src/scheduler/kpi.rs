//! Schedule quality metrics (KPIs).
//!
//! Computes standard scheduling performance indicators from a schedule
//! state.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Max Flow Time (F_max) | Largest completion - release |
//! | Avg Flow Time | Mean completion - release |
//! | Makespan (C_max) | Latest completion time |
//! | Horizon | Makespan - earliest release |
//! | Utilization | Conveyor busy time / horizon |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ScheduleState, TerminalId};

/// Schedule performance indicators.
///
/// All time values are in milliseconds.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// Number of scheduled jobs.
    pub job_count: usize,
    /// Maximum flow time of any job (ms).
    pub max_flow_ms: i64,
    /// Average flow time (ms).
    pub avg_flow_ms: f64,
    /// Latest completion time (ms since epoch), 0 when empty.
    pub makespan_ms: i64,
    /// Span from earliest release to latest completion (ms).
    pub horizon_ms: i64,
    /// Per-conveyor utilization keyed by (terminal, conveyor).
    #[serde(skip)]
    pub utilization_by_conveyor: BTreeMap<(TerminalId, usize), f64>,
    /// Average utilization over conveyors that exist (0.0..1.0).
    pub avg_utilization: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule state.
    pub fn calculate(state: &ScheduleState) -> Self {
        let job_count = state.job_count();
        let makespan_ms = state.makespan_ms();
        let horizon_ms = state
            .earliest_release_ms()
            .map(|release| makespan_ms - release)
            .unwrap_or(0);

        let avg_flow_ms = if job_count == 0 {
            0.0
        } else {
            state.total_flow_ms() as f64 / job_count as f64
        };

        let mut utilization_by_conveyor = BTreeMap::new();
        for terminal in state.terminals() {
            for conveyor in &terminal.conveyors {
                let busy = conveyor.busy_ms(state.jobs());
                let util = if horizon_ms > 0 {
                    busy as f64 / horizon_ms as f64
                } else {
                    0.0
                };
                utilization_by_conveyor.insert((terminal.id, conveyor.index), util);
            }
        }

        let avg_utilization = if utilization_by_conveyor.is_empty() {
            0.0
        } else {
            utilization_by_conveyor.values().sum::<f64>() / utilization_by_conveyor.len() as f64
        };

        Self {
            job_count,
            max_flow_ms: state.max_flow_ms(),
            avg_flow_ms,
            makespan_ms,
            horizon_ms,
            utilization_by_conveyor,
            avg_utilization,
        }
    }

    /// Improvement in maximum flow time from `before` to `self` (ms).
    pub fn max_flow_gain_over(&self, before: &ScheduleKpi) -> i64 {
        before.max_flow_ms - self.max_flow_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flight, TerminalLayout};
    use crate::scheduler::ListScheduler;

    fn layout() -> TerminalLayout {
        TerminalLayout::new().with_terminal(1, 2)
    }

    #[test]
    fn test_kpi_basic() {
        let flights = vec![
            Flight::new("J1", 0, 1_000).with_terminal(1),
            Flight::new("J2", 0, 2_000).with_terminal(1),
            Flight::new("J3", 0, 1_000).with_terminal(1),
        ];
        let state = ListScheduler::new().schedule(&flights, &layout()).unwrap();
        let kpi = ScheduleKpi::calculate(&state);

        // J1 on C0 0..1000, J2 on C1 0..2000, J3 on C0 1000..2000
        assert_eq!(kpi.job_count, 3);
        assert_eq!(kpi.max_flow_ms, 2_000);
        assert!((kpi.avg_flow_ms - 5_000.0 / 3.0).abs() < 1e-10);
        assert_eq!(kpi.makespan_ms, 2_000);
        assert_eq!(kpi.horizon_ms, 2_000);
        assert!((kpi.utilization_by_conveyor[&(1, 0)] - 1.0).abs() < 1e-10);
        assert!((kpi.utilization_by_conveyor[&(1, 1)] - 1.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_partial_utilization() {
        let flights = vec![Flight::new("J1", 1_000, 1_000).with_terminal(1)];
        let state = ListScheduler::new().schedule(&flights, &layout()).unwrap();
        let kpi = ScheduleKpi::calculate(&state);
        assert_eq!(kpi.horizon_ms, 1_000);
        assert!((kpi.utilization_by_conveyor[&(1, 0)] - 1.0).abs() < 1e-10);
        assert!((kpi.utilization_by_conveyor[&(1, 1)] - 0.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let state = ScheduleState::new(&layout(), 0);
        let kpi = ScheduleKpi::calculate(&state);
        assert_eq!(kpi.job_count, 0);
        assert_eq!(kpi.max_flow_ms, 0);
        assert_eq!(kpi.horizon_ms, 0);
        assert!((kpi.avg_flow_ms - 0.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_max_flow_gain() {
        let before = ScheduleKpi::calculate(&ScheduleState::new(&layout(), 0));
        let mut after = before.clone();
        after.max_flow_ms = -5;
        assert_eq!(after.max_flow_gain_over(&before), 5);
    }
}
