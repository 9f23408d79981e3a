//! Schedule state (solution) model.
//!
//! A state is a complete assignment of jobs to conveyors. It owns a flat
//! job arena; conveyors refer to jobs by arena index. Cloning a state is
//! therefore a full deep copy, and no two states share mutable data.
//!
//! # Equality
//! Two states are equal iff their flat job lists are pairwise equal on
//! every job field (code, size, release, start, terminal, conveyor, flow,
//! end). Conveyor sequences are derived from those fields.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

use super::{Job, Terminal, TerminalId, TerminalLayout};
use crate::error::{Error, Result};

/// A snapshot of all terminals, conveyors and jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleState {
    terminals: Vec<Terminal>,
    jobs: Vec<Job>,
    epoch_ms: i64,
}

impl PartialEq for ScheduleState {
    fn eq(&self, other: &Self) -> bool {
        self.jobs == other.jobs
    }
}

impl Eq for ScheduleState {}

impl ScheduleState {
    /// Creates an empty state with one terminal per layout entry.
    ///
    /// `epoch_ms` is the available date reported by empty conveyors.
    pub fn new(layout: &TerminalLayout, epoch_ms: i64) -> Self {
        Self {
            terminals: layout.build_terminals(),
            jobs: Vec::new(),
            epoch_ms,
        }
    }

    /// All jobs, in creation order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// All terminals, ascending by id.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Looks up a terminal.
    pub fn terminal(&self, id: TerminalId) -> Option<&Terminal> {
        self.terminals.iter().find(|t| t.id == id)
    }

    /// Available date of empty conveyors.
    pub fn epoch_ms(&self) -> i64 {
        self.epoch_ms
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no job is scheduled.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Finds a job by flight code.
    pub fn job(&self, code: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.code == code)
    }

    /// Jobs on one conveyor, in start order.
    pub fn jobs_on(&self, terminal: TerminalId, conveyor: usize) -> Vec<&Job> {
        self.terminal(terminal)
            .and_then(|t| t.conveyors.get(conveyor))
            .map(|c| c.job_indices().iter().map(|&j| &self.jobs[j]).collect())
            .unwrap_or_default()
    }

    /// Maximum flow time over all jobs (ms); the search objective.
    ///
    /// Returns 0 for an empty state.
    pub fn max_flow_ms(&self) -> i64 {
        self.jobs.iter().map(|j| j.flow_ms).max().unwrap_or(0)
    }

    /// Sum of flow times (ms).
    pub fn total_flow_ms(&self) -> i64 {
        self.jobs.iter().map(|j| j.flow_ms).sum()
    }

    /// Latest end time across all jobs (ms), or 0 for an empty state.
    pub fn makespan_ms(&self) -> i64 {
        self.jobs.iter().map(|j| j.end_ms).max().unwrap_or(0)
    }

    /// Earliest release date across all jobs.
    pub fn earliest_release_ms(&self) -> Option<i64> {
        self.jobs.iter().map(|j| j.release_ms).min()
    }

    /// Whether every timing and ordering invariant holds:
    /// jobs are consistent, conveyors are non-overlapping, and every job
    /// sits on exactly the conveyor it names.
    pub fn is_feasible(&self) -> bool {
        if !self.jobs.iter().all(Job::is_consistent) {
            return false;
        }
        let mut seen = vec![false; self.jobs.len()];
        for terminal in &self.terminals {
            for conveyor in &terminal.conveyors {
                if !conveyor.is_non_overlapping(&self.jobs) {
                    return false;
                }
                for &j in conveyor.job_indices() {
                    let job = &self.jobs[j];
                    if seen[j] || job.terminal != terminal.id || job.conveyor != conveyor.index {
                        return false;
                    }
                    seen[j] = true;
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    fn terminal_position(&self, id: TerminalId) -> Result<usize> {
        self.terminals
            .iter()
            .position(|t| t.id == id && t.has_conveyors())
            .ok_or(Error::NoConveyors(id))
    }

    /// Appends an already placed job to the end of its conveyor.
    ///
    /// Returns the job's arena index.
    pub(crate) fn append(&mut self, job: Job) -> Result<usize> {
        let t = self.terminal_position(job.terminal)?;
        let conveyor = self.terminals[t]
            .conveyors
            .get_mut(job.conveyor)
            .ok_or(Error::NoConveyors(job.terminal))?;
        let idx = self.jobs.len();
        conveyor.push(idx);
        self.jobs.push(job);
        Ok(idx)
    }

    /// Removes a job from its conveyor; the job stays in the arena.
    pub(crate) fn detach(&mut self, idx: usize) -> Result<()> {
        let (terminal, conveyor) = (self.jobs[idx].terminal, self.jobs[idx].conveyor);
        let t = self.terminal_position(terminal)?;
        if let Some(c) = self.terminals[t].conveyors.get_mut(conveyor) {
            c.remove(idx);
        }
        Ok(())
    }

    /// Inserts a detached job on `conveyor` at its earliest feasible
    /// start, then repairs the conveyor so no two jobs overlap.
    pub(crate) fn reinsert(&mut self, idx: usize, conveyor: usize) -> Result<()> {
        let terminal = self.jobs[idx].terminal;
        let t = self.terminal_position(terminal)?;
        let lane = self.terminals[t]
            .conveyors
            .get_mut(conveyor)
            .ok_or(Error::NoConveyors(terminal))?;

        let (release, size) = (self.jobs[idx].release_ms, self.jobs[idx].size_ms);
        let start = lane.earliest_start(&self.jobs, release, size);
        self.jobs[idx].place(conveyor, start);
        lane.insert_sorted(&self.jobs, idx);
        lane.repair(&mut self.jobs);
        Ok(())
    }

    /// Mutable job access for tests that need to break invariants.
    #[cfg(test)]
    pub(crate) fn job_mut(&mut self, idx: usize) -> &mut Job {
        &mut self.jobs[idx]
    }
}
