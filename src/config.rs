//! Run configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it
//! overrides:
//!
//! ```json
//! { "iterations": 25, "seed": 42, "layout": { "1": 4, "8": 2 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::TerminalLayout;
use crate::search::TabuConfig;
use crate::timing::DurationTable;

/// Parameters of one dispatch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Tabu search iterations.
    pub iterations: usize,
    /// Tabu list capacity.
    pub tabu_capacity: usize,
    /// Seed for duration jitter; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Terminal → conveyor-count mapping.
    pub layout: TerminalLayout,
    /// Processing-time table per aircraft class.
    pub durations: DurationTable,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        let tabu = TabuConfig::default();
        Self {
            iterations: tabu.iterations,
            tabu_capacity: tabu.tabu_capacity,
            seed: None,
            layout: TerminalLayout::reference(),
            durations: DurationTable::default(),
        }
    }
}

impl DispatchConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

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

    /// Sets the jitter seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the terminal layout.
    pub fn with_layout(mut self, layout: TerminalLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the duration table.
    pub fn with_durations(mut self, durations: DurationTable) -> Self {
        self.durations = durations;
        self
    }

    /// Tabu parameters derived from this configuration.
    pub fn tabu(&self) -> TabuConfig {
        TabuConfig::default()
            .with_iterations(self.iterations)
            .with_tabu_capacity(self.tabu_capacity)
    }
}
